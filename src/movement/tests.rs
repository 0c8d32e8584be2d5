//! Movement domain: tests for the motion tick, tuning and rig binding.

use avian2d::prelude::{LayerMask, PhysicsLayer};
use bevy::prelude::{Entity, Vec2};

use super::{
    AnimParam, AnimationSink, Facing, GameLayer, MotionBody, MotionConfig, MotionPhase, MotionRig,
    MotionState, MovementInput, TickReport, tick,
};
use crate::content::ConfigError;

// -----------------------------------------------------------------------------
// Test doubles
// -----------------------------------------------------------------------------

struct TestBody {
    velocity: Vec2,
    grounded: bool,
    scale_x: f32,
}

impl TestBody {
    fn grounded() -> Self {
        Self {
            velocity: Vec2::ZERO,
            grounded: true,
            scale_x: 1.0,
        }
    }

    fn airborne(vertical: f32) -> Self {
        Self {
            velocity: Vec2::new(0.0, vertical),
            grounded: false,
            scale_x: 1.0,
        }
    }
}

impl MotionBody for TestBody {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn overlaps_ground(&self, _radius: f32, _layers: LayerMask) -> bool {
        self.grounded
    }

    fn flip_horizontal(&mut self) {
        self.scale_x = -self.scale_x;
    }
}

#[derive(Default)]
struct RecordingSink {
    writes: Vec<AnimParam>,
}

impl RecordingSink {
    /// Most recent write of the parameter named `name`.
    fn last(&self, name: &str) -> Option<AnimParam> {
        self.writes.iter().rev().find(|p| p.name() == name).copied()
    }

    fn count(&self, name: &str) -> usize {
        self.writes.iter().filter(|p| p.name() == name).count()
    }

    fn clear(&mut self) {
        self.writes.clear();
    }
}

impl AnimationSink for RecordingSink {
    fn set(&mut self, param: AnimParam) {
        self.writes.push(param);
    }
}

fn input(horizontal: f32, dash: bool, jump: bool) -> MovementInput {
    MovementInput {
        horizontal,
        dash_just_pressed: dash,
        jump_just_pressed: jump,
    }
}

fn step(
    state: &mut MotionState,
    config: &MotionConfig,
    body: &mut TestBody,
    sink: &mut RecordingSink,
    frame_input: MovementInput,
    now: f32,
) -> TickReport {
    tick(state, config, &frame_input, now, body, sink)
}

// -----------------------------------------------------------------------------
// Animation parameter tests
// -----------------------------------------------------------------------------

#[test]
fn test_anim_param_names_match_animator_asset() {
    assert_eq!(AnimParam::Speed(0.0).name(), "Speed");
    assert_eq!(AnimParam::Grounded(true).name(), "Grounded");
    assert_eq!(AnimParam::VerticalSpeed(0.0).name(), "VerticalSpeed");
    assert_eq!(AnimParam::IsDashing(true).name(), "IsDashing");
    assert_eq!(AnimParam::IsFalling(true).name(), "isFalling");
    assert_eq!(AnimParam::Jump.name(), "Jump");
}

#[test]
fn test_speed_blend_capped_at_half() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::grounded();
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), 0.0);
    assert_eq!(sink.last("Speed"), Some(AnimParam::Speed(0.5)));

    sink.clear();
    step(&mut state, &config, &mut body, &mut sink, input(-0.3, false, false), 0.1);
    assert_eq!(sink.last("Speed"), Some(AnimParam::Speed(0.3)));

    sink.clear();
    step(&mut state, &config, &mut body, &mut sink, input(0.0, false, false), 0.2);
    assert_eq!(sink.last("Speed"), Some(AnimParam::Speed(0.0)));
}

#[test]
fn test_every_tick_writes_grounded_and_vertical_speed() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::airborne(-2.5);
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(0.0, false, false), 0.0);

    assert_eq!(sink.last("Grounded"), Some(AnimParam::Grounded(false)));
    assert_eq!(sink.last("VerticalSpeed"), Some(AnimParam::VerticalSpeed(-2.5)));
}

// -----------------------------------------------------------------------------
// Locomotion tests
// -----------------------------------------------------------------------------

#[test]
fn test_walk_sets_horizontal_and_keeps_vertical() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::airborne(3.0);
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), 0.0);

    assert_eq!(body.velocity, Vec2::new(config.walk_speed, 3.0));
}

#[test]
fn test_no_input_stops_horizontal_motion() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::grounded();
    body.velocity = Vec2::new(4.0, 0.0);
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(0.0, false, false), 0.0);

    assert_eq!(body.velocity.x, 0.0);
}

#[test]
fn test_flip_follows_input_direction() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::grounded();
    let mut sink = RecordingSink::default();

    // Already facing right: no flip
    let report = step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), 0.0);
    assert!(!report.flipped);
    assert_eq!(state.facing, Facing::Right);

    let report = step(&mut state, &config, &mut body, &mut sink, input(-1.0, false, false), 0.1);
    assert!(report.flipped);
    assert_eq!(state.facing, Facing::Left);
    assert_eq!(body.scale_x, -1.0);

    // Releasing the axis keeps the current facing
    let report = step(&mut state, &config, &mut body, &mut sink, input(0.0, false, false), 0.2);
    assert!(!report.flipped);
    assert_eq!(state.facing, Facing::Left);

    step(&mut state, &config, &mut body, &mut sink, input(0.5, false, false), 0.3);
    assert_eq!(state.facing, Facing::Right);
    assert_eq!(body.scale_x, 1.0);
}

#[test]
fn test_ground_probe_uses_configured_radius_and_layers() {
    let config = MotionConfig {
        ground_radius: 0.35,
        ground_layers: vec![GameLayer::Ground, GameLayer::Wall],
        ..MotionConfig::default()
    };

    struct Recorder {
        probes: Vec<(f32, u32)>,
    }

    struct RecorderBody<'a> {
        recorder: &'a std::cell::RefCell<Recorder>,
    }

    impl MotionBody for RecorderBody<'_> {
        fn velocity(&self) -> Vec2 {
            Vec2::ZERO
        }
        fn set_velocity(&mut self, _velocity: Vec2) {}
        fn overlaps_ground(&self, radius: f32, layers: LayerMask) -> bool {
            self.recorder.borrow_mut().probes.push((radius, layers.0));
            true
        }
        fn flip_horizontal(&mut self) {}
    }

    let recorder = std::cell::RefCell::new(Recorder { probes: Vec::new() });
    let mut body = RecorderBody {
        recorder: &recorder,
    };
    let mut state = MotionState::new(config.max_air_dashes);
    let mut sink = RecordingSink::default();

    tick(
        &mut state,
        &config,
        &input(0.0, false, false),
        0.0,
        &mut body,
        &mut sink,
    );

    let probes = recorder.into_inner().probes;
    assert_eq!(probes.len(), 1);
    assert_eq!(probes[0].0, 0.35);
    assert_eq!(probes[0].1, config.ground_mask().0);
}

// -----------------------------------------------------------------------------
// Jump tests
// -----------------------------------------------------------------------------

#[test]
fn test_jump_applies_force_when_grounded() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::grounded();
    let mut sink = RecordingSink::default();

    let report = step(&mut state, &config, &mut body, &mut sink, input(1.0, false, true), 0.0);

    assert!(report.jumped);
    assert_eq!(body.velocity, Vec2::new(config.walk_speed, config.jump_force));
    assert_eq!(sink.count("Jump"), 1);
}

#[test]
fn test_jump_ignored_while_airborne() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::airborne(-1.0);
    let mut sink = RecordingSink::default();

    let report = step(&mut state, &config, &mut body, &mut sink, input(0.0, false, true), 0.0);

    assert!(!report.jumped);
    assert_eq!(body.velocity.y, -1.0);
    assert_eq!(sink.count("Jump"), 0);
}

// -----------------------------------------------------------------------------
// Falling flag tests
// -----------------------------------------------------------------------------

#[test]
fn test_falling_when_airborne_below_threshold() {
    let config = MotionConfig {
        falling_threshold: -0.1,
        ..MotionConfig::default()
    };
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::airborne(-5.0);
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(0.0, false, false), 0.0);

    assert_eq!(sink.last("isFalling"), Some(AnimParam::IsFalling(true)));
}

#[test]
fn test_not_falling_when_grounded_or_rising() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut sink = RecordingSink::default();

    let mut grounded = TestBody::grounded();
    grounded.velocity.y = -5.0;
    step(&mut state, &config, &mut grounded, &mut sink, input(0.0, false, false), 0.0);
    assert_eq!(sink.last("isFalling"), Some(AnimParam::IsFalling(false)));

    sink.clear();
    let mut rising = TestBody::airborne(2.0);
    step(&mut state, &config, &mut rising, &mut sink, input(0.0, false, false), 0.1);
    assert_eq!(sink.last("isFalling"), Some(AnimParam::IsFalling(false)));

    // Exactly at the threshold is not falling
    sink.clear();
    let mut hovering = TestBody::airborne(config.falling_threshold);
    step(&mut state, &config, &mut hovering, &mut sink, input(0.0, false, false), 0.2);
    assert_eq!(sink.last("isFalling"), Some(AnimParam::IsFalling(false)));
}

#[test]
fn test_falling_flag_not_written_while_dashing() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::airborne(-5.0);
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(1.0, true, false), 0.0);
    assert!(state.is_dashing);
    assert_eq!(sink.count("isFalling"), 0);

    // Still skipped on the tick the dash ends
    let end = state.dash_end_time;
    step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), end);
    assert!(!state.is_dashing);
    assert_eq!(sink.count("isFalling"), 0);

    step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), end + 0.1);
    assert_eq!(sink.count("isFalling"), 1);
}

// -----------------------------------------------------------------------------
// Dash tests
// -----------------------------------------------------------------------------

#[test]
fn test_ground_dash_scenario_keeps_air_charge() {
    let config = MotionConfig {
        max_air_dashes: 1,
        ..MotionConfig::default()
    };
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::grounded();
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), 0.0);
    let report = step(&mut state, &config, &mut body, &mut sink, input(1.0, true, false), 0.1);

    assert!(report.dash_started);
    assert!(state.is_dashing);
    assert_eq!(state.phase(), MotionPhase::Dashing);
    assert_eq!(state.air_dashes_remaining, 1);
    assert_eq!(body.velocity.x, config.dash_speed);
    assert_eq!(sink.last("IsDashing"), Some(AnimParam::IsDashing(true)));
    // Grounded dash holds the blend at the dash end of the tree
    assert_eq!(sink.last("Speed"), Some(AnimParam::Speed(1.0)));

    let end = state.dash_end_time;
    let report = step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), end);
    assert!(report.dash_ended);
    assert!(!state.is_dashing);
    assert_eq!(sink.last("IsDashing"), Some(AnimParam::IsDashing(false)));

    step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), end + 0.05);
    assert_eq!(state.phase(), MotionPhase::Locomotion);
    assert_eq!(body.velocity.x, config.walk_speed);
}

#[test]
fn test_air_dash_scenario_consumes_single_charge() {
    let config = MotionConfig {
        max_air_dashes: 1,
        ..MotionConfig::default()
    };
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::airborne(0.0);
    let mut sink = RecordingSink::default();

    // Turn left first so the dash direction follows the input
    step(&mut state, &config, &mut body, &mut sink, input(-1.0, false, false), 0.0);
    assert_eq!(state.facing, Facing::Left);

    let report = step(&mut state, &config, &mut body, &mut sink, input(-1.0, true, false), 0.1);
    assert!(report.dash_started);
    assert!(state.is_dashing);
    assert_eq!(state.air_dashes_remaining, 0);
    assert_eq!(body.velocity.x, -config.dash_speed);

    // Pressing again mid-dash changes nothing
    let report = step(&mut state, &config, &mut body, &mut sink, input(-1.0, true, false), 0.15);
    assert!(!report.dash_started);
    assert_eq!(state.air_dashes_remaining, 0);

    let end = state.dash_end_time;
    step(&mut state, &config, &mut body, &mut sink, input(-1.0, false, false), end);
    assert!(!state.is_dashing);

    // No charges left until landing
    let report = step(&mut state, &config, &mut body, &mut sink, input(-1.0, true, false), end + 0.1);
    assert!(!report.dash_started);
    assert!(!state.is_dashing);
    assert_eq!(body.velocity.x, -config.walk_speed);
}

#[test]
fn test_airborne_dash_leaves_speed_blend_alone() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::airborne(0.0);
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(1.0, true, false), 0.0);

    assert!(state.is_dashing);
    assert_eq!(sink.last("Speed"), Some(AnimParam::Speed(0.5)));
}

#[test]
fn test_dash_requires_horizontal_input() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut sink = RecordingSink::default();

    let mut grounded = TestBody::grounded();
    let report = step(&mut state, &config, &mut grounded, &mut sink, input(0.0, true, false), 0.0);
    assert!(!report.dash_started);

    let mut airborne = TestBody::airborne(0.0);
    let report = step(&mut state, &config, &mut airborne, &mut sink, input(0.0, true, false), 0.1);
    assert!(!report.dash_started);
    assert_eq!(state.air_dashes_remaining, config.max_air_dashes);
    assert_eq!(sink.count("IsDashing"), 0);
}

#[test]
fn test_dash_direction_follows_facing_not_same_frame_input() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::grounded();
    let mut sink = RecordingSink::default();

    // Facing right, pressing left and dash on the same frame
    step(&mut state, &config, &mut body, &mut sink, input(-1.0, true, false), 0.0);

    assert!(state.is_dashing);
    assert_eq!(state.facing, Facing::Right);
    assert_eq!(body.velocity.x, config.dash_speed);
}

#[test]
fn test_dash_preserves_vertical_velocity() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::airborne(-3.0);
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(1.0, true, false), 0.0);
    assert_eq!(body.velocity, Vec2::new(config.dash_speed, -3.0));

    body.velocity.y = -4.0;
    step(&mut state, &config, &mut body, &mut sink, input(0.0, false, false), 0.05);
    assert_eq!(body.velocity, Vec2::new(config.dash_speed, -4.0));
}

#[test]
fn test_dash_blocks_walk_flip_and_jump() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::grounded();
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(1.0, true, false), 0.0);
    let report = step(&mut state, &config, &mut body, &mut sink, input(-1.0, false, true), 0.05);

    assert!(!report.flipped);
    assert!(!report.jumped);
    assert_eq!(state.facing, Facing::Right);
    assert_eq!(body.velocity, Vec2::new(config.dash_speed, 0.0));
    assert_eq!(sink.count("Jump"), 0);
}

#[test]
fn test_dash_lasts_exactly_its_duration() {
    let config = MotionConfig {
        dash_duration: 0.25,
        ..MotionConfig::default()
    };
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::grounded();
    let mut sink = RecordingSink::default();

    let start = 2.0;
    step(&mut state, &config, &mut body, &mut sink, input(1.0, true, false), start);
    assert_eq!(state.dash_end_time, start + config.dash_duration);

    for now in [start + 0.05, start + 0.1, start + 0.2, state.dash_end_time - 0.001] {
        step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), now);
        assert!(state.is_dashing, "dash ended early at {}", now);
    }

    let dash_end_time = state.dash_end_time;
    step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), dash_end_time);
    assert!(!state.is_dashing);
}

#[test]
fn test_late_frame_still_ends_dash() {
    let config = MotionConfig::default();
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::grounded();
    let mut sink = RecordingSink::default();

    step(&mut state, &config, &mut body, &mut sink, input(1.0, true, false), 0.0);
    let report = step(&mut state, &config, &mut body, &mut sink, input(1.0, false, false), 5.0);

    assert!(report.dash_ended);
    assert!(!state.is_dashing);
}

// -----------------------------------------------------------------------------
// Air dash charge tests
// -----------------------------------------------------------------------------

#[test]
fn test_landing_resets_air_dashes() {
    let config = MotionConfig {
        max_air_dashes: 2,
        ..MotionConfig::default()
    };
    let mut state = MotionState::new(config.max_air_dashes);
    state.air_dashes_remaining = 0;
    let mut body = TestBody::airborne(-1.0);
    let mut sink = RecordingSink::default();

    let report = step(&mut state, &config, &mut body, &mut sink, input(0.0, false, false), 0.0);
    assert!(!report.landed);
    assert_eq!(state.air_dashes_remaining, 0);

    body.grounded = true;
    let report = step(&mut state, &config, &mut body, &mut sink, input(0.0, false, false), 0.1);
    assert!(report.landed);
    assert_eq!(state.air_dashes_remaining, 2);

    body.grounded = false;
    let report = step(&mut state, &config, &mut body, &mut sink, input(0.0, false, false), 0.2);
    assert!(report.left_ground);
}

#[test]
fn test_air_dash_charges_stay_in_range() {
    let config = MotionConfig {
        max_air_dashes: 2,
        dash_duration: 0.1,
        ..MotionConfig::default()
    };
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::grounded();
    let mut sink = RecordingSink::default();

    // Mixed sequence of ground/air frames with dash presses every few frames
    for frame in 0..200u32 {
        body.grounded = (frame / 25) % 2 == 0;
        let horizontal = if frame % 7 == 0 { 0.0 } else { 1.0 };
        let dash = frame % 3 == 0;
        let now = frame as f32 * 0.05;

        step(&mut state, &config, &mut body, &mut sink, input(horizontal, dash, false), now);

        assert!(state.air_dashes_remaining <= config.max_air_dashes);
        if body.grounded {
            assert_eq!(state.air_dashes_remaining, config.max_air_dashes);
        }
    }
}

#[test]
fn test_zero_air_dashes_disables_air_dash() {
    let config = MotionConfig {
        max_air_dashes: 0,
        ..MotionConfig::default()
    };
    let mut state = MotionState::new(config.max_air_dashes);
    let mut body = TestBody::airborne(0.0);
    let mut sink = RecordingSink::default();

    let report = step(&mut state, &config, &mut body, &mut sink, input(1.0, true, false), 0.0);

    assert!(!report.dash_started);
    assert_eq!(state.air_dashes_remaining, 0);
}

// -----------------------------------------------------------------------------
// Tuning and rig tests
// -----------------------------------------------------------------------------

#[test]
fn test_default_tuning_values() {
    let config = MotionConfig::default();
    assert_eq!(config.walk_speed, 5.0);
    assert_eq!(config.dash_speed, 12.0);
    assert_eq!(config.dash_duration, 0.2);
    assert_eq!(config.jump_force, 10.0);
    assert_eq!(config.max_air_dashes, 1);
    assert_eq!(config.ground_radius, 0.2);
    assert_eq!(config.falling_threshold, -0.1);
    assert_eq!(config.ground_layers, vec![GameLayer::Ground]);
}

#[test]
fn test_ground_mask_combines_layers() {
    let config = MotionConfig {
        ground_layers: vec![GameLayer::Ground, GameLayer::Wall],
        ..MotionConfig::default()
    };
    let mask = config.ground_mask();

    assert_eq!(mask.0, GameLayer::Ground.to_bits() | GameLayer::Wall.to_bits());
    assert_eq!(mask.0 & GameLayer::Player.to_bits(), 0);
}

#[test]
fn test_derived_tuning_helpers() {
    let config = MotionConfig::default();
    assert!((config.jump_height(20.0) - 2.5).abs() < 1e-5);
    assert!((config.dash_distance() - 2.4).abs() < 1e-5);
}

#[test]
fn test_motion_rig_requires_body_and_anchor() {
    let owner = Entity::from_bits(42);
    let anchor = Entity::from_bits(43);

    let rig = MotionRig::new(owner, Some(anchor), true).expect("valid rig");
    assert_eq!(rig.ground_check, anchor);

    assert!(matches!(
        MotionRig::new(owner, None, true),
        Err(ConfigError::MissingGroundCheck { entity }) if entity == owner
    ));
    assert!(matches!(
        MotionRig::new(owner, Some(anchor), false),
        Err(ConfigError::MissingBody { entity }) if entity == owner
    ));
}

#[test]
fn test_new_state_starts_in_locomotion_facing_right() {
    let state = MotionState::new(3);
    assert_eq!(state.facing, Facing::Right);
    assert_eq!(state.phase(), MotionPhase::Locomotion);
    assert_eq!(state.air_dashes_remaining, 3);
    assert!(!state.is_dashing);
}
