//! Movement domain: the per-frame character motion tick.
//!
//! The tick is independent of the ECS: it works against a [`MotionBody`] and an
//! [`AnimationSink`], so the systems in `systems::motion` adapt avian2d and the
//! animator to these traits, and tests drive it with plain structs.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use crate::movement::{Facing, MotionConfig, MotionState, MovementInput};

/// The physics-side services the controller needs from a character body.
pub trait MotionBody {
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    /// Whether a circle of `radius` at the ground-check anchor overlaps `layers`.
    fn overlaps_ground(&self, radius: f32, layers: LayerMask) -> bool;
    /// Mirror the visual horizontally (negate scale x).
    fn flip_horizontal(&mut self);
}

/// Animation parameters written by the controller, with typed payloads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimParam {
    Speed(f32),
    Grounded(bool),
    VerticalSpeed(f32),
    IsDashing(bool),
    IsFalling(bool),
    /// One-shot trigger.
    Jump,
}

impl AnimParam {
    /// Parameter name as authored in the animation asset. Casing is significant.
    pub fn name(&self) -> &'static str {
        match self {
            AnimParam::Speed(_) => "Speed",
            AnimParam::Grounded(_) => "Grounded",
            AnimParam::VerticalSpeed(_) => "VerticalSpeed",
            AnimParam::IsDashing(_) => "IsDashing",
            AnimParam::IsFalling(_) => "isFalling",
            AnimParam::Jump => "Jump",
        }
    }
}

/// Receiver of animation parameter writes.
pub trait AnimationSink {
    fn set(&mut self, param: AnimParam);
}

/// Transitions that happened during one tick, for logging and messages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub landed: bool,
    pub left_ground: bool,
    pub dash_started: bool,
    pub dash_ended: bool,
    pub jumped: bool,
    pub flipped: bool,
}

/// Cap on the locomotion blend value; 1.0 is reserved for the ground dash.
const WALK_BLEND_CAP: f32 = 0.5;
const DASH_BLEND: f32 = 1.0;

/// Advance one character by one frame.
///
/// `now` is the engine clock in seconds. The dash branch is exclusive with
/// walking, flipping, jumping and the falling flag: while dashing none of those
/// run, so `isFalling` keeps its last locomotion value until the dash ends.
pub fn tick<B, S>(
    state: &mut MotionState,
    config: &MotionConfig,
    input: &MovementInput,
    now: f32,
    body: &mut B,
    sink: &mut S,
) -> TickReport
where
    B: MotionBody + ?Sized,
    S: AnimationSink + ?Sized,
{
    let mut report = TickReport::default();
    let horizontal = input.horizontal;

    let grounded = body.overlaps_ground(config.ground_radius, config.ground_mask());
    report.landed = grounded && !state.grounded;
    report.left_ground = !grounded && state.grounded;
    state.grounded = grounded;

    if grounded {
        state.air_dashes_remaining = config.max_air_dashes;
    }

    sink.set(AnimParam::Speed(horizontal.abs().min(WALK_BLEND_CAP)));
    sink.set(AnimParam::Grounded(grounded));
    sink.set(AnimParam::VerticalSpeed(body.velocity().y));

    let has_direction = horizontal != 0.0;
    let can_ground_dash = grounded && has_direction && !state.is_dashing;
    let can_air_dash =
        !grounded && state.air_dashes_remaining > 0 && has_direction && !state.is_dashing;

    if input.dash_just_pressed && (can_ground_dash || can_air_dash) {
        state.is_dashing = true;
        state.dash_end_time = now + config.dash_duration;
        if !grounded {
            state.air_dashes_remaining -= 1;
        }
        sink.set(AnimParam::IsDashing(true));
        report.dash_started = true;
    }

    if state.is_dashing {
        let velocity = body.velocity();
        body.set_velocity(Vec2::new(
            state.facing.sign() * config.dash_speed,
            velocity.y,
        ));

        if grounded {
            sink.set(AnimParam::Speed(DASH_BLEND));
        }

        if now >= state.dash_end_time {
            state.is_dashing = false;
            sink.set(AnimParam::IsDashing(false));
            report.dash_ended = true;
        }
        return report;
    }

    let velocity = body.velocity();
    body.set_velocity(Vec2::new(horizontal * config.walk_speed, velocity.y));

    let wants_flip = (horizontal > 0.0 && state.facing == Facing::Left)
        || (horizontal < 0.0 && state.facing == Facing::Right);
    if wants_flip {
        state.facing = state.facing.flipped();
        body.flip_horizontal();
        report.flipped = true;
    }

    if input.jump_just_pressed && grounded {
        let velocity = body.velocity();
        body.set_velocity(Vec2::new(velocity.x, config.jump_force));
        sink.set(AnimParam::Jump);
        report.jumped = true;
    }

    let is_falling = body.velocity().y < config.falling_threshold && !grounded;
    sink.set(AnimParam::IsFalling(is_falling));

    report
}
