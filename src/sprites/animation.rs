//! Animator parameters, state selection and playback.
//!
//! The motion tick writes typed parameters into [`AnimatorParams`]; the state
//! machine here turns them into a clip and advances its frames.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use super::AnimationClips;
use crate::movement::{AnimParam, AnimationSink};

/// Speed blend value at or above which the grounded dash pose is used.
const DASH_BLEND: f32 = 1.0;
/// Speed blend value below which the character counts as standing still.
const IDLE_BLEND: f32 = 0.01;

/// Parameter block the animation state machine reads each frame.
#[derive(Component, Debug, Clone, PartialEq, Default)]
pub struct AnimatorParams {
    pub speed: f32,
    pub grounded: bool,
    pub vertical_speed: f32,
    pub is_dashing: bool,
    pub is_falling: bool,
    /// Latched by the `Jump` trigger until the state machine consumes it.
    pub jump_triggered: bool,
}

impl AnimationSink for AnimatorParams {
    fn set(&mut self, param: AnimParam) {
        match param {
            AnimParam::Speed(v) => self.speed = v,
            AnimParam::Grounded(v) => self.grounded = v,
            AnimParam::VerticalSpeed(v) => self.vertical_speed = v,
            AnimParam::IsDashing(v) => self.is_dashing = v,
            AnimParam::IsFalling(v) => self.is_falling = v,
            AnimParam::Jump => self.jump_triggered = true,
        }
    }
}

impl AnimatorParams {
    /// Take the pending jump trigger, resetting it.
    pub fn consume_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_triggered)
    }
}

/// Animation states for the player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Dash,
    Jump,
    Fall,
}

impl AnimationState {
    /// Clip name used in the manifest.
    pub fn clip_name(&self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Walk => "walk",
            AnimationState::Dash => "dash",
            AnimationState::Jump => "jump",
            AnimationState::Fall => "fall",
        }
    }

    pub fn from_clip_name(name: &str) -> Option<Self> {
        match name {
            "idle" => Some(AnimationState::Idle),
            "walk" => Some(AnimationState::Walk),
            "dash" => Some(AnimationState::Dash),
            "jump" => Some(AnimationState::Jump),
            "fall" => Some(AnimationState::Fall),
            _ => None,
        }
    }
}

/// Pick the clip for this frame's parameters.
///
/// `jump_triggered` is the consumed one-shot trigger. Airborne without the
/// falling flag keeps the rising pose, unless already falling.
pub fn select_state(
    params: &AnimatorParams,
    current: AnimationState,
    jump_triggered: bool,
) -> AnimationState {
    if params.is_dashing {
        return AnimationState::Dash;
    }
    if jump_triggered {
        return AnimationState::Jump;
    }
    // The ground check can still report grounded for a frame after takeoff
    if current == AnimationState::Jump && params.vertical_speed > 0.0 {
        return AnimationState::Jump;
    }
    if !params.grounded {
        return if params.is_falling || current == AnimationState::Fall {
            AnimationState::Fall
        } else {
            AnimationState::Jump
        };
    }
    if params.speed >= DASH_BLEND {
        AnimationState::Dash
    } else if params.speed > IDLE_BLEND {
        AnimationState::Walk
    } else {
        AnimationState::Idle
    }
}

/// Component for animation playback on a sprite.
#[derive(Component, Debug)]
pub struct AnimationController {
    /// Current animation state.
    pub state: AnimationState,
    /// Previous state (for detecting transitions).
    pub previous_state: AnimationState,
    /// Current frame index (0-based).
    pub current_frame: u32,
    /// Total frames in current animation.
    pub total_frames: u32,
    /// Time accumulator for frame timing.
    pub frame_timer: f32,
    /// Seconds per frame.
    pub frame_duration: f32,
    /// Whether the animation should loop.
    pub looping: bool,
    /// Whether the animation has finished (for non-looping).
    pub finished: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            state: AnimationState::Idle,
            previous_state: AnimationState::Idle,
            current_frame: 0,
            total_frames: 4,
            frame_timer: 0.0,
            frame_duration: 0.15,
            looping: true,
            finished: false,
        }
    }
}

impl AnimationController {
    /// Set the animation state, restarting the clip if the state changed.
    /// Returns true on a change.
    pub fn set_state(&mut self, state: AnimationState, clips: &AnimationClips) -> bool {
        if self.state == state {
            return false;
        }

        let clip = clips.get(state);
        self.previous_state = self.state;
        self.state = state;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;
        self.looping = clip.looping;
        self.total_frames = clip.frames.max(1);
        self.frame_duration = clip.frame_duration;
        true
    }

    /// Advance playback by `dt` seconds. Returns true when a non-looping
    /// clip reaches its last frame.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }

        self.frame_timer += dt;
        if self.frame_timer < self.frame_duration {
            return false;
        }

        self.frame_timer -= self.frame_duration;
        self.current_frame += 1;

        if self.current_frame < self.total_frames {
            return false;
        }

        if self.looping {
            self.current_frame = 0;
            false
        } else {
            self.current_frame = self.total_frames - 1;
            self.finished = true;
            true
        }
    }
}

/// Message fired when animation state changes.
#[derive(Debug)]
pub struct AnimationStateChanged {
    pub entity: Entity,
    pub from: AnimationState,
    pub to: AnimationState,
}

impl Message for AnimationStateChanged {}

/// Message fired when a non-looping animation completes.
#[derive(Debug)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub state: AnimationState,
}

impl Message for AnimationFinished {}

/// System that applies animation state from the animator parameters.
pub fn animation_state_machine(
    clips: Res<AnimationClips>,
    mut query: Query<(Entity, &mut AnimatorParams, &mut AnimationController)>,
    mut changed_events: MessageWriter<AnimationStateChanged>,
) {
    for (entity, mut params, mut controller) in &mut query {
        let jump_triggered = params.consume_jump();
        let next = select_state(&params, controller.state, jump_triggered);

        if controller.set_state(next, &clips) {
            changed_events.write(AnimationStateChanged {
                entity,
                from: controller.previous_state,
                to: next,
            });
        }
    }
}

/// System that updates animation frames based on time.
pub fn update_animation_frames(
    time: Res<Time>,
    mut query: Query<(Entity, &mut AnimationController)>,
    mut finished_events: MessageWriter<AnimationFinished>,
) {
    for (entity, mut controller) in &mut query {
        if controller.advance(time.delta_secs()) {
            finished_events.write(AnimationFinished {
                entity,
                state: controller.state,
            });
        }
    }
}

/// System that tints the sprite with the active clip's color.
pub fn apply_clip_tint(
    clips: Res<AnimationClips>,
    mut query: Query<(&AnimationController, &mut Sprite), Changed<AnimationController>>,
) {
    for (controller, mut sprite) in &mut query {
        let color = clips.get(controller.state).color();
        if sprite.color != color {
            sprite.color = color;
        }
    }
}

/// System that logs clip transitions and completions.
pub fn log_animation_messages(
    mut changed_events: MessageReader<AnimationStateChanged>,
    mut finished_events: MessageReader<AnimationFinished>,
) {
    for event in changed_events.read() {
        debug!(
            "Animation {:?}: {} -> {}",
            event.entity,
            event.from.clip_name(),
            event.to.clip_name()
        );
    }
    for event in finished_events.read() {
        debug!(
            "Animation {:?}: '{}' finished",
            event.entity,
            event.state.clip_name()
        );
    }
}
