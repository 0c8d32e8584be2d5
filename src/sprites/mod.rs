//! Sprites module for character animation.
//!
//! This module handles:
//! - The animator parameter block written by the motion tick
//! - Animation state selection and frame playback
//! - Loading clip timing from a JSON manifest

pub mod animation;
pub mod manifest;


use bevy::prelude::*;

pub use animation::*;
pub use manifest::*;

use crate::core::GameState;
use crate::movement::MotionSystems;

/// Path of the clip manifest, relative to the working directory.
pub const CLIP_MANIFEST_PATH: &str = "assets/sprites/clips.json";

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationClips>()
            .add_message::<AnimationStateChanged>()
            .add_message::<AnimationFinished>()
            .add_systems(Startup, load_clip_manifest)
            .add_systems(
                Update,
                (
                    animation_state_machine,
                    update_animation_frames,
                    apply_clip_tint,
                    log_animation_messages,
                )
                    .chain()
                    .after(MotionSystems)
                    .run_if(in_state(GameState::Run)),
            );
    }
}

/// System to load the clip manifest at startup.
fn load_clip_manifest(mut clips: ResMut<AnimationClips>) {
    clips.load_from_file(CLIP_MANIFEST_PATH);
}
