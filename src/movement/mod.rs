//! Movement domain: walk, jump and dash locomotion plugin wiring.

mod bootstrap;
mod components;
mod controller;
mod events;
mod level;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    Facing, GameLayer, Ground, GroundCheck, MotionPhase, MotionRig, MotionState, Player, Wall,
};
pub use controller::{AnimParam, AnimationSink, MotionBody, TickReport, tick};
pub use events::{DashEndedEvent, DashStartedEvent, JumpedEvent, LandedEvent};
pub use resources::{MotionConfig, MovementInput};

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::bootstrap::spawn_player;
use crate::movement::level::spawn_level;
use crate::movement::systems::{apply_motion, bind_motion_rigs, read_input};

/// Systems that sample input and move characters; animation runs after these.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MotionSystems;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .add_message::<LandedEvent>()
            .add_message::<DashStartedEvent>()
            .add_message::<DashEndedEvent>()
            .add_message::<JumpedEvent>()
            .add_systems(OnEnter(GameState::Run), (spawn_level, spawn_player))
            .add_systems(
                Update,
                (read_input, bind_motion_rigs, apply_motion)
                    .chain()
                    .in_set(MotionSystems)
                    .run_if(in_state(GameState::Run)),
            );
    }
}
