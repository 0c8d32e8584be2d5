//! Core domain: app state, camera and shared wiring.

mod state;
mod systems;

pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{follow_player, setup_camera};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_systems(OnEnter(GameState::Run), setup_camera)
            .add_systems(
                PostUpdate,
                follow_player.run_if(in_state(GameState::Run)),
            );
    }
}
