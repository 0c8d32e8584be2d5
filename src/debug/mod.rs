//! Debug tooling for tuning movement (dev-tools feature).
//!
//! Features:
//! - Ground-check gizmo (F2)
//! - Motion info overlay (F1)

mod state;
mod systems;
mod ui;

use bevy::prelude::*;

use crate::core::GameState;
use crate::debug::state::DebugState;
use crate::debug::systems::{draw_ground_check, handle_debug_hotkeys, update_debug_info_overlay};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                handle_debug_hotkeys,
                draw_ground_check,
                update_debug_info_overlay,
            )
                .run_if(in_state(GameState::Run)),
        );
    }
}
