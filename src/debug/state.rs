//! Debug domain: toggles for debug tooling.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Whether the ground-check circle is drawn
    pub show_ground_check: bool,
    /// Whether to show the motion info overlay
    pub show_info: bool,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            show_ground_check: true,
            show_info: false,
        }
    }
}
