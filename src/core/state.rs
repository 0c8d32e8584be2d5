//! Core domain: app state definitions.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Settings are being loaded and validated
    #[default]
    Boot,
    Run,
}
