//! Content domain: settings loading and validation at startup.

mod data;
mod loader;
mod validation;


pub use data::PlatformerSettings;
pub use loader::{ContentLoadError, load_platformer_settings, parse_single};
pub use validation::{ConfigError, validate_motion_config, validate_settings};

use avian2d::prelude::*;
use bevy::prelude::*;
use std::path::Path;

use crate::core::GameState;

/// Directory holding the RON settings files.
pub const DATA_PATH: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_settings);
    }
}

/// Load and validate settings, then start the run. Any failure stops the app.
fn load_settings(
    mut commands: Commands,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    let settings = match load_platformer_settings(Path::new(DATA_PATH)) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            exit.write(AppExit::error());
            return;
        }
    };

    let errors = validate_settings(&settings);
    if !errors.is_empty() {
        for e in &errors {
            error!("Invalid settings: {}", e);
        }
        exit.write(AppExit::error());
        return;
    }

    info!(
        "Loaded platformer settings v{}: gravity={}, pixels_per_unit={}, jump_height={:.2}, dash_distance={:.2}",
        settings.schema_version,
        settings.gravity,
        settings.pixels_per_unit,
        settings.motion.jump_height(settings.gravity),
        settings.motion.dash_distance()
    );

    commands.insert_resource(Gravity(Vec2::NEG_Y * settings.gravity));
    commands.insert_resource(settings.motion.clone());
    commands.insert_resource(settings);
    next_state.set(GameState::Run);
}
