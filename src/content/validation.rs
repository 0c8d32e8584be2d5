//! Validation for settings values and required character references.

use bevy::prelude::Entity;

use super::data::PlatformerSettings;
use crate::movement::MotionConfig;

/// A configuration problem found before the first tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite { field: &'static str },
    NotPositive { field: &'static str, value: f32 },
    EmptyGroundLayers,
    MissingGroundCheck { entity: Entity },
    MissingBody { entity: Entity },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonFinite { field } => write!(f, "'{}' must be a finite number", field),
            ConfigError::NotPositive { field, value } => {
                write!(f, "'{}' must be greater than zero, got {}", field, value)
            }
            ConfigError::EmptyGroundLayers => {
                write!(f, "'ground_layers' is empty; the character could never be grounded")
            }
            ConfigError::MissingGroundCheck { entity } => {
                write!(f, "character {:?} has no ground-check anchor", entity)
            }
            ConfigError::MissingBody { entity } => {
                write!(f, "character {:?} has no dynamic physics body", entity)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Helper macro for checking a value is finite and strictly positive
macro_rules! check_positive {
    ($errors:expr, $config:expr, $field:ident) => {
        let value = $config.$field;
        if !value.is_finite() {
            $errors.push(ConfigError::NonFinite {
                field: stringify!($field),
            });
        } else if value <= 0.0 {
            $errors.push(ConfigError::NotPositive {
                field: stringify!($field),
                value,
            });
        }
    };
}

/// Validate motion tuning.
/// Returns a list of errors, empty if the tuning is usable.
pub fn validate_motion_config(config: &MotionConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    check_positive!(errors, config, walk_speed);
    check_positive!(errors, config, dash_speed);
    check_positive!(errors, config, dash_duration);
    check_positive!(errors, config, jump_force);
    check_positive!(errors, config, ground_radius);

    // Any finite threshold is meaningful, including positive ones
    if !config.falling_threshold.is_finite() {
        errors.push(ConfigError::NonFinite {
            field: "falling_threshold",
        });
    }

    if config.ground_layers.is_empty() {
        errors.push(ConfigError::EmptyGroundLayers);
    }

    errors
}

/// Validate the whole settings file, motion tuning included.
pub fn validate_settings(settings: &PlatformerSettings) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    check_positive!(errors, settings, gravity);
    check_positive!(errors, settings, pixels_per_unit);
    errors.extend(validate_motion_config(&settings.motion));

    errors
}
