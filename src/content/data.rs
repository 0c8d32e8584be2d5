//! Data definitions for RON settings files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::MotionConfig;

// ============================================================================
// Platformer settings (platformer.ron) - Single struct, not a list
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Resource)]
pub struct PlatformerSettings {
    pub schema_version: u32,
    /// Downward acceleration in world units per second squared.
    pub gravity: f32,
    /// Screen pixels per world unit, used for the camera projection.
    pub pixels_per_unit: f32,
    pub motion: MotionConfig,
}

impl Default for PlatformerSettings {
    fn default() -> Self {
        Self {
            schema_version: 1,
            gravity: 9.81,
            pixels_per_unit: 32.0,
            motion: MotionConfig::default(),
        }
    }
}
