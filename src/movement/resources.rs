//! Movement domain: tuning and input resources.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::GameLayer;

/// Author-set motion tuning. Read-only once the run starts.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    pub walk_speed: f32,
    pub dash_speed: f32,
    /// Seconds a dash lasts once started.
    pub dash_duration: f32,
    /// Vertical velocity set on jump.
    pub jump_force: f32,
    /// Dashes available per airborne period (ground dashes are free).
    pub max_air_dashes: u8,
    pub ground_radius: f32,
    /// Layers that count as walkable ground for the overlap test.
    pub ground_layers: Vec<GameLayer>,
    /// Vertical speed below which an airborne character counts as falling.
    pub falling_threshold: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            dash_speed: 12.0,
            dash_duration: 0.2,
            jump_force: 10.0,
            max_air_dashes: 1,
            ground_radius: 0.2,
            ground_layers: vec![GameLayer::Ground],
            falling_threshold: -0.1,
        }
    }
}

impl MotionConfig {
    /// Combined mask of all configured ground layers.
    pub fn ground_mask(&self) -> LayerMask {
        LayerMask(
            self.ground_layers
                .iter()
                .fold(0, |bits, layer| bits | layer.to_bits()),
        )
    }

    /// Peak height of a standing jump under the given gravity: h = v² / (2g)
    pub fn jump_height(&self, gravity: f32) -> f32 {
        self.jump_force * self.jump_force / (2.0 * gravity)
    }

    /// Horizontal distance covered by one uninterrupted dash.
    pub fn dash_distance(&self) -> f32 {
        self.dash_speed * self.dash_duration
    }
}

/// Input sampled once per frame, before the motion tick.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct MovementInput {
    /// Raw horizontal axis in [-1, 1].
    pub horizontal: f32,
    pub jump_just_pressed: bool,
    pub dash_just_pressed: bool,
}
