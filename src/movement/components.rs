//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::content::ConfigError;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Anchor entity whose position is the center of the ground overlap test.
#[derive(Component, Debug)]
pub struct GroundCheck;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// +1.0 when facing right, -1.0 when facing left.
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Which branch of the controller owns the body this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPhase {
    #[default]
    Locomotion,
    Dashing,
}

/// Per-character controller state, mutated only by the motion tick.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct MotionState {
    pub facing: Facing,
    pub is_dashing: bool,
    /// Engine clock (seconds) at which the current dash ends.
    pub dash_end_time: f32,
    pub air_dashes_remaining: u8,
    /// Ground result of the most recent tick, kept for landing detection.
    pub grounded: bool,
}

impl MotionState {
    pub fn new(max_air_dashes: u8) -> Self {
        Self {
            facing: Facing::Right,
            is_dashing: false,
            dash_end_time: 0.0,
            air_dashes_remaining: max_air_dashes,
            grounded: false,
        }
    }

    pub fn phase(&self) -> MotionPhase {
        if self.is_dashing {
            MotionPhase::Dashing
        } else {
            MotionPhase::Locomotion
        }
    }
}

/// Required references for a controlled character, checked once at spawn.
#[derive(Component, Debug, Clone, Copy)]
pub struct MotionRig {
    pub ground_check: Entity,
}

impl MotionRig {
    /// Build the rig for `owner`, failing if the physics body or the
    /// ground-check anchor is absent.
    pub fn new(
        owner: Entity,
        ground_check: Option<Entity>,
        has_body: bool,
    ) -> Result<Self, ConfigError> {
        if !has_body {
            return Err(ConfigError::MissingBody { entity: owner });
        }
        let ground_check = ground_check.ok_or(ConfigError::MissingGroundCheck { entity: owner })?;
        Ok(Self { ground_check })
    }
}
