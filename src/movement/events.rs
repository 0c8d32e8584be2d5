//! Movement domain: messages for locomotion transitions.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Fired on the tick a character's ground check starts overlapping ground
#[derive(Debug)]
pub struct LandedEvent {
    pub entity: Entity,
}

impl Message for LandedEvent {}

/// Fired when a dash is admitted
#[derive(Debug)]
pub struct DashStartedEvent {
    pub entity: Entity,
    /// True when the dash consumed an air charge
    pub airborne: bool,
}

impl Message for DashStartedEvent {}

/// Fired when a dash deadline passes
#[derive(Debug)]
pub struct DashEndedEvent {
    pub entity: Entity,
}

impl Message for DashEndedEvent {}

/// Fired when a grounded jump is applied
#[derive(Debug)]
pub struct JumpedEvent {
    pub entity: Entity,
}

impl Message for JumpedEvent {}
