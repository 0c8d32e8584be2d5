//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod motion;

pub(crate) use collisions::bind_motion_rigs;
pub(crate) use input::read_input;
pub(crate) use motion::apply_motion;
