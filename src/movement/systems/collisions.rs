//! Movement domain: avian2d body adapter, ground overlap and rig binding.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GroundCheck, MotionBody, MotionRig, Player};

/// A character body as seen by the motion tick: avian velocity, the visual
/// transform and a ground probe centered on the rig's anchor.
pub(crate) struct AvianBody<'a, 'w, 's> {
    pub owner: Entity,
    pub velocity: &'a mut LinearVelocity,
    pub transform: &'a mut Transform,
    pub spatial_query: &'a SpatialQuery<'w, 's>,
    pub probe_origin: Vec2,
}

impl MotionBody for AvianBody<'_, '_, '_> {
    fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity.0 = velocity;
    }

    fn overlaps_ground(&self, radius: f32, layers: LayerMask) -> bool {
        // Never count the character's own collider as ground
        let filter = SpatialQueryFilter::from_mask(layers).with_excluded_entities([self.owner]);
        let hits = self.spatial_query.shape_intersections(
            &Collider::circle(radius),
            self.probe_origin,
            0.0,
            &filter,
        );
        !hits.is_empty()
    }

    fn flip_horizontal(&mut self) {
        self.transform.scale.x *= -1.0;
    }
}

/// Resolve the required references of newly spawned players exactly once.
/// A player without a body or a ground-check anchor stops the app.
pub(crate) fn bind_motion_rigs(
    mut commands: Commands,
    unbound: Query<
        (Entity, Option<&Children>, Has<RigidBody>, Has<LinearVelocity>),
        (With<Player>, Without<MotionRig>),
    >,
    anchors: Query<(), With<GroundCheck>>,
    mut exit: MessageWriter<AppExit>,
) {
    for (entity, children, has_rigid_body, has_velocity) in &unbound {
        let ground_check = children.and_then(|children| {
            let children: &[Entity] = children;
            children.iter().copied().find(|child| anchors.contains(*child))
        });

        match MotionRig::new(entity, ground_check, has_rigid_body && has_velocity) {
            Ok(rig) => {
                debug!(
                    "Bound motion rig: entity={:?}, ground_check={:?}",
                    entity, rig.ground_check
                );
                commands.entity(entity).insert(rig);
            }
            Err(e) => {
                error!("Invalid player rig: {}", e);
                // Keep the entity out of the unbound set while the app shuts down
                commands.entity(entity).remove::<Player>();
                exit.write(AppExit::error());
            }
        }
    }
}
