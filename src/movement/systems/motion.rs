//! Movement domain: drives the motion tick for every bound player.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::systems::collisions::AvianBody;
use crate::movement::{
    DashEndedEvent, DashStartedEvent, GroundCheck, JumpedEvent, LandedEvent, MotionConfig,
    MotionRig, MotionState, MovementInput, Player, tick,
};
use crate::sprites::AnimatorParams;

pub(crate) fn apply_motion(
    time: Res<Time>,
    input: Res<MovementInput>,
    config: Res<MotionConfig>,
    spatial_query: SpatialQuery,
    anchors: Query<&GlobalTransform, With<GroundCheck>>,
    mut players: Query<
        (
            Entity,
            &MotionRig,
            &mut MotionState,
            &mut LinearVelocity,
            &mut Transform,
            &mut AnimatorParams,
        ),
        With<Player>,
    >,
    mut landed_events: MessageWriter<LandedEvent>,
    mut dash_started_events: MessageWriter<DashStartedEvent>,
    mut dash_ended_events: MessageWriter<DashEndedEvent>,
    mut jumped_events: MessageWriter<JumpedEvent>,
) {
    let now = time.elapsed_secs();

    for (entity, rig, mut state, mut velocity, mut transform, mut params) in &mut players {
        let Ok(anchor) = anchors.get(rig.ground_check) else {
            warn_once!("Ground check {:?} of {:?} is gone", rig.ground_check, entity);
            continue;
        };

        let mut body = AvianBody {
            owner: entity,
            velocity: &mut *velocity,
            transform: &mut *transform,
            spatial_query: &spatial_query,
            probe_origin: anchor.translation().truncate(),
        };

        let report = tick(&mut *state, &config, &input, now, &mut body, &mut *params);

        if report.landed {
            landed_events.write(LandedEvent { entity });
            debug!(
                "Landed: entity={:?}, air_dashes_remaining={}",
                entity, state.air_dashes_remaining
            );
        } else if report.left_ground {
            debug!(
                "Left ground: entity={:?}, air_dashes_remaining={}",
                entity, state.air_dashes_remaining
            );
        }

        if report.dash_started {
            let airborne = !state.grounded;
            dash_started_events.write(DashStartedEvent { entity, airborne });
            debug!(
                "Dash started: facing={:?}, airborne={}, air_dashes_remaining={}",
                state.facing, airborne, state.air_dashes_remaining
            );
        }

        if report.dash_ended {
            dash_ended_events.write(DashEndedEvent { entity });
            debug!("Dash ended: entity={:?}", entity);
        }

        if report.jumped {
            jumped_events.write(JumpedEvent { entity });
            debug!("Jump: entity={:?}, vy={}", entity, velocity.y);
        }

        if report.flipped {
            debug!("Flipped: entity={:?}, facing={:?}", entity, state.facing);
        }
    }
}
