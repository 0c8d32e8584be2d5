//! Debug domain: hotkeys, gizmos and the motion overlay.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::debug::state::DebugState;
use crate::debug::ui::{DebugInfoOverlay, spawn_debug_info_overlay};
use crate::movement::{GroundCheck, MotionConfig, MotionState, Player};
use crate::sprites::AnimationController;

/// F1 toggles the info overlay, F2 the ground-check gizmo
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
) {
    if keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote) {
        debug_state.show_info = !debug_state.show_info;
        info!("Debug info overlay: {}", debug_state.show_info);
    }

    if keyboard.just_pressed(KeyCode::F2) {
        debug_state.show_ground_check = !debug_state.show_ground_check;
        info!("Ground check gizmo: {}", debug_state.show_ground_check);
    }
}

/// Draw the ground overlap circle, green while it touches ground
pub(crate) fn draw_ground_check(
    mut gizmos: Gizmos,
    debug_state: Res<DebugState>,
    config: Res<MotionConfig>,
    anchors: Query<(&GlobalTransform, &ChildOf), With<GroundCheck>>,
    players: Query<&MotionState, With<Player>>,
) {
    if !debug_state.show_ground_check {
        return;
    }

    for (transform, child_of) in &anchors {
        let grounded = players
            .get(child_of.parent())
            .is_ok_and(|state| state.grounded);
        let color = if grounded {
            Color::srgb(0.3, 1.0, 0.4)
        } else {
            Color::srgb(1.0, 0.8, 0.2)
        };
        gizmos.circle_2d(
            transform.translation().truncate(),
            config.ground_radius,
            color,
        );
    }
}

pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    config: Res<MotionConfig>,
    player_query: Query<
        (&Transform, &MotionState, &LinearVelocity, &AnimationController),
        With<Player>,
    >,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        // Cleanup overlay if it exists
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    // Ensure overlay exists
    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some((transform, state, velocity, animation)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        let pos = transform.translation;
        **text = format!(
            "Pos: ({:.2}, {:.2})\nVel: ({:.2}, {:.2})\nGrounded: {}\nPhase: {:?}\nFacing: {:?}\nAir dashes: {}/{}\nClip: {} [{}]",
            pos.x,
            pos.y,
            velocity.x,
            velocity.y,
            state.grounded,
            state.phase(),
            state.facing,
            state.air_dashes_remaining,
            config.max_air_dashes,
            animation.state.clip_name(),
            animation.current_frame + 1
        );
    }
}
