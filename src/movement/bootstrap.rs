//! Movement domain: player bootstrap from the loaded motion config.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, GroundCheck, MotionConfig, MotionState, Player};
use crate::sprites::{AnimationController, AnimatorParams};

/// Player collider size in world units.
const PLAYER_SIZE: Vec2 = Vec2::new(0.75, 1.5);

/// Spawn the player with its ground-check anchor at the feet.
/// The motion rig is bound afterwards by `bind_motion_rigs`.
pub(crate) fn spawn_player(
    mut commands: Commands,
    config: Res<MotionConfig>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let ground_check = commands
        .spawn((
            GroundCheck,
            Transform::from_xyz(0.0, -PLAYER_SIZE.y / 2.0, 0.0),
        ))
        .id();

    let player = commands
        .spawn((
            // Identity & Movement
            (
                Player,
                MotionState::new(config.max_air_dashes),
                AnimatorParams::default(),
                AnimationController::default(),
            ),
            // Rendering
            Sprite {
                color: Color::srgb(0.9, 0.9, 0.9),
                custom_size: Some(PLAYER_SIZE),
                ..default()
            },
            Transform::from_xyz(0.0, 2.0, 0.0),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                Friction::new(0.0),
                CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
            ),
        ))
        .add_child(ground_check)
        .id();

    info!(
        "Spawning player {:?}: walk={}, dash={}x{}s, jump={}, air_dashes={}",
        player,
        config.walk_speed,
        config.dash_speed,
        config.dash_duration,
        config.jump_force,
        config.max_air_dashes
    );
}
