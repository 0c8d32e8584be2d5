//! Core domain: camera setup and follow.

use bevy::prelude::*;

use crate::content::PlatformerSettings;
use crate::movement::Player;

/// Marker for the gameplay camera
#[derive(Component, Debug)]
pub struct MainCamera;

/// Spawn a 2D camera scaled so one world unit spans `pixels_per_unit` pixels.
pub(crate) fn setup_camera(mut commands: Commands, settings: Res<PlatformerSettings>) {
    commands.spawn((
        MainCamera,
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / settings.pixels_per_unit,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

/// Keep the camera horizontally centered on the player.
pub(crate) fn follow_player(
    player_query: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let (Some(player), Ok(mut camera)) = (player_query.iter().next(), camera_query.single_mut())
    else {
        return;
    };
    camera.translation.x = player.translation.x;
}
