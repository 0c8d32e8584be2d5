//! Movement domain: the practice level the player spawns into.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, Ground, Wall};

/// Static blocks of the practice level: (size, position, is_wall).
const LEVEL_BLOCKS: [(Vec2, Vec2, bool); 6] = [
    // Floor
    (Vec2::new(25.0, 1.25), Vec2::new(0.0, -6.25), false),
    // Side walls
    (Vec2::new(1.25, 15.6), Vec2::new(-13.1, 1.5), true),
    (Vec2::new(1.25, 15.6), Vec2::new(13.1, 1.5), true),
    // Platforms, rising left to right then center
    (Vec2::new(4.7, 0.6), Vec2::new(-7.8, -1.6), false),
    (Vec2::new(4.7, 0.6), Vec2::new(7.8, 1.6), false),
    (Vec2::new(3.75, 0.6), Vec2::new(0.0, 4.7), false),
];

pub(crate) fn spawn_level(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    for (size, position, is_wall) in LEVEL_BLOCKS {
        let mut block = commands.spawn((
            Sprite {
                color: if is_wall { wall_color } else { ground_color },
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        ));

        if is_wall {
            block.insert((Wall, wall_layers));
        } else {
            block.insert((Ground, ground_layers));
        }
    }

    info!("Spawned practice level with {} blocks", LEVEL_BLOCKS.len());
}
