use bevy::prelude::*;
use crate::grid::map_to_world;
use crate::shared::*;

/// Spawn the player entity with all necessary components.
/// Runs on `OnEnter(GameState::Playing)`.
pub fn spawn_player(
    mut commands: Commands,
    settings: Res<PlayerSettings>,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: don't double-spawn if returning to Playing state.
    if !existing.is_empty() {
        return;
    }

    let body = CharacterBody::new(settings.spawn, settings.size);

    commands.spawn((
        // Tag
        Player,
        // Movement state
        PlayerMovement {
            speed: settings.speed,
            run_multiplier: settings.run_multiplier,
            ..default()
        },
        body,
        ActionCues::default(),
        // Placeholder sprite — a blue square
        Sprite {
            color: Color::srgb(0.2, 0.5, 0.8),
            custom_size: Some(settings.size),
            ..default()
        },
        // Z = 10 so the player draws above the cells.
        Transform::from_translation(map_to_world(body.center(), Z_PLAYER)),
        Visibility::default(),
    ));
}
