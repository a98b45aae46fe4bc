use bevy::prelude::*;
use crate::grid::map_to_world;
use crate::shared::*;
use super::facing::resolve_facing;

/// Core movement system — reads held directions, updates facing, and
/// integrates the body position, kept inside the map.
///
/// Movement is continuous; the grid is only consulted for the clamp and,
/// elsewhere, for the standing/facing cells.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    grid: Res<GridSpec>,
    mut query: Query<(&mut CharacterBody, &mut PlayerMovement), With<Player>>,
) {
    let Ok((mut body, mut movement)) = query.get_single_mut() else {
        return;
    };

    if let Some(facing) = resolve_facing(&input) {
        movement.facing = facing;
    }

    let dir = direction_vector(&input);
    movement.is_moving = dir != Vec2::ZERO;
    if !movement.is_moving {
        return;
    }

    let speed = if input.run {
        movement.speed * movement.run_multiplier
    } else {
        movement.speed
    };
    step_body(&mut body, dir, speed, time.delta_secs(), &grid);
}

/// Unit direction from held keys in map space (y down). Opposing keys cancel.
pub fn direction_vector(input: &PlayerInput) -> Vec2 {
    let mut dir = Vec2::ZERO;
    if input.up {
        dir.y -= 1.0;
    }
    if input.down {
        dir.y += 1.0;
    }
    if input.left {
        dir.x -= 1.0;
    }
    if input.right {
        dir.x += 1.0;
    }
    dir.normalize_or_zero()
}

/// Advance the body and clamp it so its anchor stays on the map.
pub fn step_body(body: &mut CharacterBody, dir: Vec2, speed: f32, dt: f32, grid: &GridSpec) {
    let candidate = body.pos + dir * speed * dt;
    let offset = body.anchor_offset();
    body.pos = grid.clamp_point(candidate + offset) - offset;
}

/// Mirror the map-space body onto the sprite transform.
pub fn sync_player_transform(
    mut query: Query<(&CharacterBody, &mut Transform), (With<Player>, Changed<CharacterBody>)>,
) {
    for (body, mut transform) in query.iter_mut() {
        transform.translation = map_to_world(body.center(), Z_PLAYER);
    }
}
