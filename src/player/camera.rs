use bevy::prelude::*;
use crate::grid::map_to_world;
use crate::shared::*;

/// Smoothly follow the player with the camera using a lerp, clamped to map
/// bounds. Snaps when the camera is far from the target (first frame).
pub fn camera_follow_player(
    time: Res<Time>,
    grid: Res<GridSpec>,
    player_query: Query<&CharacterBody, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<(&mut Transform, &OrthographicProjection), (With<Camera2d>, Without<Player>)>,
) {
    let Ok(body) = player_query.get_single() else {
        return;
    };
    let Ok((mut cam_tf, projection)) = camera_query.get_single_mut() else {
        return;
    };

    let target = map_to_world(body.center(), 0.0);

    let dx = (target.x - cam_tf.translation.x).abs();
    let dy = (target.y - cam_tf.translation.y).abs();
    let should_snap = dx > grid.cell_size * 4.0 || dy > grid.cell_size * 4.0;

    let (smooth_x, smooth_y) = if should_snap {
        (target.x, target.y)
    } else {
        let lerp_speed = 5.0;
        let t = (lerp_speed * time.delta_secs()).min(1.0);
        (
            cam_tf.translation.x + (target.x - cam_tf.translation.x) * t,
            cam_tf.translation.y + (target.y - cam_tf.translation.y) * t,
        )
    };

    // Map spans x in [0, W] and, in world space, y in [-H, 0].
    let extent = grid.extent();
    let half_vw = projection.area.width() / 2.0 * cam_tf.scale.x;
    let half_vh = projection.area.height() / 2.0 * cam_tf.scale.y;

    let min_x = half_vw;
    let max_x = (extent.x - half_vw).max(min_x);
    let max_y = -half_vh;
    let min_y = (-extent.y + half_vh).min(max_y);

    cam_tf.translation.x = smooth_x.round().clamp(min_x, max_x);
    cam_tf.translation.y = smooth_y.round().clamp(min_y, max_y);
}
