//! Transient character cues — tool-swing and harvest flashes.

use bevy::prelude::*;
use crate::shared::*;

const BASE_TINT: [f32; 3] = [0.2, 0.5, 0.8];
const SWING_TINT: [f32; 3] = [0.85, 0.85, 0.95];
const HARVEST_TINT: [f32; 3] = [1.0, 0.85, 0.2];

/// Clear every cue whose window has elapsed.
pub fn expire_action_cues(
    time: Res<Time>,
    windows: Res<CueWindows>,
    mut query: Query<&mut ActionCues, With<Player>>,
) {
    let now = time.elapsed_secs_f64();
    for mut cues in query.iter_mut() {
        // Only write when something expires so change detection stays quiet.
        let mut next = *cues;
        next.expire(now, &windows);
        if next != *cues {
            *cues = next;
        }
    }
}

/// Harvest flash beats swing flash; both fade out over their window.
pub fn tint_player_sprite(
    time: Res<Time>,
    windows: Res<CueWindows>,
    mut query: Query<(&ActionCues, &mut Sprite), With<Player>>,
) {
    let now = time.elapsed_secs_f64();
    for (cues, mut sprite) in query.iter_mut() {
        let flash = cues
            .harvested
            .progress(now, windows.harvest)
            .map(|t| (HARVEST_TINT, t))
            .or_else(|| cues.tool_swung.progress(now, windows.swing).map(|t| (SWING_TINT, t)));

        sprite.color = match flash {
            Some((tint, t)) => fade(tint, t),
            None => fade(BASE_TINT, 0.0),
        };
    }
}

/// Blend `tint` towards the base colour; `t = 1` is fully faded.
fn fade(tint: [f32; 3], t: f32) -> Color {
    let channel = |i: usize| tint[i] + (BASE_TINT[i] - tint[i]) * t;
    Color::srgb(channel(0), channel(1), channel(2))
}
