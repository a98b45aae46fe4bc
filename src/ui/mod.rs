mod debug_overlay;
mod pause_overlay;

use bevy::prelude::*;
use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // ─── DEBUG OVERLAY — always present, toggled by DebugOverlayState ───
        app.add_systems(Startup, debug_overlay::spawn_debug_overlay);
        app.add_systems(PostUpdate, debug_overlay::update_debug_overlay);

        // ─── PAUSE OVERLAY ───
        app.add_systems(OnEnter(GameState::Paused), pause_overlay::spawn_pause_overlay);
        app.add_systems(OnExit(GameState::Paused), pause_overlay::despawn_pause_overlay);
    }
}
