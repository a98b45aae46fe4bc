//! Session control: Playing ⇄ Paused and the debug overlay toggle.
//!
//! Pausing stops the virtual clock, which is what every timestamp in the
//! farming domain is read from, so crops and cues freeze with it.

use bevy::prelude::*;
use crate::shared::*;

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (toggle_pause, toggle_debug))
            .add_systems(OnEnter(GameState::Paused), freeze_virtual_time)
            .add_systems(OnExit(GameState::Paused), resume_virtual_time);
    }
}

pub fn toggle_pause(
    input: Res<PlayerInput>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !input.pause {
        return;
    }
    match state.get() {
        GameState::Playing => next_state.set(GameState::Paused),
        GameState::Paused => next_state.set(GameState::Playing),
        GameState::Loading => {}
    }
}

pub fn toggle_debug(input: Res<PlayerInput>, mut overlay: ResMut<DebugOverlayState>) {
    if input.debug {
        overlay.visible = !overlay.visible;
        debug!("[Session] Debug overlay {}", if overlay.visible { "on" } else { "off" });
    }
}

fn freeze_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
    info!("[Session] Paused at {:.2}s", time.elapsed_secs_f64());
}

fn resume_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
    info!("[Session] Resumed at {:.2}s", time.elapsed_secs_f64());
}
