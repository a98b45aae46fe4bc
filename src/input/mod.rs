use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PreUpdate,
            (manage_input_context, reset_and_read_input).chain(),
        );
    }
}

/// The single point where hardware input becomes game actions.
///
/// Held directions are level-triggered; everything else is an edge
/// (`just_pressed`) so holding a key never repeats the action.
pub fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    match *context {
        InputContext::Disabled => {}

        InputContext::Gameplay => {
            input.up = keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp);
            input.down = keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown);
            input.left = keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft);
            input.right = keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight);
            input.run = keys.pressed(bindings.run) || keys.pressed(KeyCode::ShiftRight);

            input.tool_use = keys.just_pressed(bindings.tool_use);
            input.tool_slot = bindings
                .slots
                .iter()
                .position(|key| keys.just_pressed(*key))
                .map(|i| i as u8);

            input.pause = keys.just_pressed(bindings.pause);
            input.debug = keys.just_pressed(bindings.debug);
        }

        InputContext::Menu => {
            input.pause = keys.just_pressed(bindings.pause);
            input.debug = keys.just_pressed(bindings.debug);
        }
    }
}

/// Derives InputContext from GameState. ONE system, replaces all per-domain guards.
pub fn manage_input_context(
    game_state: Res<State<GameState>>,
    mut context: ResMut<InputContext>,
) {
    *context = match *game_state.get() {
        GameState::Loading => InputContext::Disabled,
        GameState::Playing => InputContext::Gameplay,
        GameState::Paused => InputContext::Menu,
    };
}
