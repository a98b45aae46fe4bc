use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use sproutfield::farming::cells::CellStore;
use sproutfield::shared::*;
use sproutfield::{data, farming, input, player, session, ui};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Sproutfield".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources (overwritten by DataPlugin during Loading)
        .init_resource::<Inventory>()
        .init_resource::<PlayerInput>()
        .init_resource::<KeyBindings>()
        .init_resource::<InputContext>()
        .init_resource::<DebugOverlayState>()
        .init_resource::<GridSpec>()
        .init_resource::<CellStore>()
        .init_resource::<CueWindows>()
        .init_resource::<PlayerSettings>()
        // Domain plugins
        .add_plugins(data::DataPlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(session::SessionPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(farming::FarmingPlugin)
        .add_plugins(ui::UiPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

/// Cells are already authored at display scale, so the camera stays at 1:1.
fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Transform::default()));
}
