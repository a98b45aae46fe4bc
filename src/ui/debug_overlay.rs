use bevy::prelude::*;
use crate::shared::*;
use crate::farming::cells::CellStore;
use crate::farming::LastToolUse;
use crate::player::facing::{facing_cell, standing_coord};

/// Marker for the debug overlay root node.
#[derive(Component)]
pub struct DebugOverlayRoot;

/// Marker for the debug text.
#[derive(Component)]
pub struct DebugOverlayText;

/// Spawn the debug overlay UI (runs once at startup).
pub fn spawn_debug_overlay(mut commands: Commands) {
    commands.spawn((
        DebugOverlayRoot,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(8.0),
            top: Val::Px(8.0),
            padding: UiRect::all(Val::Px(4.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        Visibility::Hidden,
    )).with_children(|parent| {
        parent.spawn((
            DebugOverlayText,
            Text::new("Debug"),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(Color::srgb(0.0, 1.0, 0.0)),
        ));
    });
}

/// Update debug overlay content and visibility.
pub fn update_debug_overlay(
    debug_state: Res<DebugOverlayState>,
    time: Res<Time>,
    state: Res<State<GameState>>,
    store: Res<CellStore>,
    inventory: Res<Inventory>,
    last_use: Res<LastToolUse>,
    mut overlay_query: Query<&mut Visibility, With<DebugOverlayRoot>>,
    mut text_query: Query<&mut Text, With<DebugOverlayText>>,
    player_query: Query<(&CharacterBody, &PlayerMovement), With<Player>>,
) {
    let Ok(mut vis) = overlay_query.get_single_mut() else { return };

    if !debug_state.visible {
        *vis = Visibility::Hidden;
        return;
    }
    *vis = Visibility::Inherited;

    let Ok(mut text) = text_query.get_single_mut() else { return };

    let now = time.elapsed_secs_f64();
    let mut lines = Vec::new();

    if let Ok((body, movement)) = player_query.get_single() {
        let grid = store.grid();
        let standing = standing_coord(grid, body);
        let target = facing_cell(grid, body, movement.facing);

        lines.push(format!("Pos: ({:.1}, {:.1})", body.pos.x, body.pos.y));
        lines.push(format!(
            "Cell: ({}, {}) #{}",
            standing.col,
            standing.row,
            grid.cell_id(standing).map_or("-".to_string(), |id| id.0.to_string())
        ));
        lines.push(format!("Facing: {:?}", movement.facing));

        match target {
            Some(cell) => {
                lines.push(format!("Target: #{}", cell.0));
                lines.push(describe_cell(&store, cell, now));
            }
            None => lines.push("Target: off-map".to_string()),
        }
    }

    let slots: Vec<String> = inventory
        .slots
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let marker = if i == inventory.selected_slot { ">" } else { " " };
            format!("{}{}:{}", marker, i + 1, item.as_deref().unwrap_or("-"))
        })
        .collect();
    lines.push(format!("Slots: {}", slots.join(" ")));

    if let Some(last) = &last_use.0 {
        lines.push(format!("Last: {:?}", last.outcome));
    }

    lines.push(format!("Time: {:.2}s", now));
    if *state.get() == GameState::Paused {
        lines.push("PAUSED".to_string());
    }

    **text = lines.join("\n");
}

fn describe_cell(store: &CellStore, cell: CellId, now: f64) -> String {
    if !store.is_farmable(cell) {
        return "  not farmable".to_string();
    }
    let Some(state) = store.get(cell) else {
        return "  -".to_string();
    };
    let wet = if state.is_wet() { "wet" } else { "dry" };
    match store.growth_stage(cell, now) {
        Some(stage) => format!("  {} stage {}/{}", wet, stage, store.schedule().max_stage()),
        None => format!("  {} fallow", wet),
    }
}
