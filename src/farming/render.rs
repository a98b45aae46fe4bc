//! Visual synchronisation — keep placeholder cell sprites in sync with the
//! cell store. One sprite per farmable cell, spawned once.

use bevy::prelude::*;
use crate::grid::map_to_world;
use crate::shared::*;
use super::cells::{CellState, CellStore};

/// Marker for a farmable cell's sprite.
#[derive(Component, Debug, Clone, Copy)]
pub struct CellSprite {
    pub cell: CellId,
}

pub fn spawn_cell_sprites(
    mut commands: Commands,
    store: Res<CellStore>,
    existing: Query<(), With<CellSprite>>,
) {
    // Guard: don't double-spawn when returning from Paused.
    if !existing.is_empty() {
        return;
    }

    let grid = *store.grid();
    for cell in store.zones().cells() {
        commands.spawn((
            CellSprite { cell },
            Sprite {
                color: fallow_color(false),
                custom_size: Some(Vec2::splat(grid.cell_size - 2.0)),
                ..default()
            },
            Transform::from_translation(map_to_world(grid.cell_center(cell), Z_CELL)),
        ));
    }
}

pub fn sync_cell_sprites(
    time: Res<Time>,
    store: Res<CellStore>,
    mut sprites: Query<(&CellSprite, &mut Sprite)>,
) {
    let now = time.elapsed_secs_f64();
    let max_stage = store.schedule().max_stage();
    for (tile, mut sprite) in sprites.iter_mut() {
        let Some(state) = store.get(tile.cell) else {
            continue;
        };
        let stage = store.growth_stage(tile.cell, now);
        sprite.color = cell_color(state, stage, max_stage);
    }
}

/// Placeholder colour for a cell: bare soil, darker when wet, then a
/// pale-to-vivid green as the crop grows.
pub fn cell_color(state: &CellState, stage: Option<u8>, max_stage: u8) -> Color {
    let Some(stage) = stage else {
        return fallow_color(state.is_wet());
    };
    let progress = stage as f32 / max_stage.max(1) as f32;
    if progress >= 1.0 {
        return Color::srgb(0.90, 0.65, 0.15); // ripe
    }
    Color::srgb(
        0.55 - 0.35 * progress,
        0.60 + 0.20 * progress,
        0.20,
    )
}

fn fallow_color(wet: bool) -> Color {
    if wet {
        Color::srgb(0.30, 0.22, 0.15)
    } else {
        Color::srgb(0.45, 0.32, 0.20)
    }
}
