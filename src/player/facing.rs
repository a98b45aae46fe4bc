//! Facing resolution — which cell the character stands on, which way it
//! looks, and which cell a tool would hit.

use crate::shared::*;

/// Pick a cardinal facing from held directions.
///
/// Precedence: Up, then Down (also chosen when Left and Right are held
/// together), then Left, then Right. `None` when no direction is held, so
/// the caller keeps the previous facing.
pub fn resolve_facing(input: &PlayerInput) -> Option<Facing> {
    if input.up {
        Some(Facing::Up)
    } else if input.down || (input.left && input.right) {
        Some(Facing::Down)
    } else if input.left {
        Some(Facing::Left)
    } else if input.right {
        Some(Facing::Right)
    } else {
        None
    }
}

/// Grid coordinate under the character's feet.
pub fn standing_coord(grid: &GridSpec, body: &CharacterBody) -> GridCoord {
    grid.coord_at(body.anchor())
}

/// The coordinate one step from the standing cell. May be off the map.
pub fn facing_coord(grid: &GridSpec, body: &CharacterBody, facing: Facing) -> GridCoord {
    let (dcol, drow) = facing.offset();
    standing_coord(grid, body).offset(dcol, drow)
}

/// The faced cell, or `None` when it falls outside the grid.
pub fn facing_cell(grid: &GridSpec, body: &CharacterBody, facing: Facing) -> Option<CellId> {
    grid.cell_id(facing_coord(grid, body, facing))
}
