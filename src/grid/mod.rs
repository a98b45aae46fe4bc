//! Grid coordinate mapping between continuous map space and discrete cells.
//!
//! Map space has its origin at the top-left corner of the map, x growing to
//! the right and y growing downward (rows count down the screen). Bevy world
//! space is y-up; the only conversion between the two is [`map_to_world`].

use bevy::prelude::*;

use crate::shared::{GRID_COLS, GRID_ROWS, PIXEL_SCALE, TILE_SIZE};

/// Flat cell id: `col + row * cols`. Always in `[0, cols * rows)` when
/// produced by [`GridSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub usize);

/// Signed grid coordinate. May lie outside the grid (e.g. the cell a
/// character faces while standing on the map edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub col: i32,
    pub row: i32,
}

impl GridCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }
}

/// Immutable map-wide grid constants.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
    /// Cell edge length in world units (base tile size × visual scale).
    pub cell_size: f32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            cols: GRID_COLS,
            rows: GRID_ROWS,
            cell_size: TILE_SIZE * PIXEL_SCALE,
        }
    }
}

impl GridSpec {
    pub const fn new(cols: u32, rows: u32, cell_size: f32) -> Self {
        Self { cols, rows, cell_size }
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// World extent in world units: `(cols·E, rows·E)`.
    pub fn extent(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 * self.cell_size,
            self.rows as f32 * self.cell_size,
        )
    }

    /// Containing grid coordinate of a map-space point. Not bounds-checked.
    pub fn coord_at(&self, point: Vec2) -> GridCoord {
        GridCoord {
            col: (point.x / self.cell_size).floor() as i32,
            row: (point.y / self.cell_size).floor() as i32,
        }
    }

    /// Cell containing `point`, or `None` when the point is off the map.
    pub fn cell_index_at(&self, point: Vec2) -> Option<CellId> {
        self.cell_id(self.coord_at(point))
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.col >= 0
            && coord.row >= 0
            && (coord.col as u32) < self.cols
            && (coord.row as u32) < self.rows
    }

    /// Flat id for a coordinate. Both axes are checked, so a column of -1
    /// never aliases into the last cell of the previous row.
    pub fn cell_id(&self, coord: GridCoord) -> Option<CellId> {
        if !self.contains(coord) {
            return None;
        }
        Some(CellId(coord.col as usize + coord.row as usize * self.cols as usize))
    }

    pub fn coord_of(&self, id: CellId) -> GridCoord {
        let cols = self.cols.max(1) as usize;
        GridCoord {
            col: (id.0 % cols) as i32,
            row: (id.0 / cols) as i32,
        }
    }

    /// Top-left corner of a cell in map space: `(col·E, row·E)`.
    pub fn cell_origin(&self, id: CellId) -> Vec2 {
        let coord = self.coord_of(id);
        Vec2::new(
            coord.col as f32 * self.cell_size,
            coord.row as f32 * self.cell_size,
        )
    }

    pub fn cell_center(&self, id: CellId) -> Vec2 {
        self.cell_origin(id) + Vec2::splat(self.cell_size * 0.5)
    }

    /// Clamp a map-space point into the half-open world rectangle so that
    /// [`GridSpec::cell_index_at`] always resolves for the result.
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        let extent = self.extent();
        // Keep a sliver off the far edge so floor() lands on the last cell.
        let max = (extent - Vec2::splat(0.001)).max(Vec2::ZERO);
        point.clamp(Vec2::ZERO, max)
    }
}

/// Convert a map-space point (y down) into a Bevy world translation (y up).
pub fn map_to_world(point: Vec2, z: f32) -> Vec3 {
    Vec3::new(point.x, -point.y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSpec {
        GridSpec::new(30, 24, 48.0)
    }

    #[test]
    fn default_grid_uses_scaled_tiles() {
        let g = GridSpec::default();
        assert_eq!(g.cell_size, 48.0);
        assert_eq!(g.cell_count(), 720);
        assert_eq!(g.extent(), Vec2::new(1440.0, 1152.0));
    }

    #[test]
    fn cell_origin_round_trips_for_every_cell() {
        let g = grid();
        for id in 0..g.cell_count() {
            let origin = g.cell_origin(CellId(id));
            assert_eq!(g.cell_index_at(origin), Some(CellId(id)), "cell {id}");
        }
    }

    #[test]
    fn points_inside_a_cell_floor_to_it() {
        let g = grid();
        assert_eq!(g.cell_index_at(Vec2::new(0.0, 0.0)), Some(CellId(0)));
        assert_eq!(g.cell_index_at(Vec2::new(47.9, 47.9)), Some(CellId(0)));
        assert_eq!(g.cell_index_at(Vec2::new(48.0, 0.0)), Some(CellId(1)));
        // col 11, row 10 → 11 + 10 * 30
        assert_eq!(g.cell_index_at(Vec2::new(530.0, 490.0)), Some(CellId(311)));
    }

    #[test]
    fn off_map_points_have_no_cell() {
        let g = grid();
        assert_eq!(g.cell_index_at(Vec2::new(-0.5, 10.0)), None);
        assert_eq!(g.cell_index_at(Vec2::new(10.0, -0.5)), None);
        assert_eq!(g.cell_index_at(Vec2::new(1440.0, 10.0)), None);
        assert_eq!(g.cell_index_at(Vec2::new(10.0, 1152.0)), None);
    }

    #[test]
    fn negative_column_does_not_wrap_into_previous_row() {
        let g = grid();
        let left_of_row_one = GridCoord::new(0, 1).offset(-1, 0);
        assert_eq!(g.cell_id(left_of_row_one), None);
        let right_of_row_zero = GridCoord::new(29, 0).offset(1, 0);
        assert_eq!(g.cell_id(right_of_row_zero), None);
    }

    #[test]
    fn clamped_points_always_resolve() {
        let g = grid();
        for p in [
            Vec2::new(-100.0, -100.0),
            Vec2::new(5000.0, 5000.0),
            Vec2::new(1440.0, 1152.0),
        ] {
            assert!(g.cell_index_at(g.clamp_point(p)).is_some(), "{p:?}");
        }
        assert_eq!(g.cell_index_at(g.clamp_point(Vec2::new(1440.0, 1152.0))), Some(CellId(719)));
    }

    #[test]
    fn map_to_world_flips_y() {
        assert_eq!(map_to_world(Vec2::new(10.0, 20.0), 3.0), Vec3::new(10.0, -20.0, 3.0));
    }
}
