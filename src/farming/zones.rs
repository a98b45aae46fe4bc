//! Farmable-zone classification.
//!
//! Zones are declared as data (see `assets/data/farm.ron`) and resolved
//! against the grid once at load time. After that, classification is a
//! membership test over a short list of cell rectangles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::data::DataError;
use crate::grid::{CellId, GridCoord, GridSpec};

/// A zone as authored in map data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoneSpec {
    /// Top-left cell id plus size in cells.
    Cells { origin: usize, width: u32, height: u32 },
    /// Rectangle in world units, as exported by a map editor's object
    /// layer. Covers every cell the rectangle overlaps.
    World { x: f32, y: f32, width: f32, height: f32 },
}

impl ZoneSpec {
    /// Resolve into cell space. `index` is only used for error reporting.
    pub fn resolve(&self, index: usize, grid: &GridSpec) -> Result<CellRect, DataError> {
        let rect = match *self {
            ZoneSpec::Cells { origin, width, height } => {
                if width == 0 || height == 0 {
                    return Err(DataError::EmptyZone { index });
                }
                if origin >= grid.cell_count() {
                    return Err(zone_out_of_bounds(index, grid));
                }
                let coord = grid.coord_of(CellId(origin));
                CellRect {
                    col: coord.col as u32,
                    row: coord.row as u32,
                    width,
                    height,
                }
            }
            ZoneSpec::World { x, y, width, height } => {
                if !(width > 0.0 && height > 0.0) {
                    return Err(DataError::EmptyZone { index });
                }
                if !(x >= 0.0 && y >= 0.0 && (x + width).is_finite() && (y + height).is_finite()) {
                    return Err(zone_out_of_bounds(index, grid));
                }
                let e = grid.cell_size;
                let col = (x / e).floor() as u32;
                let row = (y / e).floor() as u32;
                let end_col = ((x + width) / e).ceil() as u32;
                let end_row = ((y + height) / e).ceil() as u32;
                CellRect {
                    col,
                    row,
                    width: end_col.saturating_sub(col).max(1),
                    height: end_row.saturating_sub(row).max(1),
                }
            }
        };

        let past = |start: u32, len: u32, limit: u32| {
            start.checked_add(len).map_or(true, |end| end > limit)
        };
        if past(rect.col, rect.width, grid.cols) || past(rect.row, rect.height, grid.rows) {
            return Err(zone_out_of_bounds(index, grid));
        }
        Ok(rect)
    }
}

fn zone_out_of_bounds(index: usize, grid: &GridSpec) -> DataError {
    DataError::ZoneOutOfBounds {
        index,
        cols: grid.cols,
        rows: grid.rows,
    }
}

/// An axis-aligned block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub col: u32,
    pub row: u32,
    pub width: u32,
    pub height: u32,
}

impl CellRect {
    pub fn contains(&self, coord: GridCoord) -> bool {
        if coord.col < 0 || coord.row < 0 {
            return false;
        }
        let (col, row) = (coord.col as u32, coord.row as u32);
        col >= self.col
            && row >= self.row
            && col - self.col < self.width
            && row - self.row < self.height
    }
}

/// The set of arable cells for one map.
#[derive(Debug, Clone, PartialEq)]
pub struct FarmZones {
    grid: GridSpec,
    rects: Vec<CellRect>,
}

impl FarmZones {
    /// A map with nothing farmable.
    pub fn empty(grid: GridSpec) -> Self {
        Self {
            grid,
            rects: Vec::new(),
        }
    }

    /// Build from rectangles already known to fit the grid.
    pub fn from_rects(grid: GridSpec, rects: Vec<CellRect>) -> Self {
        Self { grid, rects }
    }

    /// Resolve and validate authored zone data.
    pub fn from_specs(grid: GridSpec, specs: &[ZoneSpec]) -> Result<Self, DataError> {
        let rects = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| spec.resolve(index, &grid))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { grid, rects })
    }

    pub fn rects(&self) -> &[CellRect] {
        &self.rects
    }

    /// A cell is farmable iff it falls inside at least one declared rectangle.
    pub fn is_farmable(&self, cell: CellId) -> bool {
        if cell.0 >= self.grid.cell_count() {
            return false;
        }
        let coord = self.grid.coord_of(cell);
        self.rects.iter().any(|rect| rect.contains(coord))
    }

    /// Every farmable cell, ascending and de-duplicated across overlapping zones.
    pub fn cells(&self) -> BTreeSet<CellId> {
        let mut cells = BTreeSet::new();
        for rect in &self.rects {
            let end_row = rect.row.saturating_add(rect.height).min(self.grid.rows);
            let end_col = rect.col.saturating_add(rect.width).min(self.grid.cols);
            for row in rect.row..end_row {
                for col in rect.col..end_col {
                    if let Some(id) = self.grid.cell_id(GridCoord::new(col as i32, row as i32)) {
                        cells.insert(id);
                    }
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSpec {
        GridSpec::new(30, 24, 48.0)
    }

    #[test]
    fn cell_zone_covers_exactly_its_block() {
        let zones = FarmZones::from_specs(
            grid(),
            &[ZoneSpec::Cells { origin: 280, width: 4, height: 4 }],
        )
        .unwrap();

        let expected: Vec<usize> = vec![
            280, 281, 282, 283, 310, 311, 312, 313, 340, 341, 342, 343, 370, 371, 372, 373,
        ];
        let cells: Vec<usize> = zones.cells().into_iter().map(|c| c.0).collect();
        assert_eq!(cells, expected);

        for id in 0..grid().cell_count() {
            assert_eq!(
                zones.is_farmable(CellId(id)),
                expected.contains(&id),
                "cell {id}"
            );
        }
    }

    #[test]
    fn world_zone_covers_overlapped_cells() {
        let rect = ZoneSpec::World { x: 50.0, y: 10.0, width: 50.0, height: 30.0 }
            .resolve(0, &grid())
            .unwrap();
        // x 50..100 → cols 1..=2, y 10..40 → row 0
        assert_eq!(rect, CellRect { col: 1, row: 0, width: 2, height: 1 });

        let aligned = ZoneSpec::World { x: 768.0, y: 720.0, width: 288.0, height: 144.0 }
            .resolve(0, &grid())
            .unwrap();
        assert_eq!(aligned, CellRect { col: 16, row: 15, width: 6, height: 3 });
    }

    #[test]
    fn overlapping_zones_do_not_duplicate_cells() {
        let zones = FarmZones::from_specs(
            grid(),
            &[
                ZoneSpec::Cells { origin: 0, width: 2, height: 2 },
                ZoneSpec::Cells { origin: 1, width: 2, height: 1 },
            ],
        )
        .unwrap();
        assert_eq!(zones.cells().len(), 5);
    }

    #[test]
    fn zones_past_the_grid_edge_are_rejected() {
        let g = grid();
        // col 28 + 4 > 30
        let err = ZoneSpec::Cells { origin: 28, width: 4, height: 1 }.resolve(3, &g);
        assert!(matches!(err, Err(DataError::ZoneOutOfBounds { index: 3, .. })));

        assert!(ZoneSpec::Cells { origin: 720, width: 1, height: 1 }.resolve(0, &g).is_err());
        assert!(ZoneSpec::Cells { origin: 0, width: 0, height: 1 }.resolve(0, &g).is_err());
        assert!(ZoneSpec::World { x: -1.0, y: 0.0, width: 10.0, height: 10.0 }.resolve(0, &g).is_err());
        assert!(ZoneSpec::World { x: 1400.0, y: 0.0, width: 100.0, height: 10.0 }.resolve(0, &g).is_err());
    }

    #[test]
    fn huge_zone_sizes_are_rejected_not_wrapped() {
        let g = grid();
        let wide = ZoneSpec::Cells { origin: 1, width: u32::MAX, height: 1 }.resolve(0, &g);
        assert!(matches!(wide, Err(DataError::ZoneOutOfBounds { index: 0, .. })));

        let tall = ZoneSpec::Cells { origin: 30, width: 1, height: u32::MAX }.resolve(1, &g);
        assert!(matches!(tall, Err(DataError::ZoneOutOfBounds { index: 1, .. })));

        let endless = ZoneSpec::World { x: 0.0, y: 0.0, width: f32::INFINITY, height: 10.0 }.resolve(2, &g);
        assert!(matches!(endless, Err(DataError::ZoneOutOfBounds { index: 2, .. })));
    }

    #[test]
    fn out_of_range_ids_are_never_farmable() {
        let zones = FarmZones::from_rects(grid(), vec![CellRect { col: 0, row: 0, width: 30, height: 24 }]);
        assert!(zones.is_farmable(CellId(719)));
        assert!(!zones.is_farmable(CellId(720)));
    }
}
