//! Cell state store — the only owner of per-cell world mutation.
//!
//! Backed by a row-major `Vec` sized `cols × rows`. Callers address cells
//! by [`CellId`] and go through the operations below; the backing storage
//! is never exposed mutably.

use bevy::prelude::*;

use super::growth::GrowthSchedule;
use super::zones::FarmZones;
use crate::grid::{CellId, GridSpec};

/// Persistent state of one cell. `None` timestamps mean "unset".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellState {
    pub planted_at: Option<f64>,
    pub wetted_at: Option<f64>,
}

impl CellState {
    pub fn is_planted(&self) -> bool {
        self.planted_at.is_some()
    }

    pub fn is_wet(&self) -> bool {
        self.wetted_at.is_some()
    }
}

/// Why an operation left the store untouched. None of these are fatal;
/// repeated input against the same cell hits them routinely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CellRejection {
    #[error("target is outside the map")]
    OutOfBounds,
    #[error("cell is not farmable")]
    NotFarmable,
    #[error("cell is already planted")]
    AlreadyPlanted,
    #[error("cell is already watered")]
    AlreadyWatered,
    #[error("nothing is planted here")]
    NothingPlanted,
    #[error("crop is at stage {stage}, needs stage {required}")]
    NotMature { stage: u8, required: u8 },
}

#[derive(Resource, Debug, Clone)]
pub struct CellStore {
    grid: GridSpec,
    zones: FarmZones,
    schedule: GrowthSchedule,
    cells: Vec<CellState>,
}

impl Default for CellStore {
    fn default() -> Self {
        let grid = GridSpec::default();
        Self::new(grid, FarmZones::empty(grid), GrowthSchedule::default())
    }
}

impl CellStore {
    /// Allocate every cell in the fallow state.
    pub fn new(grid: GridSpec, zones: FarmZones, schedule: GrowthSchedule) -> Self {
        Self {
            grid,
            zones,
            schedule,
            cells: vec![CellState::default(); grid.cell_count()],
        }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn zones(&self) -> &FarmZones {
        &self.zones
    }

    pub fn schedule(&self) -> &GrowthSchedule {
        &self.schedule
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, cell: CellId) -> Option<&CellState> {
        self.cells.get(cell.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellId, &CellState)> {
        self.cells.iter().enumerate().map(|(i, state)| (CellId(i), state))
    }

    pub fn is_farmable(&self, cell: CellId) -> bool {
        self.zones.is_farmable(cell)
    }

    /// Bounds and farmable gate shared by every mutating operation.
    fn farmable_mut(&mut self, cell: CellId) -> Result<&mut CellState, CellRejection> {
        if cell.0 >= self.cells.len() {
            return Err(CellRejection::OutOfBounds);
        }
        if !self.zones.is_farmable(cell) {
            return Err(CellRejection::NotFarmable);
        }
        self.cells.get_mut(cell.0).ok_or(CellRejection::OutOfBounds)
    }

    pub fn plant(&mut self, cell: CellId, now: f64) -> Result<(), CellRejection> {
        let state = self.farmable_mut(cell)?;
        if state.planted_at.is_some() {
            return Err(CellRejection::AlreadyPlanted);
        }
        state.planted_at = Some(now);
        Ok(())
    }

    pub fn water(&mut self, cell: CellId, now: f64) -> Result<(), CellRejection> {
        let state = self.farmable_mut(cell)?;
        if state.wetted_at.is_some() {
            return Err(CellRejection::AlreadyWatered);
        }
        state.wetted_at = Some(now);
        Ok(())
    }

    /// Clears the crop once it is fully grown. Watering is left as is.
    pub fn harvest(&mut self, cell: CellId, now: f64) -> Result<(), CellRejection> {
        let Some(planted_at) = self.farmable_mut(cell)?.planted_at else {
            return Err(CellRejection::NothingPlanted);
        };
        let stage = self.schedule.stage_since(planted_at, now);
        if !self.schedule.is_mature(stage) {
            return Err(CellRejection::NotMature {
                stage,
                required: self.schedule.max_stage(),
            });
        }
        if let Some(state) = self.cells.get_mut(cell.0) {
            state.planted_at = None;
        }
        Ok(())
    }

    /// Growth stage of the crop in `cell`, or `None` when nothing is planted.
    pub fn growth_stage(&self, cell: CellId, now: f64) -> Option<u8> {
        let planted_at = self.get(cell)?.planted_at?;
        Some(self.schedule.stage_since(planted_at, now))
    }

    pub fn is_mature(&self, cell: CellId, now: f64) -> bool {
        self.growth_stage(cell, now)
            .is_some_and(|stage| self.schedule.is_mature(stage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farming::zones::ZoneSpec;

    fn store() -> CellStore {
        let grid = GridSpec::new(30, 24, 48.0);
        let zones = FarmZones::from_specs(
            grid,
            &[ZoneSpec::Cells { origin: 280, width: 4, height: 4 }],
        )
        .unwrap();
        CellStore::new(grid, zones, GrowthSchedule::default())
    }

    #[test]
    fn new_store_is_fallow() {
        let store = store();
        assert_eq!(store.len(), 720);
        assert!(store.iter().all(|(_, s)| *s == CellState::default()));
        assert_eq!(store.growth_stage(CellId(311), 100.0), None);
    }

    #[test]
    fn planting_is_idempotent_until_harvest() {
        let mut store = store();
        assert_eq!(store.plant(CellId(311), 10.0), Ok(()));
        assert_eq!(store.get(CellId(311)).unwrap().planted_at, Some(10.0));

        assert_eq!(store.plant(CellId(311), 12.0), Err(CellRejection::AlreadyPlanted));
        assert_eq!(store.get(CellId(311)).unwrap().planted_at, Some(10.0));
    }

    #[test]
    fn watering_is_idempotent() {
        let mut store = store();
        assert_eq!(store.water(CellId(280), 1.0), Ok(()));
        assert_eq!(store.water(CellId(280), 2.0), Err(CellRejection::AlreadyWatered));
        assert_eq!(store.get(CellId(280)).unwrap().wetted_at, Some(1.0));
    }

    #[test]
    fn non_farmable_cells_never_change() {
        let mut store = store();
        let before = store.clone();
        for id in [0, 279, 284, 400, 719] {
            assert_eq!(store.plant(CellId(id), 1.0), Err(CellRejection::NotFarmable));
            assert_eq!(store.water(CellId(id), 1.0), Err(CellRejection::NotFarmable));
            assert_eq!(store.harvest(CellId(id), 1.0), Err(CellRejection::NotFarmable));
        }
        assert_eq!(store.plant(CellId(720), 1.0), Err(CellRejection::OutOfBounds));
        assert_eq!(store.water(CellId(9999), 1.0), Err(CellRejection::OutOfBounds));
        assert!(store.iter().zip(before.iter()).all(|(a, b)| a == b));
    }

    #[test]
    fn harvest_requires_a_mature_crop() {
        let mut store = store();
        assert_eq!(store.harvest(CellId(311), 5.0), Err(CellRejection::NothingPlanted));

        store.plant(CellId(311), 10.0).unwrap();
        assert_eq!(store.growth_stage(CellId(311), 10.0), Some(0));
        assert_eq!(store.growth_stage(CellId(311), 11.5), Some(1));

        assert_eq!(
            store.harvest(CellId(311), 13.5),
            Err(CellRejection::NotMature { stage: 2, required: 3 })
        );
        assert_eq!(store.get(CellId(311)).unwrap().planted_at, Some(10.0));

        assert_eq!(store.growth_stage(CellId(311), 14.0), Some(3));
        assert!(store.is_mature(CellId(311), 14.0));
        assert_eq!(store.harvest(CellId(311), 14.0), Ok(()));
        assert_eq!(store.get(CellId(311)).unwrap().planted_at, None);
        assert_eq!(store.growth_stage(CellId(311), 14.0), None);

        assert_eq!(store.harvest(CellId(311), 20.0), Err(CellRejection::NothingPlanted));
    }

    #[test]
    fn harvested_cell_can_be_replanted() {
        let mut store = store();
        store.plant(CellId(283), 0.0).unwrap();
        store.harvest(CellId(283), 10.0).unwrap();
        assert_eq!(store.plant(CellId(283), 11.0), Ok(()));
        assert_eq!(store.growth_stage(CellId(283), 12.0), Some(1));
    }
}
