//! Data layer — builds every world resource at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), parses the farm
//! description from `assets/data/farm.ron`, validates it, inserts the grid,
//! cell store, cue windows, player settings and inventory, then transitions
//! the game into GameState::Playing.
//!
//! A bad farm file never stops the session: the error is logged and the
//! built-in layout (identical to the shipped file) is used instead.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::farming::cells::CellStore;
use crate::farming::growth::GrowthSchedule;
use crate::farming::zones::{CellRect, FarmZones, ZoneSpec};
use crate::shared::*;

/// The shipped farm, embedded so the game runs from any working directory.
pub const FARM_RON: &str = include_str!("../../assets/data/farm.ron");

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("farm data is not valid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("grid must have at least one cell, got {cols}x{rows}")]
    EmptyGrid { cols: u32, rows: u32 },
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f32),
    #[error("zone #{index} covers no cells")]
    EmptyZone { index: usize },
    #[error("zone #{index} does not fit the {cols}x{rows} grid")]
    ZoneOutOfBounds { index: usize, cols: u32, rows: u32 },
    #[error("growth breakpoints must be positive and strictly ascending, got {0:?}")]
    InvalidBreakpoints(Vec<f64>),
    #[error("cue window must be non-negative, got {0}")]
    InvalidCueWindow(f64),
    #[error("inventory loadout has {got} items but only {capacity} slots")]
    InventoryOverflow { got: usize, capacity: usize },
    #[error("inventory loadout lists '{0}' more than once")]
    DuplicateItem(ItemId),
    #[error("player {field} must be positive and finite, got {value}")]
    InvalidPlayerValue { field: &'static str, value: f32 },
    #[error("player spawn ({x}, {y}) puts the character's feet off the map")]
    SpawnOffMap { x: f32, y: f32 },
}

// ═══════════════════════════════════════════════════════════════════════
// FARM DESCRIPTION (as authored)
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmConfig {
    pub grid: GridConfig,
    pub zones: Vec<ZoneSpec>,
    pub growth: GrowthConfig,
    pub player: PlayerConfig,
    pub inventory: Vec<ItemId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub cols: u32,
    pub rows: u32,
    pub tile_size: f32,
    pub pixel_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthConfig {
    pub breakpoints: Vec<f64>,
    pub swing_window: f64,
    pub harvest_window: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub spawn: (f32, f32),
    pub size: (f32, f32),
    pub speed: f32,
    pub run_multiplier: f32,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                cols: GRID_COLS,
                rows: GRID_ROWS,
                tile_size: TILE_SIZE,
                pixel_scale: PIXEL_SCALE,
            },
            zones: vec![
                ZoneSpec::Cells { origin: 280, width: 4, height: 4 },
                ZoneSpec::World { x: 768.0, y: 720.0, width: 288.0, height: 144.0 },
            ],
            growth: GrowthConfig {
                breakpoints: vec![1.0, 2.0, 4.0],
                swing_window: 0.5,
                harvest_window: 1.0,
            },
            player: PlayerConfig {
                spawn: (504.0, 400.0),
                size: (48.0, 48.0),
                speed: 240.0,
                run_multiplier: 2.0,
            },
            inventory: ["seeds", "watering_can", "scythe", "hoe"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl FarmConfig {
    pub fn from_ron(source: &str) -> Result<Self, DataError> {
        Ok(ron::from_str(source)?)
    }

    /// Validate and resolve into the resources the session runs on.
    pub fn build(&self) -> Result<FarmWorld, DataError> {
        let GridConfig { cols, rows, tile_size, pixel_scale } = self.grid;
        if cols == 0 || rows == 0 {
            return Err(DataError::EmptyGrid { cols, rows });
        }
        let cell_size = tile_size * pixel_scale;
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(DataError::InvalidCellSize(cell_size));
        }
        let grid = GridSpec::new(cols, rows, cell_size);

        let zones = FarmZones::from_specs(grid, &self.zones)?;
        let schedule = GrowthSchedule::new(self.growth.breakpoints.clone())?;

        for window in [self.growth.swing_window, self.growth.harvest_window] {
            if !(window.is_finite() && window >= 0.0) {
                return Err(DataError::InvalidCueWindow(window));
            }
        }
        let cues = CueWindows {
            swing: self.growth.swing_window,
            harvest: self.growth.harvest_window,
        };

        if self.inventory.len() > INVENTORY_SLOTS {
            return Err(DataError::InventoryOverflow {
                got: self.inventory.len(),
                capacity: INVENTORY_SLOTS,
            });
        }
        for (i, item) in self.inventory.iter().enumerate() {
            if self.inventory[..i].contains(item) {
                return Err(DataError::DuplicateItem(item.clone()));
            }
        }

        let player = self.player.build(&grid)?;

        Ok(FarmWorld {
            grid,
            zones,
            schedule,
            cues,
            player,
            inventory: Inventory::with_loadout(self.inventory.iter().cloned()),
        })
    }
}

impl PlayerConfig {
    fn build(&self, grid: &GridSpec) -> Result<PlayerSettings, DataError> {
        for (field, value) in [
            ("width", self.size.0),
            ("height", self.size.1),
            ("speed", self.speed),
            ("run_multiplier", self.run_multiplier),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(DataError::InvalidPlayerValue { field, value });
            }
        }

        let (x, y) = self.spawn;
        let body = CharacterBody::new(Vec2::new(x, y), Vec2::new(self.size.0, self.size.1));
        let anchor = body.anchor();
        if !anchor.is_finite() || grid.cell_index_at(anchor).is_none() {
            return Err(DataError::SpawnOffMap { x, y });
        }

        Ok(PlayerSettings {
            spawn: body.pos,
            size: body.size,
            speed: self.speed,
            run_multiplier: self.run_multiplier,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FARM WORLD (validated)
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct FarmWorld {
    pub grid: GridSpec,
    pub zones: FarmZones,
    pub schedule: GrowthSchedule,
    pub cues: CueWindows,
    pub player: PlayerSettings,
    pub inventory: Inventory,
}

/// The built-in layout. Constructed directly so it cannot fail.
impl Default for FarmWorld {
    fn default() -> Self {
        let grid = GridSpec::default();
        Self {
            grid,
            zones: FarmZones::from_rects(
                grid,
                vec![
                    CellRect { col: 10, row: 9, width: 4, height: 4 },
                    CellRect { col: 16, row: 15, width: 6, height: 3 },
                ],
            ),
            schedule: GrowthSchedule::default(),
            cues: CueWindows::default(),
            player: PlayerSettings::default(),
            inventory: Inventory::with_loadout(["seeds", "watering_can", "scythe", "hoe"]),
        }
    }
}

/// Parse the shipped farm, falling back to the built-in layout on error.
pub fn load_farm(source: &str) -> FarmWorld {
    match FarmConfig::from_ron(source).and_then(|config| config.build()) {
        Ok(world) => world,
        Err(err) => {
            error!("[Data] {err}; using the built-in farm layout");
            FarmWorld::default()
        }
    }
}

fn load_all_data(mut commands: Commands, mut next_state: ResMut<NextState<GameState>>) {
    info!("[Data] Loading farm…");

    let world = load_farm(FARM_RON);
    let farmable = world.zones.cells().len();

    info!(
        "[Data]   Grid: {}x{} cells of {} units",
        world.grid.cols, world.grid.rows, world.grid.cell_size
    );
    info!(
        "[Data]   Farmable cells: {} across {} zones",
        farmable,
        world.zones.rects().len()
    );
    info!("[Data]   Growth breakpoints: {:?}", world.schedule.breakpoints());

    commands.insert_resource(world.grid);
    commands.insert_resource(CellStore::new(world.grid, world.zones, world.schedule));
    commands.insert_resource(world.cues);
    commands.insert_resource(world.player);
    commands.insert_resource(world.inventory);

    info!("[Data] Farm ready. Transitioning to Playing.");
    next_state.set(GameState::Playing);
}
