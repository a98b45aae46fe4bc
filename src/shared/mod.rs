//! Shared components, resources, events, and states for Sproutfield.
//!
//! This is the type contract. Every domain plugin imports from here.
//! Domains only reach into each other through explicit `pub` helpers.

use bevy::prelude::*;

use crate::farming::growth::ExpiringStamp;

pub use crate::grid::{CellId, GridCoord, GridSpec};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Paused,
}

/// Ordering of the per-frame update pass while Playing.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateSet {
    /// Slot selection and movement integration.
    Controls,
    /// Tool use against the faced cell.
    Actions,
    /// Expiry of transient character cues.
    Cues,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Grid delta `(dcol, drow)`. Rows grow downward in map space.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Hoe,
    Seeds,
    WateringCan,
    Scythe,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Hoe,
        ToolKind::Seeds,
        ToolKind::WateringCan,
        ToolKind::Scythe,
    ];

    pub fn item_id(self) -> &'static str {
        match self {
            ToolKind::Hoe => "hoe",
            ToolKind::Seeds => "seeds",
            ToolKind::WateringCan => "watering_can",
            ToolKind::Scythe => "scythe",
        }
    }

    /// Resolve an inventory item id to a tool. Unknown ids are `None`.
    pub fn from_item_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.item_id() == id)
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub is_moving: bool,
    /// World units per second.
    pub speed: f32,
    pub run_multiplier: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            facing: Facing::Down,
            is_moving: false,
            speed: 240.0,
            run_multiplier: 2.0,
        }
    }
}

/// Character bounding box in map space (top-left + size).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CharacterBody {
    pub pos: Vec2,
    pub size: Vec2,
}

impl CharacterBody {
    /// Fraction of the body height where the feet sit.
    pub const FEET_FRACTION: f32 = 0.75;

    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Offset from `pos` to the point the character visually stands on.
    pub fn anchor_offset(&self) -> Vec2 {
        Vec2::new(self.size.x * 0.5, self.size.y * Self::FEET_FRACTION)
    }

    /// Horizontally centred, three quarters down the body.
    pub fn anchor(&self) -> Vec2 {
        self.pos + self.anchor_offset()
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Time-boxed visual feedback on the character.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionCues {
    pub tool_swung: ExpiringStamp,
    pub harvested: ExpiringStamp,
}

impl ActionCues {
    pub fn expire(&mut self, now: f64, windows: &CueWindows) {
        self.tool_swung.expire(now, windows.swing);
        self.harvested.expire(now, windows.harvest);
    }
}

/// Lifetimes (seconds) of the transient character cues.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CueWindows {
    pub swing: f64,
    pub harvest: f64,
}

impl Default for CueWindows {
    fn default() -> Self {
        Self {
            swing: 0.5,
            harvest: 1.0,
        }
    }
}

/// Spawn parameters for the player character, filled by the data layer.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayerSettings {
    pub spawn: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub run_multiplier: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(504.0, 400.0),
            size: Vec2::splat(TILE_SIZE * PIXEL_SCALE),
            speed: 240.0,
            run_multiplier: 2.0,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

pub type ItemId = String;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Inventory {
    /// Fixed-capacity tool bar; one hotkey per slot.
    pub slots: Vec<Option<ItemId>>,
    pub selected_slot: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: vec![None; INVENTORY_SLOTS],
            selected_slot: 0,
        }
    }
}

impl Inventory {
    /// Fill slots in order from `items`. Extra items beyond capacity are
    /// dropped; the data layer rejects such loadouts before calling this.
    pub fn with_loadout<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        let mut inventory = Self::default();
        for (slot, item) in inventory.slots.iter_mut().zip(items) {
            *slot = Some(item.into());
        }
        inventory
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Select a slot. Returns false (and keeps the selection) when out of range.
    pub fn select(&mut self, slot: usize) -> bool {
        if slot >= self.slots.len() {
            return false;
        }
        self.selected_slot = slot;
        true
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.slots
            .get(self.selected_slot)
            .and_then(|slot| slot.as_deref())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// Per-frame game actions, rebuilt from hardware input every PreUpdate.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
    /// Edge: use the selected tool on the faced cell.
    pub tool_use: bool,
    /// Edge: hotkey for a slot, zero-based.
    pub tool_slot: Option<u8>,
    pub pause: bool,
    pub debug: bool,
}

/// Which set of actions the input layer produces this frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Gameplay,
    Menu,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub run: KeyCode,
    pub tool_use: KeyCode,
    pub pause: KeyCode,
    pub debug: KeyCode,
    /// One key per inventory slot.
    pub slots: [KeyCode; INVENTORY_SLOTS],
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            run: KeyCode::ShiftLeft,
            tool_use: KeyCode::Space,
            pause: KeyCode::KeyP,
            debug: KeyCode::F1,
            slots: [
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
                KeyCode::Digit5,
            ],
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebugOverlayState {
    pub visible: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 16.0;
pub const PIXEL_SCALE: f32 = 3.0; // render scale (16px × 3 = 48px cells)
pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

pub const GRID_COLS: u32 = 30;
pub const GRID_ROWS: u32 = 24;

pub const INVENTORY_SLOTS: usize = 5;

pub const Z_CELL: f32 = 1.0;
pub const Z_PLAYER: f32 = 10.0;
