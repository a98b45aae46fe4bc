//! Tool-action dispatch — one validated cell transition per use edge.

use bevy::prelude::*;

use super::cells::{CellRejection, CellStore};
use super::{CropHarvestedEvent, ToolUseEvent};
use crate::player::facing::facing_cell;
use crate::shared::*;

/// Result of a single use of the selected slot.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Planted(CellId),
    Watered(CellId),
    Harvested(CellId),
    /// The tool was valid but the faced cell refused the action.
    Rejected { tool: ToolKind, reason: CellRejection },
    /// The selected slot is empty.
    EmptySlot,
    /// The selected slot holds an item that is not a tool.
    UnknownTool(ItemId),
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ToolOutcome::Planted(_) | ToolOutcome::Watered(_) | ToolOutcome::Harvested(_)
        )
    }
}

/// Apply `item` to `target` at time `now`.
///
/// The scythe stamps the swing cue before anything else, so a failed
/// harvest still animates. Every other branch only touches state on success.
pub fn apply_tool(
    item: Option<&str>,
    target: Option<CellId>,
    now: f64,
    store: &mut CellStore,
    cues: &mut ActionCues,
) -> ToolOutcome {
    let Some(item_id) = item else {
        return ToolOutcome::EmptySlot;
    };
    let Some(tool) = ToolKind::from_item_id(item_id) else {
        return ToolOutcome::UnknownTool(item_id.to_string());
    };

    if tool == ToolKind::Scythe {
        cues.tool_swung.set(now);
    }

    let Some(cell) = target else {
        return ToolOutcome::Rejected {
            tool,
            reason: CellRejection::OutOfBounds,
        };
    };

    let result = match tool {
        ToolKind::Hoe | ToolKind::Seeds => store.plant(cell, now).map(|()| ToolOutcome::Planted(cell)),
        ToolKind::WateringCan => store.water(cell, now).map(|()| ToolOutcome::Watered(cell)),
        ToolKind::Scythe => store.harvest(cell, now).map(|()| {
            cues.harvested.set(now);
            ToolOutcome::Harvested(cell)
        }),
    };

    result.unwrap_or_else(|reason| ToolOutcome::Rejected { tool, reason })
}

/// Fire the selected tool at the faced cell on the use edge.
pub fn handle_tool_use(
    time: Res<Time>,
    input: Res<PlayerInput>,
    inventory: Res<Inventory>,
    mut store: ResMut<CellStore>,
    mut player_query: Query<(&CharacterBody, &PlayerMovement, &mut ActionCues), With<Player>>,
    mut tool_events: EventWriter<ToolUseEvent>,
    mut harvest_events: EventWriter<CropHarvestedEvent>,
) {
    if !input.tool_use {
        return;
    }
    let Ok((body, movement, mut cues)) = player_query.get_single_mut() else {
        return;
    };

    let now = time.elapsed_secs_f64();
    let target = facing_cell(store.grid(), body, movement.facing);
    let item = inventory.selected_item();
    let outcome = apply_tool(item, target, now, &mut store, &mut cues);

    match &outcome {
        ToolOutcome::Planted(cell) => info!("[Farming] Planted cell {}", cell.0),
        ToolOutcome::Watered(cell) => info!("[Farming] Watered cell {}", cell.0),
        ToolOutcome::Harvested(cell) => {
            info!("[Farming] Harvested cell {}", cell.0);
            harvest_events.send(CropHarvestedEvent { cell: *cell });
        }
        ToolOutcome::Rejected { tool, reason } => {
            debug!("[Farming] {:?} on {:?} ignored: {}", tool, target, reason);
        }
        ToolOutcome::EmptySlot => {
            warn!("[Farming] Slot {} is empty, nothing to use", inventory.selected_slot);
        }
        ToolOutcome::UnknownTool(id) => {
            warn!("[Farming] Slot {} holds unrecognised tool '{}'", inventory.selected_slot, id);
        }
    }

    tool_events.send(ToolUseEvent {
        item: item.map(str::to_owned),
        target,
        outcome,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::farming::growth::GrowthSchedule;
    use crate::farming::zones::{FarmZones, ZoneSpec};

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
    fn seeds_and_hoe_both_plant() {
        let mut store = store();
        let mut cues = ActionCues::default();
        assert_eq!(
            apply_tool(Some("seeds"), Some(CellId(311)), 1.0, &mut store, &mut cues),
            ToolOutcome::Planted(CellId(311))
        );
        assert_eq!(
            apply_tool(Some("hoe"), Some(CellId(312)), 1.0, &mut store, &mut cues),
            ToolOutcome::Planted(CellId(312))
        );
        assert_eq!(
            apply_tool(Some("hoe"), Some(CellId(312)), 2.0, &mut store, &mut cues),
            ToolOutcome::Rejected { tool: ToolKind::Hoe, reason: CellRejection::AlreadyPlanted }
        );
        assert_eq!(cues, ActionCues::default(), "planting sets no cues");
    }

    #[test]
    fn watering_can_waters() {
        let mut store = store();
        let mut cues = ActionCues::default();
        let outcome = apply_tool(Some("watering_can"), Some(CellId(340)), 3.0, &mut store, &mut cues);
        assert_eq!(outcome, ToolOutcome::Watered(CellId(340)));
        assert_eq!(store.get(CellId(340)).unwrap().wetted_at, Some(3.0));
    }

    #[test]
    fn scythe_swings_even_when_harvest_fails() {
        let mut store = store();
        let mut cues = ActionCues::default();

        let outcome = apply_tool(Some("scythe"), Some(CellId(0)), 5.0, &mut store, &mut cues);
        assert_eq!(
            outcome,
            ToolOutcome::Rejected { tool: ToolKind::Scythe, reason: CellRejection::NotFarmable }
        );
        assert_eq!(cues.tool_swung.get(), Some(5.0));
        assert!(!cues.harvested.is_set());

        let outcome = apply_tool(Some("scythe"), None, 6.0, &mut store, &mut cues);
        assert!(!outcome.is_success());
        assert_eq!(cues.tool_swung.get(), Some(6.0));
    }

    #[test]
    fn scythe_harvest_sets_both_cues() {
        let mut store = store();
        let mut cues = ActionCues::default();
        store.plant(CellId(311), 10.0).unwrap();

        let early = apply_tool(Some("scythe"), Some(CellId(311)), 13.5, &mut store, &mut cues);
        assert_eq!(
            early,
            ToolOutcome::Rejected {
                tool: ToolKind::Scythe,
                reason: CellRejection::NotMature { stage: 2, required: 3 },
            }
        );
        assert!(!cues.harvested.is_set());

        let ripe = apply_tool(Some("scythe"), Some(CellId(311)), 14.0, &mut store, &mut cues);
        assert_eq!(ripe, ToolOutcome::Harvested(CellId(311)));
        assert_eq!(cues.tool_swung.get(), Some(14.0));
        assert_eq!(cues.harvested.get(), Some(14.0));
        assert_eq!(store.get(CellId(311)).unwrap().planted_at, None);
    }

    #[test]
    fn empty_and_unknown_slots_change_nothing() {
        let mut store = store();
        let before = store.clone();
        let mut cues = ActionCues::default();

        assert_eq!(
            apply_tool(None, Some(CellId(311)), 1.0, &mut store, &mut cues),
            ToolOutcome::EmptySlot
        );
        assert_eq!(
            apply_tool(Some("axe"), Some(CellId(311)), 1.0, &mut store, &mut cues),
            ToolOutcome::UnknownTool("axe".to_string())
        );
        assert_eq!(cues, ActionCues::default());
        assert!(store.iter().zip(before.iter()).all(|(a, b)| a == b));
    }

    #[test]
    fn off_map_target_is_a_silent_rejection() {
        let mut store = store();
        let mut cues = ActionCues::default();
        assert_eq!(
            apply_tool(Some("seeds"), None, 1.0, &mut store, &mut cues),
            ToolOutcome::Rejected { tool: ToolKind::Seeds, reason: CellRejection::OutOfBounds }
        );
    }
}
