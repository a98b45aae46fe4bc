use bevy::prelude::*;
use crate::shared::*;

/// Select an inventory slot from the numbered hotkeys.
pub fn select_slot(
    input: Res<PlayerInput>,
    mut inventory: ResMut<Inventory>,
) {
    let Some(slot) = input.tool_slot else {
        return;
    };
    let slot = slot as usize;
    if slot == inventory.selected_slot {
        return;
    }
    if inventory.select(slot) {
        info!(
            "[Player] Selected slot {} ({})",
            slot + 1,
            inventory.selected_item().unwrap_or("empty")
        );
    }
}
