//! Farming domain — farmable zones, per-cell state, growth, and tool actions.
//!
//! Communicates with other domains through crate::shared resources and the
//! events declared here.

use bevy::prelude::*;
use crate::shared::*;

pub mod actions;
pub mod cells;
pub mod growth;
pub mod render;
pub mod zones;

use actions::ToolOutcome;

/// Emitted once per use edge, whatever the result.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ToolUseEvent {
    pub item: Option<ItemId>,
    pub target: Option<CellId>,
    pub outcome: ToolOutcome,
}

/// A fully grown crop was cleared from `cell`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropHarvestedEvent {
    pub cell: CellId,
}

/// Most recent tool outcome, kept for the debug overlay.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct LastToolUse(pub Option<ToolUseEvent>);

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<LastToolUse>()
            .add_event::<ToolUseEvent>()
            .add_event::<CropHarvestedEvent>()
            .add_systems(OnEnter(GameState::Playing), render::spawn_cell_sprites)
            .add_systems(
                Update,
                actions::handle_tool_use
                    .in_set(UpdateSet::Actions)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(Update, remember_last_tool_use.after(UpdateSet::Actions))
            .add_systems(PostUpdate, render::sync_cell_sprites);
    }
}

fn remember_last_tool_use(
    mut events: EventReader<ToolUseEvent>,
    mut last: ResMut<LastToolUse>,
) {
    if let Some(event) = events.read().last() {
        last.0 = Some(event.clone());
    }
}
