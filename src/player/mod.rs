mod camera;
mod cues;
pub mod facing;
mod movement;
mod spawn;
mod tools;

use bevy::prelude::*;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (UpdateSet::Controls, UpdateSet::Actions, UpdateSet::Cues).chain(),
        );

        // -- Spawn player when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        // -- Systems that run every frame while Playing --
        app.add_systems(
            Update,
            (
                (tools::select_slot, movement::player_movement).in_set(UpdateSet::Controls),
                cues::expire_action_cues.in_set(UpdateSet::Cues),
            )
                .run_if(in_state(GameState::Playing)),
        );

        // -- Presentation follows state in every state so pausing freezes in place --
        app.add_systems(
            PostUpdate,
            (
                movement::sync_player_transform,
                cues::tint_player_sprite,
                camera::camera_follow_player.after(movement::sync_player_transform),
            ),
        );
    }
}
