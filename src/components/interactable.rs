use bevy_ecs::prelude::*;

use crate::simulation::chores::{ChoreId, InstanceId};

/// One open sub-unit of chore work, spawned as an interactable placeholder
/// while its room is active. Despawned once the sub-unit is recorded or
/// the player leaves the room.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct ChoreTarget {
    pub chore: ChoreId,
    pub instance: InstanceId,
    pub sub_unit: u32,
}
