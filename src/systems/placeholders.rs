use bevy_ecs::prelude::*;

use crate::components::interactable::ChoreTarget;
use crate::data::chores::ChoreCatalog;
use crate::simulation::chores::ChoreProgress;
use crate::simulation::rooms::RoomState;
use crate::simulation::session::pending_units;

/// Reconciles interactable placeholder entities with the active room's open
/// sub-units. Entities for completed units or other rooms are despawned;
/// missing ones are spawned.
pub fn placeholder_sync_system(
    mut commands: Commands,
    catalog: Res<ChoreCatalog>,
    progress: Res<ChoreProgress>,
    room: Res<RoomState>,
    targets: Query<(Entity, &ChoreTarget)>,
) {
    let wanted = pending_units(&catalog, &progress, room.current);
    for (entity, target) in targets.iter() {
        let still_wanted = wanted.iter().any(|unit| {
            unit.chore == target.chore
                && unit.instance == target.instance
                && unit.sub_unit == target.sub_unit
        });
        if !still_wanted {
            commands.entity(entity).despawn();
        }
    }
    for unit in wanted {
        let exists = targets.iter().any(|(_, target)| {
            target.chore == unit.chore
                && target.instance == unit.instance
                && target.sub_unit == unit.sub_unit
        });
        if !exists {
            commands.spawn(ChoreTarget {
                chore: unit.chore,
                instance: unit.instance,
                sub_unit: unit.sub_unit,
            });
        }
    }
}
