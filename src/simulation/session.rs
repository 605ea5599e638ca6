use crate::data::chores::ChoreCatalog;
use crate::simulation::chores::{ChoreId, ChoreProgress, InstanceId};
use crate::simulation::rooms::RoomId;

/// One interactable unit of chore work still open in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUnit {
    pub chore: ChoreId,
    pub instance: InstanceId,
    pub sub_unit: u32,
}

/// Open sub-units for a room, in catalog declaration order with sub-units
/// ascending.
pub fn pending_units(
    catalog: &ChoreCatalog,
    progress: &ChoreProgress,
    room: RoomId,
) -> Vec<PendingUnit> {
    let mut units = Vec::new();
    for def in catalog.iter() {
        if !def.rooms.contains(&room) {
            continue;
        }
        let instance = InstanceId::derive(&def.id, room, def.shared);
        for sub_unit in 0..def.sub_units {
            if progress.is_done(&instance, sub_unit) {
                continue;
            }
            units.push(PendingUnit {
                chore: def.id.clone(),
                instance: instance.clone(),
                sub_unit,
            });
        }
    }
    units
}

/// One line of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    /// Display label, `"{name} ({room})"`.
    pub label: String,
    pub completed: u32,
    pub total: u32,
    pub room: RoomId,
    pub in_active_room: bool,
    /// Finished instances stay listed so renderers can strike them through.
    pub done: bool,
}

/// Per-instance task summary, one entry per (chore, room) pair. Entries for
/// the active room sort first; within each group catalog order is preserved.
pub fn task_summary(
    catalog: &ChoreCatalog,
    progress: &ChoreProgress,
    active: RoomId,
) -> Vec<TaskEntry> {
    let mut entries = Vec::new();
    for def in catalog.iter() {
        for room in &def.rooms {
            let instance = InstanceId::derive(&def.id, *room, def.shared);
            let completed = progress.completed(&instance);
            entries.push(TaskEntry {
                label: format!("{} ({})", def.name, room.as_str()),
                completed,
                total: def.sub_units,
                room: *room,
                in_active_room: *room == active,
                done: completed >= def.sub_units,
            });
        }
    }
    entries.sort_by_key(|entry| !entry.in_active_room);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_units_follow_catalog_order() {
        let catalog = ChoreCatalog::default();
        let progress = ChoreProgress::default();
        let units = pending_units(&catalog, &progress, RoomId::Kitchen);
        // kitchen hosts the dish stack and its floors instance
        let chores: Vec<&str> = units.iter().map(|u| u.chore.as_str()).collect();
        assert!(chores.contains(&"dishes"));
        assert!(units
            .iter()
            .any(|u| u.instance.as_str() == "floors:kitchen"));
        let dishes_pos = chores.iter().position(|c| *c == "dishes").unwrap();
        let floors_pos = chores.iter().position(|c| *c == "floors").unwrap();
        assert!(dishes_pos < floors_pos);
    }

    #[test]
    fn finished_units_drop_out() {
        let catalog = ChoreCatalog::default();
        let mut progress = ChoreProgress::default();
        let before = pending_units(&catalog, &progress, RoomId::Kitchen).len();
        progress.record(&InstanceId::new("dishes"), 0, 1);
        let after = pending_units(&catalog, &progress, RoomId::Kitchen).len();
        assert_eq!(after, before - 1);
    }

    #[test]
    fn active_room_tasks_sort_first() {
        let catalog = ChoreCatalog::default();
        let progress = ChoreProgress::default();
        let entries = task_summary(&catalog, &progress, RoomId::Bathroom);
        let first_outside = entries
            .iter()
            .position(|e| !e.in_active_room)
            .unwrap_or(entries.len());
        assert!(entries[..first_outside].iter().all(|e| e.in_active_room));
        assert!(entries[first_outside..].iter().all(|e| !e.in_active_room));
        assert!(first_outside > 0);
    }

    #[test]
    fn completed_instances_stay_listed_as_done() {
        let catalog = ChoreCatalog::default();
        let mut progress = ChoreProgress::default();
        for sub_unit in 0..5 {
            progress.record(&InstanceId::new("dishes"), sub_unit, 5);
        }
        let entries = task_summary(&catalog, &progress, RoomId::Kitchen);
        let dishes: Vec<_> = entries
            .iter()
            .filter(|e| e.label.starts_with("Dish Dynamo"))
            .collect();
        assert_eq!(dishes.len(), 1);
        assert_eq!(dishes[0].completed, 5);
        assert!(dishes[0].done);
    }

    #[test]
    fn summary_covers_every_chore_room_pair() {
        let catalog = ChoreCatalog::default();
        let progress = ChoreProgress::default();
        let entries = task_summary(&catalog, &progress, RoomId::Kitchen);
        let expected: usize = catalog.iter().map(|def| def.rooms.len()).sum();
        assert_eq!(entries.len(), expected);
        assert!(entries.iter().all(|e| !e.done));
    }

    #[test]
    fn shared_chores_report_per_room_progress() {
        let catalog = ChoreCatalog::default();
        let mut progress = ChoreProgress::default();
        let floors = ChoreId::new("floors");
        let kitchen = InstanceId::derive(&floors, RoomId::Kitchen, true);
        for sub_unit in 0..4 {
            progress.record(&kitchen, sub_unit, 4);
        }
        let entries = task_summary(&catalog, &progress, RoomId::Kitchen);
        // the kitchen instance is done, the other three rooms remain open
        let floor_entries: Vec<_> = entries
            .iter()
            .filter(|e| e.label.starts_with("Floor Polish"))
            .collect();
        assert_eq!(floor_entries.len(), 4);
        let (done, open): (Vec<_>, Vec<_>) =
            floor_entries.into_iter().partition(|e| e.done);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].room, RoomId::Kitchen);
        assert!(open.iter().all(|e| e.room != RoomId::Kitchen));
    }
}
