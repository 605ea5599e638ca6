use bevy_ecs::prelude::*;
use bevy_ecs::schedule::SystemSet;

use crate::core::action::ActionQueue;
use crate::data::chores::ChoreCatalog;
use crate::data::config::GameConfig;
use crate::simulation::chores::ChoreProgress;
use crate::simulation::economy::Wallet;
use crate::simulation::inventory::Inventory;
use crate::simulation::rooms::RoomState;
use crate::simulation::stats::Vitals;
use crate::simulation::time::SessionClock;
use crate::systems::decay::{decay_system, low_stat_warning_system, DecayClock, WarningEdges};
use crate::systems::interaction::{clear_logs_system, interaction_system};
use crate::systems::notifications::{GameEventLog, NotificationLog};
use crate::systems::placeholders::placeholder_sync_system;

/// Canonical ordering for one schedule run.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum TickSet {
    Intake,
    Simulation,
    Cleanup,
}

/// Build the ECS world with baseline resources.
pub fn create_world(config: GameConfig, catalog: ChoreCatalog) -> World {
    let mut world = World::new();
    world.insert_resource(config);
    world.insert_resource(catalog);
    world.insert_resource(Vitals::default());
    world.insert_resource(Wallet::default());
    world.insert_resource(Inventory::default());
    world.insert_resource(ChoreProgress::default());
    world.insert_resource(RoomState::default());
    world.insert_resource(SessionClock::default());
    world.insert_resource(ActionQueue::default());
    world.insert_resource(DecayClock::default());
    world.insert_resource(WarningEdges::default());
    world.insert_resource(NotificationLog::default());
    world.insert_resource(GameEventLog::default());
    world
}

/// Build the system schedule in the canonical order.
pub fn create_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.configure_sets(
        (TickSet::Intake, TickSet::Simulation, TickSet::Cleanup).chain(),
    );

    schedule.add_systems((
        (clear_logs_system, interaction_system)
            .chain()
            .in_set(TickSet::Intake),
        decay_system.in_set(TickSet::Simulation),
        low_stat_warning_system.in_set(TickSet::Cleanup),
        placeholder_sync_system.in_set(TickSet::Cleanup),
    ));

    schedule
}
