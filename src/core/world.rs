use std::path::Path;

use bevy_ecs::prelude::*;

use crate::components::interactable::ChoreTarget;
use crate::components::pet::{Pet, PetName, Species};
use crate::core::action::{Action, ActionQueue};
use crate::core::ecs::{create_schedule, create_world};
use crate::core::serialization::{
    apply_state_to_world, extract_state_from_world, load_state_from_path, save_state_to_path,
    SaveState,
};
use crate::data::chores::ChoreCatalog;
use crate::data::config::GameConfig;
use crate::simulation::chores::{ChoreId, ChoreProgress, InstanceId};
use crate::simulation::economy::{Money, Wallet};
use crate::simulation::inventory::{Inventory, ToyKind};
use crate::simulation::mood::{mood_for, Mood};
use crate::simulation::rooms::{RoomId, RoomState};
use crate::simulation::session::{task_summary, TaskEntry};
use crate::simulation::stats::Vitals;
use crate::simulation::time::SessionClock;
use crate::systems::decay::DecayClock;
use crate::systems::notifications::{GameEvent, GameEventLog, Notification, NotificationLog};

/// An open chore sub-unit the player can interact with right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTarget {
    pub chore: ChoreId,
    pub instance: InstanceId,
    pub sub_unit: u32,
    pub action_label: String,
}

impl PendingTarget {
    /// The wire token a frontend would attach to this placeholder.
    pub fn token(&self) -> String {
        format!(
            "doChore:{}:{}:{}",
            self.chore, self.instance, self.sub_unit
        )
    }
}

/// Data snapshot returned to the frontend after each run.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub pet_name: String,
    pub species: Species,
    pub room: RoomId,
    pub vitals: Vitals,
    pub mood: Mood,
    pub money: Money,
    pub savings: Money,
    pub hat_unlocked: bool,
    pub food_stock: u32,
    pub toys: Vec<ToyKind>,
    pub pending: Vec<PendingTarget>,
    pub tasks: Vec<TaskEntry>,
    pub notifications: Vec<Notification>,
    pub events: Vec<GameEvent>,
    pub tick: u64,
}

/// Wrapper around the ECS world and schedule.
pub struct Game {
    world: World,
    schedule: Schedule,
    pet: Entity,
}

impl Game {
    /// Create a fresh household with default tuning and the built-in
    /// chore catalog.
    pub fn new(name: impl Into<String>, species: Species) -> Self {
        Self::with_setup(name, species, GameConfig::default(), ChoreCatalog::default())
    }

    pub fn with_setup(
        name: impl Into<String>,
        species: Species,
        config: GameConfig,
        catalog: ChoreCatalog,
    ) -> Self {
        let mut world = create_world(config, catalog);
        let pet = spawn_pet(&mut world, name.into(), species);
        let schedule = create_schedule();
        let mut game = Self {
            world,
            schedule,
            pet,
        };
        // one idle run so placeholders exist before the first input
        game.run();
        game
    }

    /// Rebuild a household from a saved state.
    pub fn from_save(state: SaveState, config: GameConfig, catalog: ChoreCatalog) -> Self {
        let mut game = Self::with_setup(
            state.pet_name.clone(),
            state.species,
            config,
            catalog,
        );
        game.load_state(state);
        game
    }

    /// Apply one player intent and return the resulting snapshot.
    pub fn submit(&mut self, action: Action) -> Snapshot {
        self.world.resource_mut::<ActionQueue>().0.push(action);
        self.run()
    }

    /// Parse and apply a raw action token. Malformed tokens run an empty
    /// schedule pass, which still refreshes the snapshot.
    pub fn submit_token(&mut self, token: &str) -> Snapshot {
        if let Some(action) = Action::parse(token) {
            self.submit(action)
        } else {
            self.run()
        }
    }

    /// Advance the passage of time by one decay step.
    pub fn tick(&mut self) -> Snapshot {
        self.world.resource_mut::<DecayClock>().pending += 1;
        self.run()
    }

    fn run(&mut self) -> Snapshot {
        self.schedule.run(&mut self.world);
        Snapshot::capture(self.pet, &self.world)
    }

    /// Snapshot without advancing anything.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.pet, &self.world)
    }

    /// Wipe all chore progress at once.
    pub fn reset_progress(&mut self) -> Snapshot {
        self.world.resource_mut::<ChoreProgress>().reset();
        self.run()
    }

    /// Extract a serializable save state from the current world.
    pub fn save_state(&self) -> SaveState {
        extract_state_from_world(&self.world, self.pet)
    }

    /// Apply a saved state back into the live world.
    pub fn load_state(&mut self, state: SaveState) {
        apply_state_to_world(state, &mut self.world, self.pet);
        // resync placeholders with the restored progress
        self.run();
    }

    /// Save state directly to a file path.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        save_state_to_path(&self.save_state(), path)
    }

    /// Load state directly from a file path.
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
        let state = load_state_from_path(path)?;
        self.load_state(state);
        Ok(())
    }
}

pub(crate) fn spawn_pet(world: &mut World, name: String, species: Species) -> Entity {
    world.spawn((Pet, PetName(name), species)).id()
}


impl Snapshot {
    fn capture(pet: Entity, world: &World) -> Self {
        let pet_name = world
            .get::<PetName>(pet)
            .map(|name| name.0.clone())
            .unwrap_or_default();
        let species = world
            .get::<Species>(pet)
            .copied()
            .unwrap_or(Species::Dog);

        let vitals = *world.resource::<Vitals>();
        let wallet = world.resource::<Wallet>();
        let inventory = world.resource::<Inventory>();
        let room = world.resource::<RoomState>().current;
        let catalog = world.resource::<ChoreCatalog>();
        let progress = world.resource::<ChoreProgress>();

        let mut pending: Vec<PendingTarget> = world
            .iter_entities()
            .filter_map(|entity| {
                let target = entity.get::<ChoreTarget>()?;
                let label = catalog
                    .definition(&target.chore)
                    .map(|def| def.action_label.clone())
                    .unwrap_or_default();
                Some(PendingTarget {
                    chore: target.chore.clone(),
                    instance: target.instance.clone(),
                    sub_unit: target.sub_unit,
                    action_label: label,
                })
            })
            .collect();
        pending.sort_by_key(|target| {
            (
                catalog.position(&target.chore).unwrap_or(usize::MAX),
                target.sub_unit,
            )
        });

        let tasks = task_summary(catalog, progress, room);

        let notifications = world
            .get_resource::<NotificationLog>()
            .map(|log| log.0.clone())
            .unwrap_or_default();
        let events = world
            .get_resource::<GameEventLog>()
            .map(|log| log.0.clone())
            .unwrap_or_default();

        Snapshot {
            pet_name,
            species,
            room,
            vitals,
            mood: mood_for(&vitals),
            money: wallet.money,
            savings: wallet.savings,
            hat_unlocked: wallet.hat_unlocked,
            food_stock: inventory.food,
            toys: inventory.toys.iter().copied().collect(),
            pending,
            tasks,
            notifications,
            events,
            tick: world.resource::<SessionClock>().tick,
        }
    }
}
