use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::pet::{PetName, Species};
use crate::simulation::chores::{ChoreProgress, InstanceId};
use crate::simulation::economy::{Money, Wallet};
use crate::simulation::inventory::{Inventory, ToyKind};
use crate::simulation::rooms::{RoomId, RoomState};
use crate::simulation::stats::Vitals;
use crate::simulation::time::SessionClock;

/// Flat, serializable record of a whole play session. Chore progress is
/// stored as instance id to sorted sub-unit indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    #[serde(default = "default_save_version")]
    pub version: u32,
    pub pet_name: String,
    pub species: Species,
    pub room: RoomId,
    pub tick: u64,
    pub vitals: Vitals,
    pub money: Money,
    pub savings: Money,
    pub hat_unlocked: bool,
    pub food: u32,
    #[serde(default)]
    pub toys: BTreeSet<ToyKind>,
    #[serde(default)]
    pub progress: BTreeMap<String, Vec<u32>>,
}

fn default_save_version() -> u32 {
    1
}

impl Default for SaveState {
    fn default() -> Self {
        let wallet = Wallet::default();
        Self {
            version: default_save_version(),
            pet_name: "Buddy".to_string(),
            species: Species::Dog,
            room: RoomId::LivingRoom,
            tick: 0,
            vitals: Vitals::default(),
            money: wallet.money,
            savings: wallet.savings,
            hat_unlocked: false,
            food: 0,
            toys: BTreeSet::new(),
            progress: BTreeMap::new(),
        }
    }
}

/// Extract a serializable snapshot of the world.
pub fn extract_state_from_world(world: &World, pet: Entity) -> SaveState {
    let pet_name = world
        .get::<PetName>(pet)
        .map(|name| name.0.clone())
        .unwrap_or_default();
    let species = world.get::<Species>(pet).copied().unwrap_or(Species::Dog);
    let vitals = *world.resource::<Vitals>();
    let wallet = world.resource::<Wallet>();
    let inventory = world.resource::<Inventory>();

    let mut progress = BTreeMap::new();
    for (instance, sub_units) in world.resource::<ChoreProgress>().iter() {
        progress.insert(
            instance.as_str().to_string(),
            sub_units.iter().copied().collect(),
        );
    }

    SaveState {
        version: default_save_version(),
        pet_name,
        species,
        room: world.resource::<RoomState>().current,
        tick: world.resource::<SessionClock>().tick,
        vitals,
        money: wallet.money,
        savings: wallet.savings,
        hat_unlocked: wallet.hat_unlocked,
        food: inventory.food,
        toys: inventory.toys.clone(),
        progress,
    }
}

/// Apply a saved snapshot back into the world.
pub fn apply_state_to_world(state: SaveState, world: &mut World, pet: Entity) {
    match world.get_mut::<PetName>(pet) {
        Some(mut name) => name.0 = state.pet_name.clone(),
        None => {
            if let Some(mut ent) = world.get_entity_mut(pet) {
                ent.insert(PetName(state.pet_name.clone()));
            }
        }
    }
    match world.get_mut::<Species>(pet) {
        Some(mut species) => *species = state.species,
        None => {
            if let Some(mut ent) = world.get_entity_mut(pet) {
                ent.insert(state.species);
            }
        }
    }

    let mut vitals = state.vitals;
    vitals.clamp();
    *world.resource_mut::<Vitals>() = vitals;

    *world.resource_mut::<Wallet>() = Wallet {
        money: state.money,
        savings: state.savings,
        hat_unlocked: state.hat_unlocked,
    };
    *world.resource_mut::<Inventory>() = Inventory {
        food: state.food,
        toys: state.toys,
    };
    world.resource_mut::<RoomState>().current = state.room;
    world.resource_mut::<SessionClock>().tick = state.tick;

    world.resource_mut::<ChoreProgress>().restore(
        state.progress.into_iter().flat_map(|(instance, sub_units)| {
            let instance = InstanceId::new(instance);
            sub_units
                .into_iter()
                .map(move |sub_unit| (instance.clone(), sub_unit))
        }),
    );
}

/// Serialize a save state into JSON for persistence.
pub fn save_state_to_json(state: &SaveState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(state)
}

/// Deserialize JSON back into a save state.
pub fn load_state_from_json(data: &str) -> serde_json::Result<SaveState> {
    serde_json::from_str(data)
}

/// Write a save state to a file path.
pub fn save_state_to_path<P: AsRef<Path>>(state: &SaveState, path: P) -> std::io::Result<()> {
    let json =
        save_state_to_json(state).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    fs::write(path, json)
}

/// Read a save state from a file path.
pub fn load_state_from_path<P: AsRef<Path>>(path: P) -> std::io::Result<SaveState> {
    let data = fs::read_to_string(&path)?;
    load_state_from_json(&data).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_state_round_trips_through_json() {
        let mut state = SaveState::default();
        state.pet_name = "Mochi".to_string();
        state.species = Species::Cat;
        state.room = RoomId::Bathroom;
        state.food = 3;
        state.toys.insert(ToyKind::Ball);
        state
            .progress
            .insert("floors:kitchen".to_string(), vec![0, 2, 3]);
        let json = save_state_to_json(&state).unwrap();
        let restored = load_state_from_json(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{
            "pet_name": "Rex",
            "species": "dog",
            "room": "kitchen",
            "tick": 12,
            "vitals": {"hunger": 80.0, "energy": 60.0, "hygiene": 70.0, "happiness": 90.0},
            "money": 20000,
            "savings": 0,
            "hat_unlocked": false,
            "food": 0
        }"#;
        let state = load_state_from_json(json).unwrap();
        assert_eq!(state.version, 1);
        assert!(state.toys.is_empty());
        assert!(state.progress.is_empty());
    }
}
