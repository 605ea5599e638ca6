use std::fmt;
use std::fs;
use std::path::Path;

use bevy_ecs::prelude::*;
use bevy_utils::HashMap;
use serde::{Deserialize, Serialize};

use crate::simulation::chores::ChoreId;
use crate::simulation::economy::Money;
use crate::simulation::rooms::RoomId;

/// Static definition of one chore type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoreDef {
    pub id: ChoreId,
    pub name: String,
    pub lesson: String,
    pub action_label: String,
    pub rooms: Vec<RoomId>,
    /// Shared chores are replicated per room, each room tracking its own
    /// instance and paying an even share of the reward.
    #[serde(default)]
    pub shared: bool,
    pub sub_units: u32,
    pub energy_cost: u32,
    /// Total reward for finishing one instance, in cents.
    pub reward: Money,
}

impl ChoreDef {
    /// Reward actually paid when one instance finishes. Shared chores pay
    /// an even per-room share.
    pub fn effective_reward(&self) -> Money {
        if self.shared {
            self.reward.split(self.rooms.len())
        } else {
            self.reward
        }
    }

    /// Energy charged per sub-unit, never zero.
    pub fn per_unit_energy_cost(&self) -> u32 {
        (self.energy_cost.div_ceil(self.sub_units)).max(1)
    }
}

/// All chore definitions for a play session, in declaration order.
#[derive(Resource, Debug, Clone)]
pub struct ChoreCatalog {
    defs: Vec<ChoreDef>,
    index: HashMap<String, usize>,
}

#[derive(Debug)]
pub struct UnknownChoreError(pub String);

impl fmt::Display for UnknownChoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown chore {}", self.0)
    }
}

impl std::error::Error for UnknownChoreError {}

impl ChoreCatalog {
    pub fn new(defs: Vec<ChoreDef>) -> Result<Self, ChoreDataError> {
        let mut index = HashMap::default();
        for (position, def) in defs.iter().enumerate() {
            if def.id.as_str().trim().is_empty() {
                return Err(ChoreDataError::Validation(
                    "chore id cannot be empty".to_string(),
                ));
            }
            if def.rooms.is_empty() {
                return Err(ChoreDataError::Validation(format!(
                    "chore {} has no rooms",
                    def.id
                )));
            }
            if def.sub_units == 0 {
                return Err(ChoreDataError::Validation(format!(
                    "chore {} needs at least one sub-unit",
                    def.id
                )));
            }
            if def.energy_cost == 0 {
                return Err(ChoreDataError::Validation(format!(
                    "chore {} must cost energy",
                    def.id
                )));
            }
            if def.reward <= Money::zero() {
                return Err(ChoreDataError::Validation(format!(
                    "chore {} must pay a positive reward",
                    def.id
                )));
            }
            if !def.shared && def.rooms.len() > 1 {
                return Err(ChoreDataError::Validation(format!(
                    "chore {} spans rooms but is not shared",
                    def.id
                )));
            }
            // shared rewards pay per room, so the split must be exact
            if def.shared && def.reward.as_cents() % def.rooms.len() as i64 != 0 {
                return Err(ChoreDataError::Validation(format!(
                    "chore {} reward does not divide evenly across {} rooms",
                    def.id,
                    def.rooms.len()
                )));
            }
            if index.insert(def.id.as_str().to_string(), position).is_some() {
                return Err(ChoreDataError::Validation(format!(
                    "duplicate chore id {}",
                    def.id
                )));
            }
        }
        Ok(Self { defs, index })
    }

    pub fn definition(&self, id: &ChoreId) -> Result<&ChoreDef, UnknownChoreError> {
        self.index
            .get(id.as_str())
            .map(|position| &self.defs[*position])
            .ok_or_else(|| UnknownChoreError(id.as_str().to_string()))
    }

    /// Declaration-order position, used to keep placeholder listings stable.
    pub fn position(&self, id: &ChoreId) -> Option<usize> {
        self.index.get(id.as_str()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChoreDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

fn builtin_defs() -> Vec<ChoreDef> {
    use RoomId::*;
    let def = |id: &str,
               name: &str,
               lesson: &str,
               action_label: &str,
               rooms: Vec<RoomId>,
               shared: bool,
               sub_units: u32,
               energy_cost: u32,
               reward_dollars: i64| ChoreDef {
        id: ChoreId::new(id),
        name: name.to_string(),
        lesson: lesson.to_string(),
        action_label: action_label.to_string(),
        rooms,
        shared,
        sub_units,
        energy_cost,
        reward: Money::from_dollars(reward_dollars),
    };
    vec![
        def(
            "dishes",
            "Dish Dynamo",
            "Consistent, small-scale labor pays off!",
            "Scrubbing Dish",
            vec![Kitchen],
            false,
            5,
            10,
            5,
        ),
        def(
            "dusting",
            "Dusting the Hub",
            "Low-effort, entry-level work builds savings.",
            "Dusting",
            vec![LivingRoom],
            false,
            3,
            5,
            3,
        ),
        def(
            "recycling",
            "Recycling Sort",
            "Sustainability and organization are valuable skills.",
            "Sorting Recycling",
            vec![LivingRoom],
            false,
            1,
            12,
            7,
        ),
        def(
            "floors",
            "Floor Polish",
            "Large-scale tasks take time but pay better.",
            "Polishing Floor",
            vec![LivingRoom, Kitchen, Bedroom, Bathroom],
            true,
            4,
            15,
            10,
        ),
        def(
            "laundry",
            "Laundry Specialist",
            "Cleanliness and order contribute to household value.",
            "Folding Laundry",
            vec![Bedroom],
            false,
            3,
            10,
            6,
        ),
        def(
            "windows",
            "Window Clarity",
            "Maintaining assets increases their longevity.",
            "Cleaning Window",
            vec![LivingRoom, Bedroom],
            true,
            2,
            12,
            8,
        ),
        def(
            "mirror",
            "Mirror Shine",
            "Attention to detail matters in small tasks.",
            "Wiping Mirror",
            vec![Bathroom],
            false,
            4,
            5,
            4,
        ),
    ]
}

impl Default for ChoreCatalog {
    fn default() -> Self {
        Self::new(builtin_defs()).expect("builtin chore catalog is valid")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoreCatalogFile {
    pub schema_version: u32,
    pub chores: Vec<ChoreDef>,
}

#[derive(Debug)]
pub enum ChoreDataError {
    Io { path: String, source: std::io::Error },
    Json { path: String, source: serde_json::Error },
    Validation(String),
}

impl fmt::Display for ChoreDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChoreDataError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path, source)
            }
            ChoreDataError::Json { path, source } => {
                write!(f, "failed to parse {}: {}", path, source)
            }
            ChoreDataError::Validation(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ChoreDataError {}

pub fn load_chore_catalog(path: impl AsRef<Path>) -> Result<ChoreCatalog, ChoreDataError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ChoreDataError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let file: ChoreCatalogFile = serde_json::from_str(&raw).map_err(|source| ChoreDataError::Json {
        path: path.display().to_string(),
        source,
    })?;
    ChoreCatalog::new(file.chores)
}
