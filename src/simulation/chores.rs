use std::collections::BTreeSet;
use std::fmt;

use bevy_ecs::prelude::*;
use bevy_utils::HashMap;
use serde::{Deserialize, Serialize};

use crate::data::chores::ChoreCatalog;
use crate::simulation::economy::{Money, Wallet};
use crate::simulation::rooms::RoomId;
use crate::simulation::stats::Vitals;

/// Catalog key for a chore definition, e.g. `"dishes"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoreId(pub String);

impl ChoreId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Progress key for one tracked unit of work. Room-scoped chores use the
/// chore id itself; household chores get one instance per room,
/// `"{chore}:{room}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn derive(chore: &ChoreId, room: RoomId, shared: bool) -> Self {
        if shared {
            Self(format!("{}:{}", chore.0, room.as_str()))
        } else {
            Self(chore.0.clone())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionRecord {
    /// Sub-units done for the instance after this record.
    pub completed: u32,
    /// True exactly once, on the record that finishes the instance.
    pub just_finished: bool,
}

/// Which sub-units have been completed, per chore instance. Sub-units land
/// in any order and recording one twice changes nothing.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoreProgress {
    completed: HashMap<InstanceId, BTreeSet<u32>>,
}

impl ChoreProgress {
    pub fn is_done(&self, instance: &InstanceId, sub_unit: u32) -> bool {
        self.completed
            .get(instance)
            .map_or(false, |set| set.contains(&sub_unit))
    }

    pub fn completed(&self, instance: &InstanceId) -> u32 {
        self.completed.get(instance).map_or(0, |set| set.len() as u32)
    }

    pub fn record(&mut self, instance: &InstanceId, sub_unit: u32, sub_units: u32) -> CompletionRecord {
        let set = self.completed.entry(instance.clone()).or_default();
        let inserted = set.insert(sub_unit);
        let completed = set.len() as u32;
        CompletionRecord {
            completed,
            just_finished: inserted && completed == sub_units,
        }
    }

    pub fn reset(&mut self) {
        self.completed.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InstanceId, &BTreeSet<u32>)> {
        self.completed.iter()
    }

    /// Rebuilds progress from persisted data, replacing anything held.
    pub fn restore(&mut self, entries: impl IntoIterator<Item = (InstanceId, u32)>) {
        self.completed.clear();
        for (instance, sub_unit) in entries {
            self.completed.entry(instance).or_default().insert(sub_unit);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoreFinish {
    pub reward: Money,
    pub lesson: String,
}

/// What one chore interaction did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoreOutcome {
    /// Unknown chore, room mismatch, or out-of-range sub-unit. No effect.
    Ignored,
    AlreadyDone,
    TooTired,
    Advanced {
        completed: u32,
        finished: Option<ChoreFinish>,
    },
}

/// Applies one sub-unit of chore work. Energy is charged per sub-unit;
/// the reward and lesson are paid exactly once, on the finishing unit.
pub fn apply_chore_unit(
    catalog: &ChoreCatalog,
    progress: &mut ChoreProgress,
    vitals: &mut Vitals,
    wallet: &mut Wallet,
    chore: &ChoreId,
    instance: &InstanceId,
    sub_unit: u32,
) -> ChoreOutcome {
    let Ok(def) = catalog.definition(chore) else {
        return ChoreOutcome::Ignored;
    };
    if sub_unit >= def.sub_units {
        return ChoreOutcome::Ignored;
    }
    if progress.is_done(instance, sub_unit) {
        return ChoreOutcome::AlreadyDone;
    }
    let cost = def.per_unit_energy_cost() as f32;
    if vitals.energy < cost {
        return ChoreOutcome::TooTired;
    }
    vitals.energy = (vitals.energy - cost).max(0.0);
    let record = progress.record(instance, sub_unit, def.sub_units);
    let finished = record.just_finished.then(|| {
        let reward = def.effective_reward();
        wallet.money = wallet.money.add(reward);
        ChoreFinish {
            reward,
            lesson: def.lesson.clone(),
        }
    });
    ChoreOutcome::Advanced {
        completed: record.completed,
        finished,
    }
}
