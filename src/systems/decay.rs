use bevy_ecs::prelude::*;

use crate::components::pet::PetName;
use crate::data::config::GameConfig;
use crate::simulation::stats::Vitals;
use crate::simulation::time::SessionClock;
use crate::systems::notifications::{NotificationLog, Severity};

/// Stats this low get a one-shot warning toast.
pub const LOW_STAT_THRESHOLD: f32 = 20.0;

/// Decay ticks queued since the last schedule run. Action-only runs leave
/// this at zero so vitals stay put.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DecayClock {
    pub pending: u32,
}

/// Edge state for low-stat warnings. A warning fires when the stat crosses
/// below the threshold and re-arms only after it recovers.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WarningEdges {
    pub hunger_warned: bool,
    pub energy_warned: bool,
}

pub fn decay_system(
    mut clock: ResMut<DecayClock>,
    mut vitals: ResMut<Vitals>,
    mut session: ResMut<SessionClock>,
    config: Res<GameConfig>,
) {
    if clock.pending == 0 {
        return;
    }
    for _ in 0..clock.pending {
        vitals.decay(&config.decay);
        session.advance();
    }
    clock.pending = 0;
}

pub fn low_stat_warning_system(
    vitals: Res<Vitals>,
    mut edges: ResMut<WarningEdges>,
    mut log: ResMut<NotificationLog>,
    pets: Query<&PetName>,
) {
    let Ok(name) = pets.get_single() else {
        return;
    };
    if vitals.hunger < LOW_STAT_THRESHOLD {
        if !edges.hunger_warned {
            edges.hunger_warned = true;
            log.push(Severity::Warning, format!("{} is hungry!", name.0));
        }
    } else {
        edges.hunger_warned = false;
    }
    if vitals.energy < LOW_STAT_THRESHOLD {
        if !edges.energy_warned {
            edges.energy_warned = true;
            log.push(Severity::Warning, format!("{} is tired!", name.0));
        }
    } else {
        edges.energy_warned = false;
    }
}
