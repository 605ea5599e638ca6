use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::config::DecayRates;

pub const STAT_MAX: f32 = 100.0;

/// Energy floor below which the pet refuses to play.
pub const PLAY_ENERGY_GATE: f32 = 10.0;

/// The pet's four care stats, each held in [0, 100].
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub hunger: f32,
    pub energy: f32,
    pub hygiene: f32,
    pub happiness: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            hunger: STAT_MAX,
            energy: STAT_MAX,
            hygiene: STAT_MAX,
            happiness: STAT_MAX,
        }
    }
}

impl Vitals {
    pub fn clamp(&mut self) {
        self.hunger = self.hunger.clamp(0.0, STAT_MAX);
        self.energy = self.energy.clamp(0.0, STAT_MAX);
        self.hygiene = self.hygiene.clamp(0.0, STAT_MAX);
        self.happiness = self.happiness.clamp(0.0, STAT_MAX);
    }

    /// One decay step. Happiness decays faster while the pet is hungry
    /// (x1.5 below 40) or dirty (x1.2 below 40); the multipliers stack.
    pub fn decay(&mut self, rates: &DecayRates) {
        self.hunger = (self.hunger - rates.hunger).max(0.0);
        self.energy = (self.energy - rates.energy).max(0.0);
        self.hygiene = (self.hygiene - rates.hygiene).max(0.0);

        let mut happiness_decay = rates.happiness;
        if self.hunger < 40.0 {
            happiness_decay *= 1.5;
        }
        if self.hygiene < 40.0 {
            happiness_decay *= 1.2;
        }
        self.happiness = (self.happiness - happiness_decay).max(0.0);
    }

    /// A night's sleep restores energy fully.
    pub fn sleep(&mut self) {
        self.energy = STAT_MAX;
    }

    /// A bath restores hygiene fully.
    pub fn bathe(&mut self) {
        self.hygiene = STAT_MAX;
    }

    /// Play lifts happiness at an energy price. Returns false (no change)
    /// when the pet is too tired.
    pub fn play(&mut self) -> bool {
        if self.energy < PLAY_ENERGY_GATE {
            return false;
        }
        self.happiness = (self.happiness + 20.0).min(STAT_MAX);
        self.energy = (self.energy - 10.0).max(0.0);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> DecayRates {
        DecayRates::default()
    }

    #[test]
    fn decay_never_leaves_bounds() {
        let mut vitals = Vitals::default();
        for _ in 0..1000 {
            vitals.decay(&rates());
            assert!(vitals.hunger >= 0.0 && vitals.hunger <= STAT_MAX);
            assert!(vitals.energy >= 0.0 && vitals.energy <= STAT_MAX);
            assert!(vitals.hygiene >= 0.0 && vitals.hygiene <= STAT_MAX);
            assert!(vitals.happiness >= 0.0 && vitals.happiness <= STAT_MAX);
        }
    }

    #[test]
    fn happiness_decay_multipliers_stack() {
        let mut hungry = Vitals {
            hunger: 30.0,
            hygiene: 90.0,
            ..Vitals::default()
        };
        hungry.decay(&rates());
        assert!((hungry.happiness - (100.0 - 0.5 * 1.5)).abs() < 1e-4);

        let mut hungry_and_dirty = Vitals {
            hunger: 30.0,
            hygiene: 30.0,
            ..Vitals::default()
        };
        // hygiene stays below 40 after one step, so both multipliers apply
        hungry_and_dirty.decay(&rates());
        assert!((hungry_and_dirty.happiness - (100.0 - 0.5 * 1.5 * 1.2)).abs() < 1e-4);
    }

    #[test]
    fn play_is_gated_on_energy() {
        let mut vitals = Vitals {
            energy: 9.0,
            happiness: 50.0,
            ..Vitals::default()
        };
        assert!(!vitals.play());
        assert_eq!(vitals.happiness, 50.0);
        assert_eq!(vitals.energy, 9.0);

        vitals.energy = 10.0;
        assert!(vitals.play());
        assert_eq!(vitals.happiness, 70.0);
        assert_eq!(vitals.energy, 0.0);
    }

    #[test]
    fn care_actions_restore_fully() {
        let mut vitals = Vitals {
            energy: 3.0,
            hygiene: 12.0,
            ..Vitals::default()
        };
        vitals.sleep();
        vitals.bathe();
        assert_eq!(vitals.energy, STAT_MAX);
        assert_eq!(vitals.hygiene, STAT_MAX);
    }
}
