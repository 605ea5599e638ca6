use serde::{Deserialize, Serialize};

use crate::simulation::stats::Vitals;

/// Pet mood shown by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Hungry,
    Sleepy,
    Sad,
    Excited,
    Happy,
}

impl Mood {
    pub fn label(self) -> &'static str {
        match self {
            Mood::Hungry => "Hungry",
            Mood::Sleepy => "Sleepy",
            Mood::Sad => "Sad",
            Mood::Excited => "Excited",
            Mood::Happy => "Happy",
        }
    }
}

/// Derives the mood from the vitals. The first matching rule wins; the
/// order is part of the contract, not a priority score.
pub fn mood_for(vitals: &Vitals) -> Mood {
    if vitals.hunger < 30.0 {
        Mood::Hungry
    } else if vitals.energy < 20.0 {
        Mood::Sleepy
    } else if vitals.happiness < 30.0 {
        Mood::Sad
    } else if vitals.happiness > 80.0 && vitals.energy > 50.0 {
        Mood::Excited
    } else {
        Mood::Happy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals(hunger: f32, energy: f32, happiness: f32) -> Vitals {
        Vitals {
            hunger,
            energy,
            hygiene: 100.0,
            happiness,
        }
    }

    #[test]
    fn hunger_rule_fires_first() {
        // excited thresholds are also met, but hunger wins
        assert_eq!(mood_for(&vitals(20.0, 90.0, 90.0)), Mood::Hungry);
    }

    #[test]
    fn rule_order_is_first_match() {
        assert_eq!(mood_for(&vitals(50.0, 10.0, 10.0)), Mood::Sleepy);
        assert_eq!(mood_for(&vitals(50.0, 40.0, 10.0)), Mood::Sad);
        assert_eq!(mood_for(&vitals(50.0, 60.0, 90.0)), Mood::Excited);
        assert_eq!(mood_for(&vitals(50.0, 40.0, 90.0)), Mood::Happy);
        assert_eq!(mood_for(&vitals(50.0, 60.0, 60.0)), Mood::Happy);
    }
}
