use std::collections::BTreeSet;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::simulation::stats::{Vitals, STAT_MAX};

/// Toys the household can own, one of each at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToyKind {
    Ball,
}

impl ToyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToyKind::Ball => "ball",
        }
    }

    pub fn from_str(value: &str) -> Option<ToyKind> {
        match value {
            "ball" => Some(ToyKind::Ball),
            _ => None,
        }
    }
}

/// Fridge stock and owned toys.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub food: u32,
    pub toys: BTreeSet<ToyKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumeRejection {
    NoFood,
}

/// Eat one portion of kibble. Hunger +40, happiness +5, both capped.
pub fn consume_food(inventory: &mut Inventory, vitals: &mut Vitals) -> Result<(), ConsumeRejection> {
    if inventory.food == 0 {
        return Err(ConsumeRejection::NoFood);
    }
    inventory.food -= 1;
    vitals.hunger = (vitals.hunger + 40.0).min(STAT_MAX);
    vitals.happiness = (vitals.happiness + 5.0).min(STAT_MAX);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eating_restores_hunger_and_cheers_up() {
        let mut inventory = Inventory {
            food: 2,
            ..Inventory::default()
        };
        let mut vitals = Vitals {
            hunger: 30.0,
            happiness: 50.0,
            ..Vitals::default()
        };
        consume_food(&mut inventory, &mut vitals).unwrap();
        assert_eq!(inventory.food, 1);
        assert_eq!(vitals.hunger, 70.0);
        assert_eq!(vitals.happiness, 55.0);
    }

    #[test]
    fn eating_caps_at_full() {
        let mut inventory = Inventory {
            food: 1,
            ..Inventory::default()
        };
        let mut vitals = Vitals {
            hunger: 90.0,
            happiness: 98.0,
            ..Vitals::default()
        };
        consume_food(&mut inventory, &mut vitals).unwrap();
        assert_eq!(vitals.hunger, STAT_MAX);
        assert_eq!(vitals.happiness, STAT_MAX);
    }

    #[test]
    fn empty_fridge_rejects_without_mutation() {
        let mut inventory = Inventory::default();
        let before = Vitals {
            hunger: 10.0,
            ..Vitals::default()
        };
        let mut vitals = before;
        assert_eq!(
            consume_food(&mut inventory, &mut vitals),
            Err(ConsumeRejection::NoFood)
        );
        assert_eq!(vitals, before);
    }
}
