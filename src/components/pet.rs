use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker for the single pet entity.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Pet;

#[derive(Component, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetName(pub String);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
    Rabbit,
}

impl Species {
    pub fn as_str(self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
            Species::Rabbit => "rabbit",
        }
    }

    pub fn from_str(value: &str) -> Option<Species> {
        match value {
            "dog" => Some(Species::Dog),
            "cat" => Some(Species::Cat),
            "rabbit" => Some(Species::Rabbit),
            _ => None,
        }
    }
}
