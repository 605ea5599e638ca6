use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// The four navigable rooms of the home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomId {
    LivingRoom,
    Kitchen,
    Bedroom,
    Bathroom,
}

impl RoomId {
    pub const ALL: [RoomId; 4] = [
        RoomId::LivingRoom,
        RoomId::Kitchen,
        RoomId::Bedroom,
        RoomId::Bathroom,
    ];

    /// Stable string form used in tokens, JSON catalogs, and the save DB.
    pub fn as_str(self) -> &'static str {
        match self {
            RoomId::LivingRoom => "livingroom",
            RoomId::Kitchen => "kitchen",
            RoomId::Bedroom => "bedroom",
            RoomId::Bathroom => "bathroom",
        }
    }

    pub fn from_str(value: &str) -> Option<RoomId> {
        match value {
            "livingroom" => Some(RoomId::LivingRoom),
            "kitchen" => Some(RoomId::Kitchen),
            "bedroom" => Some(RoomId::Bedroom),
            "bathroom" => Some(RoomId::Bathroom),
            _ => None,
        }
    }
}

/// Where a door can lead: another room, or the off-screen work trip.
/// `changeRoom:work` never changes the active room; it triggers the work
/// transition instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Room(RoomId),
    Work,
}

impl Destination {
    pub fn parse(value: &str) -> Option<Destination> {
        if value == "work" {
            return Some(Destination::Work);
        }
        RoomId::from_str(value).map(Destination::Room)
    }
}

/// Resource tracking the active room. Room changes never discard chore
/// progress.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomState {
    pub current: RoomId,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            current: RoomId::LivingRoom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_strings_round_trip() {
        for room in RoomId::ALL {
            assert_eq!(RoomId::from_str(room.as_str()), Some(room));
        }
        assert_eq!(RoomId::from_str("attic"), None);
    }

    #[test]
    fn work_is_a_destination_not_a_room() {
        assert_eq!(Destination::parse("work"), Some(Destination::Work));
        assert_eq!(
            Destination::parse("kitchen"),
            Some(Destination::Room(RoomId::Kitchen))
        );
        assert_eq!(Destination::parse("office"), None);
    }
}
