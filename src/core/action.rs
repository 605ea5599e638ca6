use bevy_ecs::prelude::*;

use crate::simulation::chores::{ChoreId, InstanceId};
use crate::simulation::economy::{ItemKind, Money};
use crate::simulation::rooms::Destination;

/// A player intent, parsed once at the boundary. Downstream code never
/// re-parses token strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    DoChore {
        chore: ChoreId,
        instance: InstanceId,
        sub_unit: u32,
    },
    ChangeRoom {
        destination: Destination,
    },
    CleanPet,
    Sleep,
    PlayWithToy,
    OpenMarket,
    OpenFridge,
    Buy {
        item: ItemKind,
    },
    Consume,
    Deposit {
        amount: Money,
    },
}

impl Action {
    /// Parses the wire form used by interactable placeholders, e.g.
    /// `doChore:floors:floors:kitchen:2` or `changeRoom:bedroom`.
    /// Instance ids may themselves contain `:`, so the sub-unit is taken
    /// from the right.
    pub fn parse(token: &str) -> Option<Action> {
        if let Some(rest) = token.strip_prefix("doChore:") {
            let (head, sub_unit) = rest.rsplit_once(':')?;
            let sub_unit = sub_unit.parse().ok()?;
            // the instance follows the chore id and may itself contain ':'
            let (chore, instance) = head.split_once(':')?;
            if chore.is_empty() || instance.is_empty() {
                return None;
            }
            return Some(Action::DoChore {
                chore: ChoreId::new(chore),
                instance: InstanceId::new(instance),
                sub_unit,
            });
        }
        if let Some(rest) = token.strip_prefix("changeRoom:") {
            return Some(Action::ChangeRoom {
                destination: Destination::parse(rest)?,
            });
        }
        match token {
            "cleanPet" => Some(Action::CleanPet),
            "sleep" => Some(Action::Sleep),
            "playWithToy" => Some(Action::PlayWithToy),
            "openMarket" => Some(Action::OpenMarket),
            "openFridge" => Some(Action::OpenFridge),
            _ => None,
        }
    }
}

/// Intents waiting for the next schedule run, drained in arrival order.
#[derive(Resource, Debug, Default)]
pub struct ActionQueue(pub Vec<Action>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::rooms::RoomId;

    #[test]
    fn parses_room_scoped_chore_tokens() {
        let action = Action::parse("doChore:dishes:dishes:3").unwrap();
        assert_eq!(
            action,
            Action::DoChore {
                chore: ChoreId::new("dishes"),
                instance: InstanceId::new("dishes"),
                sub_unit: 3,
            }
        );
    }

    #[test]
    fn parses_shared_chore_tokens_with_room_suffix() {
        let action = Action::parse("doChore:floors:floors:kitchen:2").unwrap();
        assert_eq!(
            action,
            Action::DoChore {
                chore: ChoreId::new("floors"),
                instance: InstanceId::new("floors:kitchen"),
                sub_unit: 2,
            }
        );
    }

    #[test]
    fn parses_room_changes_and_work() {
        assert_eq!(
            Action::parse("changeRoom:bedroom"),
            Some(Action::ChangeRoom {
                destination: Destination::Room(RoomId::Bedroom)
            })
        );
        assert_eq!(
            Action::parse("changeRoom:work"),
            Some(Action::ChangeRoom {
                destination: Destination::Work
            })
        );
    }

    #[test]
    fn parses_bare_verbs() {
        assert_eq!(Action::parse("sleep"), Some(Action::Sleep));
        assert_eq!(Action::parse("cleanPet"), Some(Action::CleanPet));
        assert_eq!(Action::parse("playWithToy"), Some(Action::PlayWithToy));
        assert_eq!(Action::parse("openMarket"), Some(Action::OpenMarket));
        assert_eq!(Action::parse("openFridge"), Some(Action::OpenFridge));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(Action::parse(""), None);
        assert_eq!(Action::parse("doChore:dishes"), None);
        assert_eq!(Action::parse("doChore:dishes:dishes:notanumber"), None);
        assert_eq!(Action::parse("changeRoom:attic"), None);
        assert_eq!(Action::parse("juggle"), None);
    }
}
