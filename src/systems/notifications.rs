use bevy_ecs::prelude::*;

use crate::simulation::chores::{ChoreId, InstanceId};
use crate::simulation::economy::{ItemKind, Money};
use crate::simulation::rooms::RoomId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// A player-facing toast line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Notifications produced by the current schedule run. Cleared at the start
/// of intake so each snapshot only carries fresh lines.
#[derive(Resource, Debug, Default)]
pub struct NotificationLog(pub Vec<Notification>);

impl NotificationLog {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.0.push(Notification {
            message: message.into(),
            severity,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    TooTiredForChore,
    TooTiredToPlay,
    TooTiredToWork,
    TooSadToWork,
    NotEnoughMoney,
    AlreadyOwned,
    NoFood,
}

/// Structured record of what the simulation did, for frontends that want
/// more than toast text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    SubUnitCompleted {
        chore: ChoreId,
        instance: InstanceId,
        sub_unit: u32,
    },
    ChoreCompleted {
        chore: ChoreId,
        reward: Money,
    },
    RoomChanged {
        room: RoomId,
    },
    Slept,
    Cleaned,
    Played,
    Worked {
        earned: Money,
    },
    Purchased {
        item: ItemKind,
    },
    FoodConsumed,
    DepositAccepted {
        amount: Money,
    },
    GoalReached,
    MarketOpened,
    FridgeOpened,
    ActionRejected {
        reason: RejectReason,
    },
}

/// Events produced by the current schedule run, cleared alongside the
/// notification log.
#[derive(Resource, Debug, Default)]
pub struct GameEventLog(pub Vec<GameEvent>);
