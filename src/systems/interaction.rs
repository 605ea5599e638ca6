use bevy_ecs::prelude::*;

use crate::components::pet::PetName;
use crate::core::action::{Action, ActionQueue};
use crate::data::chores::ChoreCatalog;
use crate::data::config::GameConfig;
use crate::simulation::chores::{apply_chore_unit, ChoreOutcome, ChoreProgress};
use crate::simulation::economy::{
    buy, deposit, work, DepositOutcome, ItemKind, PurchaseReceipt, PurchaseRejection, Wallet,
    WorkRejection,
};
use crate::simulation::inventory::{consume_food, ConsumeRejection, Inventory};
use crate::simulation::rooms::{Destination, RoomState};
use crate::simulation::stats::Vitals;
use crate::systems::notifications::{
    GameEvent, GameEventLog, NotificationLog, RejectReason, Severity,
};

/// Drops everything the previous run reported. Runs first in intake so the
/// snapshot after this run only carries what this run produced.
pub fn clear_logs_system(
    mut notifications: ResMut<NotificationLog>,
    mut events: ResMut<GameEventLog>,
) {
    notifications.0.clear();
    events.0.clear();
}

/// Drains the action queue and applies each intent in arrival order.
#[allow(clippy::too_many_arguments)]
pub fn interaction_system(
    mut queue: ResMut<ActionQueue>,
    mut vitals: ResMut<Vitals>,
    mut wallet: ResMut<Wallet>,
    mut inventory: ResMut<Inventory>,
    mut progress: ResMut<ChoreProgress>,
    mut room: ResMut<RoomState>,
    catalog: Res<ChoreCatalog>,
    config: Res<GameConfig>,
    mut notifications: ResMut<NotificationLog>,
    mut events: ResMut<GameEventLog>,
    pets: Query<&PetName>,
) {
    let pet_name = pets
        .get_single()
        .map(|name| name.0.clone())
        .unwrap_or_default();
    for action in queue.0.drain(..) {
        match action {
            Action::DoChore {
                chore,
                instance,
                sub_unit,
            } => {
                let outcome = apply_chore_unit(
                    &catalog,
                    &mut progress,
                    &mut vitals,
                    &mut wallet,
                    &chore,
                    &instance,
                    sub_unit,
                );
                match outcome {
                    ChoreOutcome::Ignored | ChoreOutcome::AlreadyDone => {}
                    ChoreOutcome::TooTired => {
                        notifications
                            .push(Severity::Warning, "Too tired! Sleep to restore energy.");
                        events.0.push(GameEvent::ActionRejected {
                            reason: RejectReason::TooTiredForChore,
                        });
                    }
                    ChoreOutcome::Advanced { finished, .. } => {
                        // definition() cannot fail here, Ignored covers that
                        if let Ok(def) = catalog.definition(&chore) {
                            notifications
                                .push(Severity::Info, format!("{}...", def.action_label));
                        }
                        events.0.push(GameEvent::SubUnitCompleted {
                            chore: chore.clone(),
                            instance,
                            sub_unit,
                        });
                        if let Some(finish) = finished {
                            notifications.push(
                                Severity::Success,
                                format!("Task Complete! +{}", finish.reward),
                            );
                            notifications.push(Severity::Info, finish.lesson);
                            events.0.push(GameEvent::ChoreCompleted {
                                chore,
                                reward: finish.reward,
                            });
                        }
                    }
                }
            }
            Action::ChangeRoom { destination } => match destination {
                Destination::Work => match work(&mut vitals, &mut wallet, config.salary) {
                    Ok(earned) => {
                        notifications.push(
                            Severity::Success,
                            format!("Worked hard! Earned {}. Happiness -10", earned),
                        );
                        events.0.push(GameEvent::Worked { earned });
                    }
                    Err(WorkRejection::TooTired) => {
                        notifications.push(Severity::Warning, "Too tired to work!");
                        events.0.push(GameEvent::ActionRejected {
                            reason: RejectReason::TooTiredToWork,
                        });
                    }
                    Err(WorkRejection::TooSad) => {
                        notifications.push(Severity::Error, "Too depressed to work...");
                        events.0.push(GameEvent::ActionRejected {
                            reason: RejectReason::TooSadToWork,
                        });
                    }
                },
                Destination::Room(next) => {
                    room.current = next;
                    notifications.push(Severity::Info, format!("Entered {}", next.as_str()));
                    events.0.push(GameEvent::RoomChanged { room: next });
                }
            },
            Action::CleanPet => {
                vitals.bathe();
                notifications.push(Severity::Success, "Squeaky clean!");
                events.0.push(GameEvent::Cleaned);
            }
            Action::Sleep => {
                vitals.sleep();
                notifications.push(Severity::Success, "Zzz... Rested up! Energy 100");
                events.0.push(GameEvent::Slept);
            }
            Action::PlayWithToy => {
                if vitals.play() {
                    notifications.push(Severity::Success, "Played with Toy! Happiness +20");
                    events.0.push(GameEvent::Played);
                } else {
                    notifications.push(
                        Severity::Warning,
                        format!("{} is too tired to play!", pet_name),
                    );
                    events.0.push(GameEvent::ActionRejected {
                        reason: RejectReason::TooTiredToPlay,
                    });
                }
            }
            Action::OpenMarket => {
                events.0.push(GameEvent::MarketOpened);
            }
            Action::OpenFridge => {
                events.0.push(GameEvent::FridgeOpened);
            }
            Action::Buy { item } => {
                let cost = match item {
                    ItemKind::Kibble => config.kibble_price,
                    ItemKind::Ball => config.ball_price,
                };
                match buy(&mut wallet, &mut inventory, item, cost) {
                    Ok(PurchaseReceipt::Kibble { stock }) => {
                        notifications
                            .push(Severity::Success, format!("Bought Kibble! Stock: {}", stock));
                        events.0.push(GameEvent::Purchased { item });
                    }
                    Ok(PurchaseReceipt::Ball) => {
                        notifications
                            .push(Severity::Success, "Bought Bouncy Ball! Check Living Room.");
                        events.0.push(GameEvent::Purchased { item });
                    }
                    Err(PurchaseRejection::NotEnoughMoney) => {
                        notifications.push(Severity::Error, "Not enough money!");
                        events.0.push(GameEvent::ActionRejected {
                            reason: RejectReason::NotEnoughMoney,
                        });
                    }
                    Err(PurchaseRejection::AlreadyOwned) => {
                        notifications.push(Severity::Warning, "You already have this toy!");
                        events.0.push(GameEvent::ActionRejected {
                            reason: RejectReason::AlreadyOwned,
                        });
                    }
                }
            }
            Action::Consume => match consume_food(&mut inventory, &mut vitals) {
                Ok(()) => {
                    notifications.push(Severity::Success, "Yum! Hunger +40, Happiness +5");
                    events.0.push(GameEvent::FoodConsumed);
                }
                Err(ConsumeRejection::NoFood) => {
                    notifications.push(Severity::Error, "No food in fridge!");
                    events.0.push(GameEvent::ActionRejected {
                        reason: RejectReason::NoFood,
                    });
                }
            },
            Action::Deposit { amount } => {
                // invalid deposits stay silent, matching the bank form
                match deposit(&mut wallet, amount, config.savings_goal) {
                    DepositOutcome::Rejected => {}
                    DepositOutcome::Accepted { goal_reached } => {
                        events.0.push(GameEvent::DepositAccepted { amount });
                        if goal_reached {
                            notifications.push(Severity::Success, "GOAL REACHED! Hat unlocked!");
                            events.0.push(GameEvent::GoalReached);
                        }
                    }
                }
            }
        }
    }
}
