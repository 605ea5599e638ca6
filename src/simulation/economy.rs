use std::fmt;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::simulation::inventory::{Inventory, ToyKind};
use crate::simulation::stats::Vitals;

/// Energy floor below which the pet is too tired to work.
pub const WORK_ENERGY_GATE: f32 = 20.0;
/// Happiness floor below which the pet is too depressed to work.
pub const WORK_HAPPINESS_GATE: f32 = 10.0;

/// Money in integer cents. Split rewards for household chores (e.g. $10
/// over four rooms) stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    pub fn from_dollars(dollars: i64) -> Self {
        Self {
            cents: dollars.saturating_mul(100),
        }
    }

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn as_cents(self) -> i64 {
        self.cents
    }

    pub fn add(self, other: Money) -> Self {
        Self {
            cents: self.cents.saturating_add(other.cents),
        }
    }

    pub fn sub(self, other: Money) -> Self {
        Self {
            cents: self.cents.saturating_sub(other.cents),
        }
    }

    /// An even per-part share. Catalog validation rejects shared rewards
    /// that do not divide without remainder, so shares always sum back to
    /// the whole.
    pub fn split(self, parts: usize) -> Self {
        if parts <= 1 {
            return self;
        }
        Self {
            cents: self.cents / parts as i64,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let dollars = (self.cents / 100).abs();
        let cents = (self.cents % 100).abs();
        write!(f, "{}${}.{:02}", sign, dollars, cents)
    }
}

/// Spending money, the savings balance, and the savings-goal latch.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub money: Money,
    pub savings: Money,
    /// One-way latch: set when savings first reach the goal, never cleared,
    /// even if savings later drop below it.
    pub hat_unlocked: bool,
}

impl Default for Wallet {
    fn default() -> Self {
        Self {
            money: Money::from_dollars(200),
            savings: Money::zero(),
            hat_unlocked: false,
        }
    }
}

/// Goods sold in the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Kibble,
    Ball,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Kibble => "kibble",
            ItemKind::Ball => "ball",
        }
    }

    pub fn from_str(value: &str) -> Option<ItemKind> {
        match value {
            "kibble" => Some(ItemKind::Kibble),
            "ball" => Some(ItemKind::Ball),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkRejection {
    TooTired,
    TooSad,
}

/// A shift at work: salary in, energy/hunger/happiness out. Rejections
/// mutate nothing.
pub fn work(
    vitals: &mut Vitals,
    wallet: &mut Wallet,
    salary: Money,
) -> Result<Money, WorkRejection> {
    if vitals.energy < WORK_ENERGY_GATE {
        return Err(WorkRejection::TooTired);
    }
    if vitals.happiness < WORK_HAPPINESS_GATE {
        return Err(WorkRejection::TooSad);
    }
    wallet.money = wallet.money.add(salary);
    vitals.energy = (vitals.energy - 15.0).max(0.0);
    vitals.hunger = (vitals.hunger - 10.0).max(0.0);
    vitals.happiness = (vitals.happiness - 10.0).max(0.0);
    Ok(salary)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseRejection {
    NotEnoughMoney,
    /// Toys are one-per-household; the cost is not charged.
    AlreadyOwned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseReceipt {
    Kibble { stock: u32 },
    Ball,
}

pub fn buy(
    wallet: &mut Wallet,
    inventory: &mut Inventory,
    item: ItemKind,
    cost: Money,
) -> Result<PurchaseReceipt, PurchaseRejection> {
    if wallet.money < cost {
        return Err(PurchaseRejection::NotEnoughMoney);
    }
    match item {
        ItemKind::Kibble => {
            wallet.money = wallet.money.sub(cost);
            inventory.food += 1;
            Ok(PurchaseReceipt::Kibble {
                stock: inventory.food,
            })
        }
        ItemKind::Ball => {
            if inventory.toys.contains(&ToyKind::Ball) {
                return Err(PurchaseRejection::AlreadyOwned);
            }
            wallet.money = wallet.money.sub(cost);
            inventory.toys.insert(ToyKind::Ball);
            Ok(PurchaseReceipt::Ball)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositOutcome {
    /// Non-positive amount or amount over the current balance; nothing
    /// changes and no notification is owed.
    Rejected,
    Accepted { goal_reached: bool },
}

pub fn deposit(wallet: &mut Wallet, amount: Money, goal: Money) -> DepositOutcome {
    if amount.as_cents() <= 0 || amount > wallet.money {
        return DepositOutcome::Rejected;
    }
    wallet.money = wallet.money.sub(amount);
    wallet.savings = wallet.savings.add(amount);
    let mut goal_reached = false;
    if wallet.savings >= goal && !wallet.hat_unlocked {
        wallet.hat_unlocked = true;
        goal_reached = true;
    }
    DepositOutcome::Accepted { goal_reached }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_splits_exactly_in_cents() {
        assert_eq!(Money::from_dollars(10).split(4), Money::from_cents(250));
        assert_eq!(Money::from_dollars(8).split(2), Money::from_dollars(4));
        assert_eq!(Money::from_dollars(5).split(1), Money::from_dollars(5));
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::from_cents(250).to_string(), "$2.50");
        assert_eq!(Money::from_dollars(200).to_string(), "$200.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
    }

    #[test]
    fn work_pays_salary_and_drains_stats() {
        let mut vitals = Vitals::default();
        let mut wallet = Wallet::default();
        let earned = work(&mut vitals, &mut wallet, Money::from_dollars(50)).unwrap();
        assert_eq!(earned, Money::from_dollars(50));
        assert_eq!(wallet.money, Money::from_dollars(250));
        assert_eq!(vitals.energy, 85.0);
        assert_eq!(vitals.hunger, 90.0);
        assert_eq!(vitals.happiness, 90.0);
    }

    #[test]
    fn work_rejections_mutate_nothing() {
        let tired = Vitals {
            energy: 19.0,
            ..Vitals::default()
        };
        let mut vitals = tired;
        let mut wallet = Wallet::default();
        assert_eq!(
            work(&mut vitals, &mut wallet, Money::from_dollars(50)),
            Err(WorkRejection::TooTired)
        );
        assert_eq!(vitals, tired);
        assert_eq!(wallet, Wallet::default());

        let sad = Vitals {
            happiness: 9.0,
            ..Vitals::default()
        };
        vitals = sad;
        assert_eq!(
            work(&mut vitals, &mut wallet, Money::from_dollars(50)),
            Err(WorkRejection::TooSad)
        );
        assert_eq!(vitals, sad);
        assert_eq!(wallet, Wallet::default());
    }

    #[test]
    fn buying_kibble_stocks_the_fridge() {
        let mut wallet = Wallet::default();
        let mut inventory = Inventory::default();
        let receipt = buy(
            &mut wallet,
            &mut inventory,
            ItemKind::Kibble,
            Money::from_dollars(10),
        )
        .unwrap();
        assert_eq!(receipt, PurchaseReceipt::Kibble { stock: 1 });
        assert_eq!(wallet.money, Money::from_dollars(190));
    }

    #[test]
    fn second_ball_is_rejected_without_charge() {
        let mut wallet = Wallet::default();
        let mut inventory = Inventory::default();
        let cost = Money::from_dollars(25);
        buy(&mut wallet, &mut inventory, ItemKind::Ball, cost).unwrap();
        let before = wallet.money;
        assert_eq!(
            buy(&mut wallet, &mut inventory, ItemKind::Ball, cost),
            Err(PurchaseRejection::AlreadyOwned)
        );
        assert_eq!(wallet.money, before);
        assert_eq!(inventory.toys.len(), 1);
    }

    #[test]
    fn purchase_rejected_when_broke() {
        let mut wallet = Wallet {
            money: Money::from_dollars(5),
            ..Wallet::default()
        };
        let mut inventory = Inventory::default();
        assert_eq!(
            buy(
                &mut wallet,
                &mut inventory,
                ItemKind::Kibble,
                Money::from_dollars(10)
            ),
            Err(PurchaseRejection::NotEnoughMoney)
        );
        assert_eq!(wallet.money, Money::from_dollars(5));
        assert_eq!(inventory.food, 0);
    }

    #[test]
    fn deposit_rejects_overdraft_then_accepts_full_balance() {
        let goal = Money::from_dollars(500);
        let mut wallet = Wallet::default();

        assert_eq!(
            deposit(&mut wallet, Money::from_dollars(500), goal),
            DepositOutcome::Rejected
        );
        assert_eq!(wallet, Wallet::default());

        assert_eq!(
            deposit(&mut wallet, Money::from_dollars(200), goal),
            DepositOutcome::Accepted {
                goal_reached: false
            }
        );
        assert_eq!(wallet.money, Money::zero());
        assert_eq!(wallet.savings, Money::from_dollars(200));
        assert!(!wallet.hat_unlocked);

        // same request again fails silently, nothing left to move
        assert_eq!(
            deposit(&mut wallet, Money::from_dollars(200), goal),
            DepositOutcome::Rejected
        );
        assert_eq!(wallet.savings, Money::from_dollars(200));
        assert!(!wallet.hat_unlocked);
    }

    #[test]
    fn hat_latch_is_one_way() {
        let goal = Money::from_dollars(500);
        let mut wallet = Wallet {
            money: Money::from_dollars(600),
            ..Wallet::default()
        };
        assert_eq!(
            deposit(&mut wallet, Money::from_dollars(500), goal),
            DepositOutcome::Accepted { goal_reached: true }
        );
        assert!(wallet.hat_unlocked);

        // reaching the goal again does not re-report it
        assert_eq!(
            deposit(&mut wallet, Money::from_dollars(100), goal),
            DepositOutcome::Accepted {
                goal_reached: false
            }
        );
        assert!(wallet.hat_unlocked);
    }

    #[test]
    fn non_positive_deposits_are_rejected() {
        let mut wallet = Wallet::default();
        assert_eq!(
            deposit(&mut wallet, Money::zero(), Money::from_dollars(500)),
            DepositOutcome::Rejected
        );
        assert_eq!(
            deposit(
                &mut wallet,
                Money::from_dollars(-5),
                Money::from_dollars(500)
            ),
            DepositOutcome::Rejected
        );
        assert_eq!(wallet, Wallet::default());
    }
}
