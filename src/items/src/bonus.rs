//src/items/src/bonus.rs
use dice::Dice;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter};

use crate::weapon::AmmoKind;

/// One-shot pickups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Bonus {
    Medkit { power: f32 },
    Rage { multiplier: f32 },
    Accuracy { multiplier: f32 },
    Arrows { amount: u32 },
    Bullets { amount: u32 },
    Coins { amount: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum BonusKind {
    Medkit,
    Rage,
    Accuracy,
    Arrows,
    Bullets,
    Coins,
}

/// Whoever a bonus is applied to
pub trait BonusTarget {
    /// Heal and report how much was actually restored
    fn heal(&mut self, amount: f32) -> f32;

    /// Raise rage, returning the new total
    fn add_rage(&mut self, amount: f32) -> f32;

    /// Raise accuracy, returning the new total
    fn add_accuracy(&mut self, amount: f32) -> f32;

    /// Load into the equipped weapon if it fires `ammo`
    fn load_equipped(&mut self, ammo: AmmoKind, amount: u32) -> bool;

    /// Keep rounds for a weapon that is not equipped yet
    fn reserve_ammo(&mut self, ammo: AmmoKind, amount: u32);

    fn add_coins(&mut self, amount: u32);
}

/// What applying a bonus did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BonusOutcome {
    Healed(f32),
    RageRaised { by: f32, total: f32 },
    AccuracyRaised { by: f32, total: f32 },
    AmmoLoaded { ammo: AmmoKind, amount: u32 },
    AmmoReserved { ammo: AmmoKind, amount: u32 },
    CoinsGained(u32),
}

impl Bonus {
    pub fn kind(&self) -> BonusKind {
        match self {
            Bonus::Medkit { .. } => BonusKind::Medkit,
            Bonus::Rage { .. } => BonusKind::Rage,
            Bonus::Accuracy { .. } => BonusKind::Accuracy,
            Bonus::Arrows { .. } => BonusKind::Arrows,
            Bonus::Bullets { .. } => BonusKind::Bullets,
            Bonus::Coins { .. } => BonusKind::Coins,
        }
    }

    /// Bonuses that go into the bag until the player picks them from the menu
    pub fn is_stored(&self) -> bool {
        matches!(
            self,
            Bonus::Medkit { .. } | Bonus::Rage { .. } | Bonus::Accuracy { .. }
        )
    }

    /// Random pickup for board population
    pub fn random(dice: &mut dyn Dice) -> Self {
        match dice.range(0, 5) {
            0 => Bonus::Medkit {
                power: dice.range(20, 60) as f32,
            },
            1 => Bonus::Rage {
                multiplier: dice.range(1, 5) as f32 / 10.0,
            },
            2 => Bonus::Accuracy {
                multiplier: dice.range(1, 5) as f32 / 10.0,
            },
            3 => Bonus::Arrows {
                amount: dice.range(3, 10),
            },
            4 => Bonus::Bullets {
                amount: dice.range(2, 6),
            },
            _ => Bonus::Coins {
                amount: dice.range(10, 100),
            },
        }
    }

    /// Consume the bonus on `target`
    pub fn apply<T: BonusTarget + ?Sized>(self, target: &mut T) -> BonusOutcome {
        match self {
            Bonus::Medkit { power } => BonusOutcome::Healed(target.heal(power)),
            Bonus::Rage { multiplier } => BonusOutcome::RageRaised {
                by: multiplier,
                total: target.add_rage(multiplier),
            },
            Bonus::Accuracy { multiplier } => BonusOutcome::AccuracyRaised {
                by: multiplier,
                total: target.add_accuracy(multiplier),
            },
            Bonus::Arrows { amount } => load_or_reserve(target, AmmoKind::Arrows, amount),
            Bonus::Bullets { amount } => load_or_reserve(target, AmmoKind::Bullets, amount),
            Bonus::Coins { amount } => {
                target.add_coins(amount);
                BonusOutcome::CoinsGained(amount)
            }
        }
    }
}

fn load_or_reserve<T: BonusTarget + ?Sized>(
    target: &mut T,
    ammo: AmmoKind,
    amount: u32,
) -> BonusOutcome {
    if target.load_equipped(ammo, amount) {
        BonusOutcome::AmmoLoaded { ammo, amount }
    } else {
        target.reserve_ammo(ammo, amount);
        BonusOutcome::AmmoReserved { ammo, amount }
    }
}

impl fmt::Display for Bonus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bonus::Medkit { power } => write!(f, "Medkit (+{power} HP)"),
            Bonus::Rage { multiplier } => write!(f, "Rage (+{multiplier})"),
            Bonus::Accuracy { multiplier } => write!(f, "Accuracy (+{multiplier})"),
            Bonus::Arrows { amount } => write!(f, "{amount} arrows"),
            Bonus::Bullets { amount } => write!(f, "{amount} bullets"),
            Bonus::Coins { amount } => write!(f, "{amount} coins"),
        }
    }
}

impl fmt::Display for BonusOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BonusOutcome::Healed(hp) => write!(f, "Healed {hp} HP"),
            BonusOutcome::RageRaised { by, total } => write!(f, "Rage +{by} (now {total})"),
            BonusOutcome::AccuracyRaised { by, total } => {
                write!(f, "Accuracy +{by} (now {total})")
            }
            BonusOutcome::AmmoLoaded { ammo, amount } => write!(f, "Loaded {amount} {ammo}"),
            BonusOutcome::AmmoReserved { ammo, amount } => {
                write!(f, "Stored {amount} {ammo} for later")
            }
            BonusOutcome::CoinsGained(amount) => write!(f, "+{amount} coins"),
        }
    }
}
