//src/items/src/lib.rs
//! Pickups found on the board: weapons and one-shot bonuses.

pub use crate::bonus::{Bonus, BonusKind, BonusOutcome, BonusTarget};
pub use crate::weapon::{AmmoKind, Weapon, WeaponClass, WeaponKind};

pub mod bonus;
pub mod weapon;
