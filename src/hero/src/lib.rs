// src/hero/src/lib.rs
//! The player-controlled hero: stats, weapon, bag and pickups.

mod bag;
mod combat;
mod core;

use serde::{Deserialize, Serialize};

pub use self::{
    bag::{
        Bag, POUCH_CAPACITY,
        inventory::{Inventory, InventoryError},
    },
    core::{Hero, Pickup, tuning},
};

use items::{AmmoKind, BonusKind, WeaponKind};

/// Choices offered by the inventory menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryAction {
    UseMedkit(usize),
    UseRage(usize),
    UseAccuracy(usize),
    LoadArrows,
    LoadBullets,
}

/// Plain view of the equipped weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponView {
    pub kind: WeaponKind,
    pub name: String,
    pub max_damage: f32,
    pub ammo: Option<u32>,
    pub durability: Option<u32>,
}

/// Counts the renderer shows for the bag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub medkits: usize,
    pub rages: usize,
    pub accuracies: usize,
    pub reserved_arrows: u32,
    pub reserved_bullets: u32,
    pub weapon: WeaponView,
}

impl Hero {
    pub fn inventory(&self) -> InventorySnapshot {
        InventorySnapshot {
            medkits: self.bag.count(BonusKind::Medkit),
            rages: self.bag.count(BonusKind::Rage),
            accuracies: self.bag.count(BonusKind::Accuracy),
            reserved_arrows: self.bag.reserved(AmmoKind::Arrows),
            reserved_bullets: self.bag.reserved(AmmoKind::Bullets),
            weapon: WeaponView {
                kind: self.weapon.kind,
                name: self.weapon.name.clone(),
                max_damage: self.weapon.max_damage,
                ammo: self.weapon.ammo(),
                durability: self.weapon.durability(),
            },
        }
    }
}
