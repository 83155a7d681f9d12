// src/hero/src/bag.rs
use serde::{Deserialize, Serialize};

use items::{AmmoKind, Bonus, BonusKind};

pub mod inventory;

use inventory::{Inventory, InventoryError};

/// Pouch capacity for each stored bonus kind
pub const POUCH_CAPACITY: usize = 8;

/// Unused pickups plus spare ammo that is not loaded into a weapon yet
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    medkits: Inventory<Bonus>,
    rages: Inventory<Bonus>,
    accuracies: Inventory<Bonus>,
    arrows: u32,
    bullets: u32,
}

impl Bag {
    pub fn new() -> Self {
        Self {
            medkits: Inventory::new(POUCH_CAPACITY),
            rages: Inventory::new(POUCH_CAPACITY),
            accuracies: Inventory::new(POUCH_CAPACITY),
            arrows: 0,
            bullets: 0,
        }
    }

    fn pouch(&self, kind: BonusKind) -> Option<&Inventory<Bonus>> {
        match kind {
            BonusKind::Medkit => Some(&self.medkits),
            BonusKind::Rage => Some(&self.rages),
            BonusKind::Accuracy => Some(&self.accuracies),
            _ => None,
        }
    }

    fn pouch_mut(&mut self, kind: BonusKind) -> Option<&mut Inventory<Bonus>> {
        match kind {
            BonusKind::Medkit => Some(&mut self.medkits),
            BonusKind::Rage => Some(&mut self.rages),
            BonusKind::Accuracy => Some(&mut self.accuracies),
            _ => None,
        }
    }

    /// Keep a medkit, rage or accuracy bonus for later
    pub fn store(&mut self, bonus: Bonus) -> Result<(), InventoryError> {
        match self.pouch_mut(bonus.kind()) {
            Some(pouch) => pouch.add(bonus),
            None => Err(InventoryError::NotStorable),
        }
    }

    /// Remove the `index`-th stored bonus of `kind`
    pub fn take(&mut self, kind: BonusKind, index: usize) -> Result<Bonus, InventoryError> {
        match self.pouch_mut(kind) {
            Some(pouch) => pouch.remove(index),
            None => Err(InventoryError::InvalidIndex { index, len: 0 }),
        }
    }

    /// Stored bonuses of `kind` in pickup order
    pub fn list(&self, kind: BonusKind) -> &[Bonus] {
        self.pouch(kind).map(Inventory::items).unwrap_or(&[])
    }

    /// No room left for another bonus of `kind`; never true for kinds that are not stored
    pub fn is_full(&self, kind: BonusKind) -> bool {
        self.pouch(kind).is_some_and(Inventory::is_full)
    }

    pub fn count(&self, kind: BonusKind) -> usize {
        match kind {
            BonusKind::Arrows | BonusKind::Bullets | BonusKind::Coins => 0,
            _ => self.list(kind).len(),
        }
    }

    pub fn reserve(&mut self, ammo: AmmoKind, amount: u32) {
        match ammo {
            AmmoKind::Arrows => self.arrows += amount,
            AmmoKind::Bullets => self.bullets += amount,
        }
    }

    pub fn reserved(&self, ammo: AmmoKind) -> u32 {
        match ammo {
            AmmoKind::Arrows => self.arrows,
            AmmoKind::Bullets => self.bullets,
        }
    }

    /// Empty the reserve of `ammo`, returning how much was there
    pub fn take_reserved(&mut self, ammo: AmmoKind) -> u32 {
        match ammo {
            AmmoKind::Arrows => std::mem::take(&mut self.arrows),
            AmmoKind::Bullets => std::mem::take(&mut self.bullets),
        }
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_only_menu_bonuses() {
        let mut bag = Bag::new();
        assert!(bag.store(Bonus::Medkit { power: 30.0 }).is_ok());
        assert!(bag.store(Bonus::Rage { multiplier: 0.2 }).is_ok());
        assert_eq!(
            bag.store(Bonus::Coins { amount: 5 }),
            Err(InventoryError::NotStorable)
        );
        assert_eq!(bag.count(BonusKind::Medkit), 1);
        assert_eq!(bag.count(BonusKind::Rage), 1);
        assert_eq!(bag.count(BonusKind::Accuracy), 0);
    }

    #[test]
    fn take_by_kind_and_index() {
        let mut bag = Bag::new();
        bag.store(Bonus::Medkit { power: 10.0 }).unwrap();
        bag.store(Bonus::Medkit { power: 50.0 }).unwrap();

        assert_eq!(bag.take(BonusKind::Medkit, 1), Ok(Bonus::Medkit { power: 50.0 }));
        assert_eq!(
            bag.take(BonusKind::Medkit, 1),
            Err(InventoryError::InvalidIndex { index: 1, len: 1 })
        );
        assert_eq!(bag.list(BonusKind::Medkit), &[Bonus::Medkit { power: 10.0 }]);
    }

    #[test]
    fn ammo_reserve_accumulates_and_empties() {
        let mut bag = Bag::new();
        bag.reserve(AmmoKind::Arrows, 4);
        bag.reserve(AmmoKind::Arrows, 3);
        bag.reserve(AmmoKind::Bullets, 2);

        assert_eq!(bag.reserved(AmmoKind::Arrows), 7);
        assert_eq!(bag.take_reserved(AmmoKind::Arrows), 7);
        assert_eq!(bag.reserved(AmmoKind::Arrows), 0);
        assert_eq!(bag.reserved(AmmoKind::Bullets), 2);
    }

    #[test]
    fn pouch_fills_up() {
        let mut bag = Bag::new();
        for _ in 0..POUCH_CAPACITY {
            bag.store(Bonus::Accuracy { multiplier: 0.1 }).unwrap();
        }
        assert!(bag.is_full(BonusKind::Accuracy));
        assert!(!bag.is_full(BonusKind::Medkit));
        assert!(!bag.is_full(BonusKind::Coins));
        assert_eq!(
            bag.store(Bonus::Accuracy { multiplier: 0.1 }),
            Err(InventoryError::Full)
        );
    }
}
