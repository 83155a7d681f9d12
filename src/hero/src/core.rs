// src/hero/src/core.rs
use serde::{Deserialize, Serialize};

use combat::enemy::level_scale;
use combat::{Health, Position, StatusEffects, StatusTick};
use error::GameError;
use items::{AmmoKind, Bonus, BonusKind, BonusOutcome, Weapon};

use crate::bag::Bag;
use crate::InventoryAction;

pub mod tuning {
    pub const BASE_HP: f32 = 150.0;
    pub const STARTING_LEVEL: u32 = 1;
    pub const STARTING_RAGE: f32 = 1.0;
    pub const STARTING_ACCURACY: f32 = 1.0;
}

/// What happened to a bonus the hero walked over
#[derive(Debug, Clone, PartialEq)]
pub enum Pickup {
    /// Went into the bag for later
    Stored(BonusKind),
    /// Took effect immediately
    Applied(BonusOutcome),
}

/// The player-controlled hero
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub lvl: u32,
    pub health: Health,
    pub weapon: Weapon,
    pub bag: Bag,
    pub coins: u32,
    /// Melee multiplier; only ever grows
    pub rage: f32,
    /// Ranged multiplier; only ever grows
    pub accuracy: f32,
    pub effects: StatusEffects,
    /// Set while an encounter is running
    pub fight: bool,
    pub position: Position,
}

impl Hero {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_level(name, tuning::STARTING_LEVEL)
    }

    pub fn with_level(name: impl Into<String>, lvl: u32) -> Self {
        Self {
            name: name.into(),
            lvl,
            health: Health::new(Self::max_hp_for(lvl)),
            weapon: Weapon::fist(),
            bag: Bag::new(),
            coins: 0,
            rage: tuning::STARTING_RAGE,
            accuracy: tuning::STARTING_ACCURACY,
            effects: StatusEffects::new(),
            fight: false,
            position: Position::default(),
        }
    }

    /// `150 * (1 + lvl / 10)`
    pub fn max_hp_for(lvl: u32) -> f32 {
        level_scale(tuning::BASE_HP, lvl)
    }

    /// Multiplier for the equipped weapon
    pub fn multiplier(&self) -> f32 {
        if self.weapon.is_ranged() {
            self.accuracy
        } else {
            self.rage
        }
    }

    /// Wield `weapon`, handing back the previous one unless it was the fist
    pub fn equip(&mut self, weapon: Weapon) -> Option<Weapon> {
        tracing::debug!(weapon = %weapon, "equipped");
        let old = std::mem::replace(&mut self.weapon, weapon);
        (!old.is_fallback()).then_some(old)
    }

    /// Drop an exhausted weapon for the fist; returns what was discarded
    pub fn ensure_weapon(&mut self) -> Option<Weapon> {
        if self.weapon.is_available() {
            return None;
        }
        tracing::debug!(weapon = %self.weapon, "weapon exhausted, back to fists");
        Some(std::mem::replace(&mut self.weapon, Weapon::fist()))
    }

    /// Walk over a bonus: menu bonuses are stored, the rest apply now
    pub fn pick_up(&mut self, bonus: Bonus) -> Result<Pickup, GameError> {
        if bonus.is_stored() {
            let kind = bonus.kind();
            self.bag.store(bonus)?;
            Ok(Pickup::Stored(kind))
        } else {
            Ok(Pickup::Applied(bonus.apply(self)))
        }
    }

    /// Use something from the inventory menu
    pub fn use_inventory(&mut self, action: InventoryAction) -> Result<BonusOutcome, GameError> {
        let (kind, index) = match action {
            InventoryAction::UseMedkit(index) => (BonusKind::Medkit, index),
            InventoryAction::UseRage(index) => (BonusKind::Rage, index),
            InventoryAction::UseAccuracy(index) => (BonusKind::Accuracy, index),
            InventoryAction::LoadArrows => return self.load_reserved(AmmoKind::Arrows),
            InventoryAction::LoadBullets => return self.load_reserved(AmmoKind::Bullets),
        };

        let bonus = self.bag.take(kind, index)?;
        Ok(bonus.apply(self))
    }

    /// Move spare ammo into the equipped weapon
    pub fn load_reserved(&mut self, ammo: AmmoKind) -> Result<BonusOutcome, GameError> {
        if self.weapon.ammo_kind() != Some(ammo) {
            return Err(GameError::NoMatchingWeapon {
                ammo: ammo.to_string(),
            });
        }

        let amount = self.bag.take_reserved(ammo);
        if amount == 0 {
            return Err(GameError::NoReservedAmmo {
                ammo: ammo.to_string(),
            });
        }

        self.weapon.load_ammo(ammo, amount);
        Ok(BonusOutcome::AmmoLoaded { ammo, amount })
    }

    /// Apply one turn of every running status effect
    pub fn tick_effects(&mut self) -> Vec<StatusTick> {
        self.effects.tick(&mut self.health)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat::StatusKind;
    use items::WeaponKind;

    #[test]
    fn new_hero_defaults() {
        let hero = Hero::new("Ada");
        assert_eq!(hero.lvl, 1);
        assert_eq!(hero.health.max_hp(), 165.0);
        assert_eq!(hero.health.hp(), 165.0);
        assert!(hero.weapon.is_fallback());
        assert_eq!((hero.rage, hero.accuracy), (1.0, 1.0));
        assert_eq!(hero.coins, 0);
        assert!(!hero.fight);
    }

    #[test]
    fn equipping_returns_previous_real_weapon() {
        let mut hero = Hero::new("Ada");
        assert_eq!(hero.equip(Weapon::new(WeaponKind::Sword)), None);
        let old = hero.equip(Weapon::new(WeaponKind::Axe));
        assert_eq!(old.map(|w| w.kind), Some(WeaponKind::Sword));
        assert_eq!(hero.weapon.kind, WeaponKind::Axe);
    }

    #[test]
    fn multiplier_follows_weapon_class() {
        let mut hero = Hero::new("Ada");
        hero.rage = 2.0;
        hero.accuracy = 3.0;
        assert_eq!(hero.multiplier(), 2.0);
        hero.equip(Weapon::new(WeaponKind::Pistol));
        assert_eq!(hero.multiplier(), 3.0);
    }

    #[test]
    fn empty_weapon_degrades_to_fist() {
        let mut hero = Hero::new("Ada");
        hero.equip(Weapon::new(WeaponKind::Bow));
        let dropped = hero.ensure_weapon();
        assert_eq!(dropped.map(|w| w.kind), Some(WeaponKind::Bow));
        assert!(hero.weapon.is_fallback());
        assert_eq!(hero.ensure_weapon(), None);
    }

    #[test]
    fn pickups_split_between_bag_and_effect() {
        let mut hero = Hero::new("Ada");
        assert_eq!(
            hero.pick_up(Bonus::Medkit { power: 30.0 }),
            Ok(Pickup::Stored(BonusKind::Medkit))
        );
        assert_eq!(
            hero.pick_up(Bonus::Coins { amount: 25 }),
            Ok(Pickup::Applied(BonusOutcome::CoinsGained(25)))
        );
        assert_eq!(hero.coins, 25);
        assert_eq!(hero.bag.count(BonusKind::Medkit), 1);
    }

    #[test]
    fn ammo_for_unequipped_weapon_is_reserved_then_loaded() {
        let mut hero = Hero::new("Ada");
        let picked = hero.pick_up(Bonus::Arrows { amount: 6 });
        assert_eq!(
            picked,
            Ok(Pickup::Applied(BonusOutcome::AmmoReserved {
                ammo: AmmoKind::Arrows,
                amount: 6
            }))
        );

        assert_eq!(
            hero.use_inventory(InventoryAction::LoadArrows),
            Err(GameError::NoMatchingWeapon {
                ammo: "arrows".into()
            })
        );

        hero.equip(Weapon::new(WeaponKind::Bow));
        assert_eq!(
            hero.use_inventory(InventoryAction::LoadArrows),
            Ok(BonusOutcome::AmmoLoaded {
                ammo: AmmoKind::Arrows,
                amount: 6
            })
        );
        assert_eq!(hero.weapon.ammo(), Some(6));
        assert_eq!(
            hero.use_inventory(InventoryAction::LoadArrows),
            Err(GameError::NoReservedAmmo {
                ammo: "arrows".into()
            })
        );
    }

    #[test]
    fn ammo_for_equipped_weapon_loads_directly() {
        let mut hero = Hero::new("Ada");
        hero.equip(Weapon::new(WeaponKind::Pistol).with_ammo(1));
        hero.pick_up(Bonus::Bullets { amount: 4 }).unwrap();
        assert_eq!(hero.weapon.ammo(), Some(5));
        assert_eq!(hero.bag.reserved(AmmoKind::Bullets), 0);
    }

    #[test]
    fn medkit_from_menu_heals_capped() {
        let mut hero = Hero::new("Ada");
        hero.health = Health::with_hp(100.0, 120.0);
        hero.pick_up(Bonus::Medkit { power: 30.0 }).unwrap();

        let outcome = hero.use_inventory(InventoryAction::UseMedkit(0));
        assert_eq!(outcome, Ok(BonusOutcome::Healed(20.0)));
        assert_eq!(hero.health.hp(), 120.0);
        assert_eq!(hero.bag.count(BonusKind::Medkit), 0);
    }

    #[test]
    fn out_of_range_menu_index_is_invalid_selection() {
        let mut hero = Hero::new("Ada");
        assert_eq!(
            hero.use_inventory(InventoryAction::UseRage(2)),
            Err(GameError::InvalidSelection { index: 2, len: 0 })
        );
    }

    #[test]
    fn ticking_effects_hurts_the_hero() {
        let mut hero = Hero::new("Ada");
        hero.effects.inflict(StatusKind::Poison, 2, 16.5);
        let ticks = hero.tick_effects();
        assert_eq!(ticks.len(), 1);
        assert_eq!(hero.health.hp(), 165.0 - 16.5);
    }
}
