// src/hero/src/combat.rs
use combat::{Combatant, Health, Position};
use dice::Dice;
use items::{AmmoKind, BonusTarget};

use crate::core::Hero;

impl Combatant for Hero {
    fn name(&self) -> &str {
        &self.name
    }

    fn position(&self) -> Position {
        self.position
    }

    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    /// Melee scales with rage, ranged with accuracy and spends a round.
    /// An unavailable weapon deals nothing.
    fn attack(&mut self, target: &mut dyn Combatant, dice: &mut dyn Dice) -> f32 {
        let multiplier = self.multiplier();
        let damage = self.weapon.strike(multiplier, dice);
        target.take_damage(damage)
    }
}

impl BonusTarget for Hero {
    fn heal(&mut self, amount: f32) -> f32 {
        self.health.heal(amount)
    }

    fn add_rage(&mut self, amount: f32) -> f32 {
        self.rage += amount;
        self.rage
    }

    fn add_accuracy(&mut self, amount: f32) -> f32 {
        self.accuracy += amount;
        self.accuracy
    }

    fn load_equipped(&mut self, ammo: AmmoKind, amount: u32) -> bool {
        self.weapon.load_ammo(ammo, amount)
    }

    fn reserve_ammo(&mut self, ammo: AmmoKind, amount: u32) {
        self.bag.reserve(ammo, amount);
    }

    fn add_coins(&mut self, amount: u32) {
        self.coins += amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat::{Enemy, EnemyKind};
    use dice::ScriptedDice;
    use items::{Weapon, WeaponKind};

    #[test]
    fn empty_bow_attack_changes_nothing() {
        let mut hero = Hero::new("Ada");
        hero.equip(Weapon::new(WeaponKind::Bow));
        let mut rat = Enemy::new(EnemyKind::Rat, 1, Position::default());
        let mut dice = ScriptedDice::with_rolls([50]);

        let dealt = hero.attack(&mut rat, &mut dice);
        assert_eq!(dealt, 0.0);
        assert_eq!(rat.health.hp(), 110.0);
        assert_eq!(hero.weapon.ammo(), Some(0));
    }

    #[test]
    fn rage_scales_melee_hits() {
        let mut hero = Hero::new("Ada");
        hero.rage = 1.5;
        let mut rat = Enemy::new(EnemyKind::Rat, 1, Position::default());
        let mut dice = ScriptedDice::with_rolls([20]);

        assert_eq!(hero.attack(&mut rat, &mut dice), 30.0);
        assert_eq!(rat.health.hp(), 80.0);
    }

    #[test]
    fn ranged_hit_spends_a_round() {
        let mut hero = Hero::new("Ada");
        hero.accuracy = 2.0;
        hero.equip(Weapon::new(WeaponKind::Bow).with_ammo(3));
        let mut rat = Enemy::new(EnemyKind::Rat, 1, Position::default());
        let mut dice = ScriptedDice::with_rolls([25]);

        assert_eq!(hero.attack(&mut rat, &mut dice), 50.0);
        assert_eq!(hero.weapon.ammo(), Some(2));
    }

    #[test]
    fn bonuses_apply_through_the_trait() {
        let mut hero = Hero::new("Ada");
        assert_eq!(BonusTarget::add_rage(&mut hero, 0.5), 1.5);
        assert_eq!(BonusTarget::add_accuracy(&mut hero, 0.25), 1.25);
        assert_eq!(BonusTarget::heal(&mut hero, 10.0), 0.0);
    }
}
