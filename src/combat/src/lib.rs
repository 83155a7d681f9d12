// src/combat/src/lib.rs
//! Damage model, status effects and enemy behaviour.

pub mod combatant;
pub mod enemy;
pub mod health;
pub mod position;
pub mod status_effect;

pub use crate::combatant::Combatant;
pub use crate::enemy::{Enemy, EnemyKind, PreTurn};
pub use crate::health::Health;
pub use crate::position::Position;
pub use crate::status_effect::{StatusEffect, StatusEffects, StatusKind, StatusTick};

use dice::Dice;

/// Attack resolution between two combatants
pub struct Combat;

impl Combat {
    /// The attacker strikes; a surviving defender answers immediately.
    pub fn engage(
        attacker: &mut dyn Combatant,
        defender: &mut dyn Combatant,
        dice: &mut dyn Dice,
    ) -> CombatResult {
        let mut result = CombatResult::new();

        let dealt = Self::resolve_attack(attacker, defender, dice, &mut result);
        result.dealt = dealt;

        if !defender.is_alive() {
            result.log(format!("{} defeated {}!", attacker.name(), defender.name()));
            result.defeated = true;
            return result;
        }

        let taken = Self::resolve_attack(defender, attacker, dice, &mut result);
        result.taken = taken;

        if !attacker.is_alive() {
            result.log(format!("{} was slain by {}!", attacker.name(), defender.name()));
            result.attacker_died = true;
        }

        result
    }

    /// A single blow with its log line
    pub fn resolve_attack(
        attacker: &mut dyn Combatant,
        defender: &mut dyn Combatant,
        dice: &mut dyn Dice,
        result: &mut CombatResult,
    ) -> f32 {
        let dealt = attacker.attack(defender, dice);

        if dealt > 0.0 {
            result.log(format!(
                "{} hits {} for {} damage ({}/{} HP left)",
                attacker.name(),
                defender.name(),
                dealt,
                defender.hp(),
                defender.max_hp()
            ));
        } else {
            result.log(format!("{} misses {}!", attacker.name(), defender.name()));
        }
        tracing::debug!(
            attacker = attacker.name(),
            defender = defender.name(),
            dealt,
            defender_hp = defender.hp(),
            "attack resolved"
        );

        dealt
    }
}

/// Result of one exchange, with lines for the message log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatResult {
    pub logs: Vec<String>,
    /// Damage the attacker dealt
    pub dealt: f32,
    /// Damage the attacker received in reply
    pub taken: f32,
    /// The defender died
    pub defeated: bool,
    /// The attacker died to the reply
    pub attacker_died: bool,
}

impl CombatResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, message: String) {
        self.logs.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice::ScriptedDice;

    #[test]
    fn defender_answers_when_it_survives() {
        let mut rat = Enemy::new(EnemyKind::Rat, 1, Position::default());
        let mut spider = Enemy::new(EnemyKind::Spider, 1, Position::default());
        let mut dice = ScriptedDice::with_rolls([7, 9]);

        let result = Combat::engage(&mut rat, &mut spider, &mut dice);
        assert_eq!(result.dealt, 7.0);
        assert_eq!(result.taken, 9.0);
        assert!(!result.defeated);
        assert_eq!(result.logs.len(), 2);
        assert_eq!(rat.health.hp(), 101.0);
        assert_eq!(spider.health.hp(), 81.0);
    }

    #[test]
    fn dead_defender_does_not_answer() {
        let mut skeleton = Enemy::new(EnemyKind::Skeleton, 1, Position::default());
        let mut rat = Enemy::new(EnemyKind::Rat, 1, Position::default());
        rat.health = Health::with_hp(5.0, 110.0);
        let mut dice = ScriptedDice::with_rolls([20, 11]);

        let result = Combat::engage(&mut skeleton, &mut rat, &mut dice);
        assert!(result.defeated);
        assert_eq!(result.dealt, 5.0);
        assert_eq!(result.taken, 0.0);
        assert_eq!(dice.remaining_rolls(), 1);
        assert!(result.logs.last().is_some_and(|l| l.contains("defeated")));
    }

    #[test]
    fn zero_damage_reads_as_a_miss() {
        let mut rat = Enemy::new(EnemyKind::Rat, 1, Position::default());
        let mut spider = Enemy::new(EnemyKind::Spider, 1, Position::default());
        let mut dice = ScriptedDice::new();

        let result = Combat::engage(&mut rat, &mut spider, &mut dice);
        assert!(result.logs[0].contains("misses"));
    }
}
