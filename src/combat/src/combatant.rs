// src/combat/src/combatant.rs

use dice::Dice;

use crate::health::Health;
use crate::position::Position;

/// Anything that stands on the board, can be hurt and can hit back
pub trait Combatant {
    fn name(&self) -> &str;

    fn position(&self) -> Position;

    fn health(&self) -> &Health;

    fn health_mut(&mut self) -> &mut Health;

    /// Hit `target` once; returns the damage the target actually lost
    fn attack(&mut self, target: &mut dyn Combatant, dice: &mut dyn Dice) -> f32;

    fn hp(&self) -> f32 {
        self.health().hp()
    }

    fn max_hp(&self) -> f32 {
        self.health().max_hp()
    }

    fn is_alive(&self) -> bool {
        self.health().is_alive()
    }

    fn take_damage(&mut self, amount: f32) -> f32 {
        self.health_mut().take_damage(amount)
    }

    fn heal(&mut self, amount: f32) -> f32 {
        self.health_mut().heal(amount)
    }
}
