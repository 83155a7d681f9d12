//src/combat/src/health.rs
use serde::{Deserialize, Serialize};

/// Hit points of anything that can be damaged.
///
/// `hp` always stays within `[0, max_hp]`; every mutation clamps and reports
/// the amount that was actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    hp: f32,
    max_hp: f32,
}

impl Health {
    /// Full health
    pub fn new(max_hp: f32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    pub fn with_hp(hp: f32, max_hp: f32) -> Self {
        Self {
            hp: hp.clamp(0.0, max_hp),
            max_hp,
        }
    }

    pub fn hp(&self) -> f32 {
        self.hp
    }

    pub fn max_hp(&self) -> f32 {
        self.max_hp
    }

    /// `hp / max_hp`
    pub fn ratio(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            self.hp / self.max_hp
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Lose at most the remaining hp
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.hp);
        self.hp -= actual;
        actual
    }

    /// Gain at most the missing hp
    pub fn heal(&mut self, amount: f32) -> f32 {
        let missing = self.max_hp - self.hp;
        if amount >= missing {
            self.hp = self.max_hp;
            missing
        } else {
            self.hp += amount;
            amount
        }
    }

    /// Drop straight to zero (used when an enemy runs away)
    pub fn kill(&mut self) {
        self.hp = 0.0;
    }
}
