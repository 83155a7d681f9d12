//! Timed damage-over-time effects carried by a combatant
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum::{Display, EnumIter};

use crate::health::Health;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
pub enum StatusKind {
    Infection,
    Poison,
}

/// One effect instance; expired once `turns_left` reaches 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub turns_left: u32,
    pub damage_per_turn: f32,
}

impl StatusEffect {
    pub fn new(turns_left: u32, damage_per_turn: f32) -> Self {
        Self {
            turns_left,
            damage_per_turn,
        }
    }

    pub fn is_active(&self) -> bool {
        self.turns_left > 0
    }
}

/// Damage dealt by one effect during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusTick {
    pub kind: StatusKind,
    pub damage: f32,
    pub turns_left: u32,
}

impl fmt::Display for StatusTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} deals {} damage ({} turns left)",
            self.kind, self.damage, self.turns_left
        )
    }
}

/// At most one instance per kind.
///
/// Expired entries stay in the map with `turns_left == 0` and simply stop
/// dealing damage; a later infliction overwrites them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: BTreeMap<StatusKind, StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an effect unless one of the same kind is still running.
    /// Returns whether the effect was applied.
    pub fn inflict(&mut self, kind: StatusKind, turns: u32, damage_per_turn: f32) -> bool {
        if self.is_active(kind) {
            return false;
        }
        self.effects
            .insert(kind, StatusEffect::new(turns, damage_per_turn));
        true
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.get(&kind)
    }

    pub fn is_active(&self, kind: StatusKind) -> bool {
        self.effects.get(&kind).is_some_and(StatusEffect::is_active)
    }

    /// Effects that will still deal damage
    pub fn active(&self) -> impl Iterator<Item = (StatusKind, &StatusEffect)> {
        self.effects
            .iter()
            .filter(|(_, e)| e.is_active())
            .map(|(k, e)| (*k, e))
    }

    pub fn any_active(&self) -> bool {
        self.active().next().is_some()
    }

    /// Apply one turn of every active effect to `health`
    pub fn tick(&mut self, health: &mut Health) -> Vec<StatusTick> {
        let mut ticks = Vec::new();

        for (kind, effect) in self.effects.iter_mut() {
            if !effect.is_active() {
                continue;
            }
            let damage = health.take_damage(effect.damage_per_turn);
            effect.turns_left -= 1;
            ticks.push(StatusTick {
                kind: *kind,
                damage,
                turns_left: effect.turns_left,
            });
        }

        ticks
    }
}
