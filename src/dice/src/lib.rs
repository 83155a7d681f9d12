//src/dice/src/lib.rs
//! Random source shared by combat rolls, enemy behaviour and board population.
//!
//! Everything that needs randomness takes a `&mut dyn Dice`, so a session can
//! run on [`SeededDice`] while tests replay exact sequences with
//! [`ScriptedDice`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Source of every random decision in the game
pub trait Dice {
    /// Uniform integer in `[0, max]` (inclusive)
    fn roll(&mut self, max: u32) -> u32;

    /// Uniform draw in `[0, 1)`
    fn chance(&mut self) -> f32;

    /// Uniform integer in `[low, high]` (inclusive)
    fn range(&mut self, low: u32, high: u32) -> u32;

    /// `true` with probability `p`
    fn check(&mut self, p: f32) -> bool {
        self.chance() < p
    }
}

/// Deterministic PCG-backed dice
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: Pcg32,
    seed: u64,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the OS entropy source
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the sequence from the current seed
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    pub fn reseed(&mut self, new_seed: u64) {
        self.seed = new_seed;
        self.reset();
    }
}

impl Dice for SeededDice {
    fn roll(&mut self, max: u32) -> u32 {
        self.rng.random_range(0..=max)
    }

    fn chance(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

// Only the seed is persisted; the stream restarts on load.
impl Serialize for SeededDice {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u64(self.seed)
    }
}

impl<'de> Deserialize<'de> for SeededDice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let seed = u64::deserialize(deserializer)?;
        Ok(Self::new(seed))
    }
}

/// Dice that replay fixed sequences.
///
/// An empty roll queue yields `0` and an empty chance queue yields `1.0`, which
/// never passes a `< p` check. Scripted rolls are capped at the requested max.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    chances: VecDeque<f32>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self::new().then_rolls(rolls)
    }

    pub fn then_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn then_chances(mut self, chances: impl IntoIterator<Item = f32>) -> Self {
        self.chances.extend(chances);
        self
    }

    pub fn remaining_rolls(&self) -> usize {
        self.rolls.len()
    }

    pub fn remaining_chances(&self) -> usize {
        self.chances.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, max: u32) -> u32 {
        self.rolls.pop_front().unwrap_or(0).min(max)
    }

    fn chance(&mut self) -> f32 {
        self.chances.pop_front().unwrap_or(1.0)
    }

    fn range(&mut self, low: u32, high: u32) -> u32 {
        self.rolls.pop_front().unwrap_or(low).clamp(low, high.max(low))
    }
}
