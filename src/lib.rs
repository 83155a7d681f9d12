//! Tower Crawl: a turn-based grid roguelike.
//!
//! The workspace crates hold the rules (`combat`, `items`, `hero`, `dungeon`);
//! this crate wires them into an encounter engine and a playable session.

pub mod config;
pub mod encounter;
pub mod game;
pub mod input;
pub mod render;

pub use crate::config::{Cli, GameConfig};
pub use crate::encounter::{
    CombatAction, Encounter, EncounterSnapshot, EncounterState, Exchange, LootSwapDecision,
    Outcome, RoundStart,
};
pub use crate::game::{Game, GameSnapshot, Phase, StepOutcome, WeaponSwapDecision};
pub use crate::input::{Command, parse_command};
