//src/dungeon/src/lib.rs
//! The board: a grid of hidden cells holding enemies, pickups and towers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub mod board;
pub mod tower;

pub use crate::board::{Board, Cell, Occupant};
pub use crate::tower::Tower;

/// One step on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    pub fn delta(self) -> (i32, i32) {
        match self {
            MoveDirection::Up => (0, -1),
            MoveDirection::Down => (0, 1),
            MoveDirection::Left => (-1, 0),
            MoveDirection::Right => (1, 0),
        }
    }
}

/// How crowded the generated board is
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Chance that a generated cell holds each kind of occupant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Population {
    pub enemy: f32,
    pub weapon: f32,
    pub bonus: f32,
    pub tower: f32,
}

impl Difficulty {
    pub fn population(self) -> Population {
        match self {
            Difficulty::Easy => Population {
                enemy: 0.10,
                weapon: 0.06,
                bonus: 0.14,
                tower: 0.04,
            },
            Difficulty::Normal => Population {
                enemy: 0.18,
                weapon: 0.05,
                bonus: 0.10,
                tower: 0.03,
            },
            Difficulty::Hard => Population {
                enemy: 0.28,
                weapon: 0.04,
                bonus: 0.08,
                tower: 0.02,
            },
        }
    }
}
