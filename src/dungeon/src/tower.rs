//src/dungeon/src/tower.rs
use combat::Position;
use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Reach of a tower's reveal; the `reveal_radius` field does not change it
pub const TOWER_REACH: i32 = 1;

/// Lookout structure that uncovers the cells around whoever climbs it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tower {
    pub reveal_radius: u32,
}

impl Tower {
    pub fn new(reveal_radius: u32) -> Self {
        Self { reveal_radius }
    }

    /// Reveal the 3x3 block centred on `at`; returns how many cells were new
    pub fn interact(&self, board: &mut Board, at: Position) -> usize {
        let revealed = board.reveal_around(at, TOWER_REACH);
        tracing::debug!(%at, revealed, "tower climbed");
        revealed
    }
}

impl Default for Tower {
    fn default() -> Self {
        Self::new(2)
    }
}
