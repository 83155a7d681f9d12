//! Command-line options and the immutable settings derived from them.

use clap::Parser;
use dungeon::{
    Difficulty,
    board::{MAX_SIDE, MIN_SIDE},
};
use error::GameError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: u32 = 10;
pub const DEFAULT_HEIGHT: u32 = 8;

/// Tower Crawl: reach the far corner of a hidden board alive
#[derive(Parser, Debug, Clone)]
#[command(name = "tower-crawl")]
#[command(version, about = "Tower Crawl - fight your way to the exit", long_about = None)]
pub struct Cli {
    /// Board density: easy, normal or hard
    #[arg(short = 'd', long = "difficulty", default_value = "normal")]
    pub difficulty: Difficulty,

    /// Board width in cells
    #[arg(long = "width", default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Board height in cells
    #[arg(long = "height", default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Seed for the random source (random when omitted)
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Player name
    #[arg(short = 'u', long = "name", default_value = "Hero")]
    pub name: String,

    /// Skip the intro screen
    #[arg(long = "skip-intro")]
    pub skip_intro: bool,

    /// Never clear the terminal between frames
    #[arg(long = "disable-clears")]
    pub disable_clears: bool,

    /// Draw every cell as if it had been revealed
    #[arg(long = "show-unopened-cells")]
    pub show_unopened_cells: bool,

    /// Towers do nothing when stepped on
    #[arg(long = "disable-interactions")]
    pub disable_interactions: bool,

    /// Print the final state as JSON on exit
    #[arg(long = "json-snapshot")]
    pub json_snapshot: bool,
}

/// Settings for one session; never changes once the game starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
    pub player_name: String,
    pub skip_intro: bool,
    pub disable_clears: bool,
    /// Treat every cell as revealed
    pub reveal_all: bool,
    pub disable_interactions: bool,
    pub json_snapshot: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            player_name: "Hero".into(),
            skip_intro: false,
            disable_clears: false,
            reveal_all: false,
            disable_interactions: false,
            json_snapshot: false,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        for (label, side) in [("width", self.width), ("height", self.height)] {
            if !(MIN_SIDE..=MAX_SIDE).contains(&side) {
                return Err(GameError::InvalidConfig(format!(
                    "{label} must be between {MIN_SIDE} and {MAX_SIDE}, got {side}"
                )));
            }
        }
        if self.player_name.trim().is_empty() {
            return Err(GameError::InvalidConfig("player name is empty".into()));
        }
        Ok(())
    }
}

impl TryFrom<Cli> for GameConfig {
    type Error = GameError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let config = Self {
            difficulty: cli.difficulty,
            width: cli.width,
            height: cli.height,
            seed: cli.seed,
            player_name: cli.name,
            skip_intro: cli.skip_intro,
            disable_clears: cli.disable_clears,
            reveal_all: cli.show_unopened_cells,
            disable_interactions: cli.disable_interactions,
            json_snapshot: cli.json_snapshot,
        };
        config.validate()?;
        Ok(config)
    }
}
