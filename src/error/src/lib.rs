//! Game error handling.
//!
//! Every crate in the workspace reports failures through [`GameError`]. Only
//! [`GameError::PlayerDefeated`] ends a session; everything else is answered by
//! re-prompting the player.

use thiserror::Error;

/// Errors that can surface while exploring or fighting
#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    /// An inventory or menu index outside the listed entries
    #[error("Invalid selection: {index} (only {len} available)")]
    InvalidSelection { index: usize, len: usize },

    /// Ammo can only be loaded into a matching ranged weapon
    #[error("No {ammo} weapon equipped")]
    NoMatchingWeapon { ammo: String },

    /// Nothing reserved to load
    #[error("No reserved {ammo}")]
    NoReservedAmmo { ammo: String },

    /// A bag pouch reached its capacity
    #[error("Bag is full")]
    BagFull,

    /// The requested operation does not fit the current phase
    #[error("Cannot {action} while {phase}")]
    WrongPhase {
        action: &'static str,
        phase: &'static str,
    },

    /// A board position outside the grid
    #[error("Position ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    /// A board cell that is already occupied
    #[error("Cell ({x}, {y}) is occupied")]
    CellOccupied { x: i32, y: i32 },

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unparseable player input
    #[error("Input error: {0}")]
    InputError(String),

    /// The hero died; the session is over
    #[error("The hero has been defeated")]
    PlayerDefeated,
}

impl GameError {
    /// Whether the caller should simply ask the player again
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, GameError::PlayerDefeated | GameError::InvalidConfig(_))
    }
}

/// Turn a game error into a short message for the player
pub fn handle_error(error: &GameError) -> String {
    match error {
        GameError::InvalidSelection { .. } => "That is not on the list, try again".to_string(),
        GameError::NoMatchingWeapon { ammo } => format!("You have nothing that fires {ammo}"),
        GameError::NoReservedAmmo { ammo } => format!("You carry no spare {ammo}"),
        GameError::OutOfBounds { .. } => "You cannot walk off the map".to_string(),
        GameError::PlayerDefeated => "You died".to_string(),
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_defeat_and_config_are_fatal() {
        assert!(GameError::InvalidSelection { index: 3, len: 1 }.is_recoverable());
        assert!(GameError::BagFull.is_recoverable());
        assert!(!GameError::PlayerDefeated.is_recoverable());
        assert!(!GameError::InvalidConfig("width".into()).is_recoverable());
    }

    #[test]
    fn messages_name_the_missing_ammo() {
        let err = GameError::NoMatchingWeapon {
            ammo: "arrows".into(),
        };
        assert_eq!(handle_error(&err), "You have nothing that fires arrows");
        assert_eq!(err.to_string(), "No arrows weapon equipped");
    }
}
