//! Turns typed lines into game commands.

use dungeon::MoveDirection;
use error::GameError;
use hero::InventoryAction;

use crate::encounter::CombatAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(MoveDirection),
    /// `OpenInventory` only shows the bag, so it is accepted outside fights too
    Combat(CombatAction),
    Inventory(InventoryAction),
    /// Answer to a weapon or loot offer
    Decide(bool),
    Save,
    Help,
    Quit,
}

/// Parse one line of player input
///
/// Inventory entries take a 1-based index, e.g. `m 2` uses the second medkit.
pub fn parse_command(line: &str) -> Result<Command, GameError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(GameError::InputError("empty command".into()));
    };
    let head = head.to_ascii_lowercase();

    let command = match head.as_str() {
        "w" | "up" => Command::Move(MoveDirection::Up),
        "s" | "down" => Command::Move(MoveDirection::Down),
        "a" | "left" => Command::Move(MoveDirection::Left),
        "d" | "right" => Command::Move(MoveDirection::Right),
        "f" | "attack" => Command::Combat(CombatAction::Attack),
        "i" | "inventory" => Command::Combat(CombatAction::OpenInventory),
        "m" | "medkit" => Command::Inventory(InventoryAction::UseMedkit(index(words.next())?)),
        "r" | "rage" => Command::Inventory(InventoryAction::UseRage(index(words.next())?)),
        "c" | "accuracy" => Command::Inventory(InventoryAction::UseAccuracy(index(words.next())?)),
        "la" | "arrows" => Command::Inventory(InventoryAction::LoadArrows),
        "lb" | "bullets" => Command::Inventory(InventoryAction::LoadBullets),
        "y" | "yes" => Command::Decide(true),
        "n" | "no" => Command::Decide(false),
        "save" => Command::Save,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(GameError::InputError(format!("unknown command `{other}`"))),
    };
    Ok(command)
}

fn index(word: Option<&str>) -> Result<usize, GameError> {
    let Some(word) = word else {
        return Ok(0);
    };
    match word.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(GameError::InputError(format!("`{word}` is not a slot number"))),
    }
}

pub const HELP: &str = "\
Moving:     w/a/s/d (or up/left/down/right)
Fighting:   f to attack, i to look in the bag
Bag:        m N (medkit), r N (rage), c N (accuracy), la / lb to load arrows / bullets
Decisions:  y / n
Other:      save, help, quit";
