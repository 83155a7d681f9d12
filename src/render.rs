//! Plain-text frames for the terminal.

use std::fmt::Write;

use combat::Position;
use dungeon::Occupant;
use hero::InventorySnapshot;

use crate::game::{Game, GameSnapshot, Phase};

pub const HIDDEN: char = '#';
pub const EMPTY: char = '.';
pub const HERO: char = '@';

/// The board, one row per line
pub fn render_board(game: &Game) -> String {
    let board = game.board();
    let hero = game.hero().position;
    let mut out = String::with_capacity(((board.width + 1) * board.height) as usize);

    for y in 0..board.height as i32 {
        for x in 0..board.width as i32 {
            let pos = Position::new(x, y);
            let glyph = if pos == hero {
                HERO
            } else if !game.is_revealed(pos) {
                HIDDEN
            } else {
                board.occupant_at(pos).map_or(EMPTY, Occupant::symbol)
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

pub fn render_status(snapshot: &GameSnapshot) -> String {
    let mut out = String::new();
    let weapon = &snapshot.inventory.weapon;
    let _ = writeln!(
        out,
        "{} (lvl {})  HP {:.1}/{:.1}  Coins {}  Rage x{:.1}  Accuracy x{:.1}",
        snapshot.name,
        snapshot.lvl,
        snapshot.hp,
        snapshot.max_hp,
        snapshot.coins,
        snapshot.rage,
        snapshot.accuracy
    );

    let _ = write!(out, "Weapon: {} (max {})", weapon.name, weapon.max_damage);
    if let Some(ammo) = weapon.ammo {
        let _ = write!(out, ", ammo {ammo}");
    }
    if let Some(durability) = weapon.durability {
        let _ = write!(out, ", durability {durability}");
    }
    out.push('\n');

    for effect in &snapshot.effects {
        let _ = writeln!(
            out,
            "Afflicted by {}: {} per turn, {} turns left",
            effect.kind, effect.damage_per_turn, effect.turns_left
        );
    }

    if let Some(enemy) = &snapshot.enemy {
        let _ = write!(
            out,
            "Fighting {} (lvl {})  HP {:.1}/{:.1}  round {}",
            enemy.kind, enemy.lvl, enemy.hp, enemy.max_hp, enemy.round
        );
        if let Some(weapon) = &enemy.weapon {
            let _ = write!(out, "  wielding {weapon}");
        }
        out.push('\n');
    }

    if let Some(weapon) = &snapshot.pending_weapon {
        let _ = writeln!(out, "You found a {weapon}. Take it? (y/n)");
    }

    let prompt = match snapshot.phase {
        Phase::Exploring => "Move with w/a/s/d, i for the bag, help for commands",
        Phase::WeaponOffer => "Swap weapons? (y/n)",
        Phase::Fighting => "f to attack, or use something from the bag",
        Phase::LootOffer => "Take the dropped weapon? (y/n)",
        Phase::Won => "You reached the exit!",
        Phase::Lost => "You have been defeated.",
    };
    out.push_str(prompt);
    out.push('\n');
    out
}

pub fn render_inventory(inventory: &InventorySnapshot) -> String {
    format!(
        "Medkits: {}  Rage: {}  Accuracy: {}\nReserved arrows: {}  Reserved bullets: {}\n",
        inventory.medkits,
        inventory.rages,
        inventory.accuracies,
        inventory.reserved_arrows,
        inventory.reserved_bullets
    )
}
