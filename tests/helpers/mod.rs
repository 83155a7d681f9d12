//! Builders shared by the integration tests.

#![allow(dead_code)]

use combat::{Enemy, EnemyKind, Health, Position};
use dice::{Dice, ScriptedDice};
use dungeon::{Board, Occupant};
use hero::Hero;
use tower_crawl::{Encounter, Game, GameConfig, Outcome};

/// Level-fixed enemy, optionally wounded
pub fn enemy(kind: EnemyKind, lvl: u32, hp: Option<f32>) -> Enemy {
    let mut enemy = Enemy::new(kind, lvl, Position::new(1, 0));
    if let Some(hp) = hp {
        enemy.health = Health::with_hp(hp, enemy.health.max_hp());
    }
    enemy
}

/// Board with the given occupants placed on it
pub fn board_with(width: u32, height: u32, occupants: Vec<(Position, Occupant)>) -> Board {
    let mut board = Board::new(width, height).expect("valid board size");
    for (pos, occupant) in occupants {
        board.place(pos, occupant).expect("free cell");
    }
    board
}

pub fn scripted_game(board: Board, dice: ScriptedDice) -> Game {
    Game::with_board(&GameConfig::default(), board, Box::new(dice))
}

/// Fight until the encounter resolves, recording `(hero hp, enemy hp)` after each attack
pub fn fight_to_the_end(
    encounter: &mut Encounter,
    hero: &mut Hero,
    dice: &mut dyn Dice,
    max_rounds: u32,
) -> (Vec<(f32, f32)>, Option<Outcome>) {
    let mut trace = Vec::new();
    for _ in 0..max_rounds {
        let start = encounter.begin_round(hero, dice).expect("pre-turn phase");
        if start.outcome.is_some() {
            break;
        }
        let exchange = encounter.attack(hero, dice).expect("player phase");
        trace.push((hero.health.hp(), encounter.enemy().health.hp()));
        if exchange.outcome.is_some() {
            break;
        }
    }
    (trace, encounter.outcome())
}
