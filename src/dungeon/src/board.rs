//src/dungeon/src/board.rs
use combat::{Enemy, EnemyKind, Position};
use dice::Dice;
use error::GameError;
use items::{Bonus, Weapon};
use serde::{Deserialize, Serialize};

use crate::{Difficulty, MoveDirection, tower::Tower};

pub const MIN_SIDE: u32 = 2;
pub const MAX_SIDE: u32 = 64;

/// Whatever sits on a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Occupant {
    Enemy(Enemy),
    Weapon(Weapon),
    Bonus(Bonus),
    Tower(Tower),
    Goal,
}

impl Occupant {
    pub fn symbol(&self) -> char {
        match self {
            Occupant::Enemy(enemy) => enemy.symbol(),
            Occupant::Weapon(_) => '/',
            Occupant::Bonus(_) => '+',
            Occupant::Tower(_) => 'T',
            Occupant::Goal => 'G',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub revealed: bool,
    pub occupant: Option<Occupant>,
}

/// Rectangular grid, stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub width: u32,
    pub height: u32,
    cells: Vec<Cell>,
    pub start: Position,
    pub goal: Position,
}

impl Board {
    /// Empty, fully hidden board with the goal in the far corner
    pub fn new(width: u32, height: u32) -> Result<Self, GameError> {
        let sides = MIN_SIDE..=MAX_SIDE;
        if !sides.contains(&width) || !sides.contains(&height) {
            return Err(GameError::InvalidConfig(format!(
                "board sides must be between {MIN_SIDE} and {MAX_SIDE}, got {width}x{height}"
            )));
        }
        let goal = Position::new(width as i32 - 1, height as i32 - 1);
        let mut board = Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
            start: Position::new(0, 0),
            goal,
        };
        if let Some(cell) = board.cell_mut(goal) {
            cell.occupant = Some(Occupant::Goal);
        }
        Ok(board)
    }

    /// Populate every cell except start and goal from the difficulty weights
    pub fn generate(
        width: u32,
        height: u32,
        difficulty: Difficulty,
        dice: &mut dyn Dice,
    ) -> Result<Self, GameError> {
        let mut board = Self::new(width, height)?;
        let weights = difficulty.population();

        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let pos = Position::new(x, y);
                if pos == board.start || pos == board.goal {
                    continue;
                }

                let draw = dice.chance();
                let weapon_edge = weights.enemy + weights.weapon;
                let bonus_edge = weapon_edge + weights.bonus;
                let tower_edge = bonus_edge + weights.tower;
                let occupant = if draw < weights.enemy {
                    let kind = match dice.range(0, 2) {
                        0 => EnemyKind::Rat,
                        1 => EnemyKind::Spider,
                        _ => EnemyKind::Skeleton,
                    };
                    Some(Occupant::Enemy(Enemy::spawn(kind, pos, dice)))
                } else if draw < weapon_edge {
                    Some(Occupant::Weapon(Weapon::random(dice)))
                } else if draw < bonus_edge {
                    Some(Occupant::Bonus(Bonus::random(dice)))
                } else if draw < tower_edge {
                    Some(Occupant::Tower(Tower::default()))
                } else {
                    None
                };

                if let Some(cell) = board.cell_mut(pos) {
                    cell.occupant = occupant;
                }
            }
        }

        tracing::info!(
            width,
            height,
            %difficulty,
            enemies = board.count(|o| matches!(o, Occupant::Enemy(_))),
            "board generated"
        );
        Ok(board)
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| (pos.y as u32 * self.width + pos.x as u32) as usize)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).and_then(|i| self.cells.get(i))
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        self.index(pos).and_then(|i| self.cells.get_mut(i))
    }

    pub fn occupant_at(&self, pos: Position) -> Option<&Occupant> {
        self.cell(pos).and_then(|cell| cell.occupant.as_ref())
    }

    /// Remove and return whatever is on the cell
    pub fn take(&mut self, pos: Position) -> Option<Occupant> {
        self.cell_mut(pos).and_then(|cell| cell.occupant.take())
    }

    /// Put something on an empty cell
    pub fn place(&mut self, pos: Position, occupant: Occupant) -> Result<(), GameError> {
        let cell = self
            .cell_mut(pos)
            .ok_or(GameError::OutOfBounds { x: pos.x, y: pos.y })?;
        if cell.occupant.is_some() {
            return Err(GameError::CellOccupied { x: pos.x, y: pos.y });
        }
        cell.occupant = Some(occupant);
        Ok(())
    }

    /// Returns `true` if the cell was hidden before
    pub fn reveal(&mut self, pos: Position) -> bool {
        match self.cell_mut(pos) {
            Some(cell) if !cell.revealed => {
                cell.revealed = true;
                true
            }
            _ => false,
        }
    }

    /// Reveal the square of side `2 * reach + 1` around `center`, clipped to the board
    pub fn reveal_around(&mut self, center: Position, reach: i32) -> usize {
        let mut revealed = 0;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if self.reveal(center.offset(dx, dy)) {
                    revealed += 1;
                }
            }
        }
        revealed
    }

    pub fn is_revealed(&self, pos: Position, reveal_all: bool) -> bool {
        self.in_bounds(pos) && (reveal_all || self.cell(pos).is_some_and(|c| c.revealed))
    }

    /// Orthogonal neighbours inside the board with nothing on them
    pub fn free_neighbours(&self, pos: Position) -> Vec<Position> {
        [
            MoveDirection::Up,
            MoveDirection::Right,
            MoveDirection::Down,
            MoveDirection::Left,
        ]
        .into_iter()
        .map(|dir| {
            let (dx, dy) = dir.delta();
            pos.offset(dx, dy)
        })
        .filter(|p| self.cell(*p).is_some_and(|c| c.occupant.is_none()))
        .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Occupant) -> bool) -> usize {
        self.cells
            .iter()
            .filter_map(|c| c.occupant.as_ref())
            .filter(|o| predicate(o))
            .count()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.revealed).count()
    }
}
