//! A whole session: the board, the hero, and the fight in progress.

use combat::{Combatant, EnemyKind, Position, PreTurn, StatusKind};
use dice::Dice;
use dungeon::{Board, MoveDirection, Occupant};
use error::GameError;
use hero::{Hero, InventoryAction, InventorySnapshot, Pickup};
use items::{BonusKind, BonusOutcome, Weapon};
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::encounter::{
    Encounter, EncounterSnapshot, Exchange, LootSwapDecision, Outcome, RoundStart,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Exploring,
    /// Standing on a weapon, waiting for a swap decision
    WeaponOffer,
    Fighting,
    /// A defeated skeleton dropped a weapon
    LootOffer,
    Won,
    Lost,
}

impl Phase {
    fn label(self) -> &'static str {
        match self {
            Phase::Exploring => "exploring",
            Phase::WeaponOffer => "deciding on a weapon",
            Phase::Fighting => "fighting",
            Phase::LootOffer => "deciding on loot",
            Phase::Won => "the game is won",
            Phase::Lost => "the game is lost",
        }
    }

    pub fn is_over(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// Swap the equipped weapon for the one on the floor?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSwapDecision(pub bool);

/// What a single step did
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The edge of the board is in the way
    Blocked,
    Moved,
    EncounterStarted { kind: EnemyKind, lvl: u32 },
    WeaponOffered(Weapon),
    BonusPicked(Pickup),
    /// The bag pouch for this bonus is full; it stays where it is
    BonusLeft(BonusKind),
    TowerUsed { revealed: usize },
    ReachedGoal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: StatusKind,
    pub turns_left: u32,
    pub damage_per_turn: f32,
}

/// Everything a frontend needs to draw the status panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub name: String,
    pub lvl: u32,
    pub hp: f32,
    pub max_hp: f32,
    pub coins: u32,
    pub rage: f32,
    pub accuracy: f32,
    pub position: Position,
    pub inventory: InventorySnapshot,
    pub effects: Vec<EffectView>,
    pub enemy: Option<EncounterSnapshot>,
    pub pending_weapon: Option<String>,
    pub revealed_cells: usize,
}

const NO_FIGHT: GameError = GameError::WrongPhase {
    action: "fight",
    phase: "no enemy is engaged",
};

pub struct Game {
    config: GameConfig,
    board: Board,
    hero: Hero,
    dice: Box<dyn Dice>,
    phase: Phase,
    encounter: Option<Encounter>,
    /// Weapon lifted off the floor while the player decides
    offer: Option<Weapon>,
}

impl Game {
    /// Generate a board from `config` and put the hero on the start cell
    pub fn new(config: &GameConfig, mut dice: Box<dyn Dice>) -> Result<Self, GameError> {
        config.validate()?;
        let board = Board::generate(config.width, config.height, config.difficulty, dice.as_mut())?;
        Ok(Self::with_board(config, board, dice))
    }

    /// Start on a prepared board
    pub fn with_board(config: &GameConfig, mut board: Board, dice: Box<dyn Dice>) -> Self {
        let mut hero = Hero::new(config.player_name.clone());
        hero.position = board.start;
        board.reveal_around(board.start, 1);

        Self {
            config: config.clone(),
            board,
            hero,
            dice,
            phase: Phase::Exploring,
            encounter: None,
            offer: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn hero_mut(&mut self) -> &mut Hero {
        &mut self.hero
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn pending_weapon(&self) -> Option<&Weapon> {
        self.offer.as_ref()
    }

    fn phase_error(&self, action: &'static str) -> GameError {
        match self.phase {
            Phase::Lost => GameError::PlayerDefeated,
            phase => GameError::WrongPhase {
                action,
                phase: phase.label(),
            },
        }
    }

    fn expect_phase(&self, wanted: Phase, action: &'static str) -> Result<(), GameError> {
        if self.phase == wanted {
            Ok(())
        } else {
            Err(self.phase_error(action))
        }
    }

    pub fn step(&mut self, direction: MoveDirection) -> Result<StepOutcome, GameError> {
        self.expect_phase(Phase::Exploring, "move")?;

        let (dx, dy) = direction.delta();
        let target = self.hero.position.offset(dx, dy);
        if !self.board.in_bounds(target) {
            return Ok(StepOutcome::Blocked);
        }

        self.hero.position = target;
        self.board.reveal(target);
        tracing::trace!(%target, "hero moved");

        let Some(occupant) = self.board.take(target) else {
            return Ok(StepOutcome::Moved);
        };

        let outcome = match occupant {
            Occupant::Goal => {
                self.board.place(target, Occupant::Goal)?;
                self.phase = Phase::Won;
                tracing::info!(coins = self.hero.coins, "goal reached");
                StepOutcome::ReachedGoal
            }
            Occupant::Enemy(enemy) => {
                let (kind, lvl) = (enemy.kind, enemy.lvl);
                self.encounter = Some(Encounter::new(enemy, &mut self.hero));
                self.phase = Phase::Fighting;
                StepOutcome::EncounterStarted { kind, lvl }
            }
            Occupant::Weapon(weapon) => {
                self.offer = Some(weapon.clone());
                self.phase = Phase::WeaponOffer;
                StepOutcome::WeaponOffered(weapon)
            }
            Occupant::Bonus(bonus) => {
                let kind = bonus.kind();
                if self.hero.bag.is_full(kind) {
                    self.board.place(target, Occupant::Bonus(bonus))?;
                    StepOutcome::BonusLeft(kind)
                } else {
                    StepOutcome::BonusPicked(self.hero.pick_up(bonus)?)
                }
            }
            Occupant::Tower(tower) => {
                self.board.place(target, Occupant::Tower(tower))?;
                if self.config.disable_interactions {
                    StepOutcome::Moved
                } else {
                    let revealed = tower.interact(&mut self.board, target);
                    StepOutcome::TowerUsed { revealed }
                }
            }
        };

        Ok(outcome)
    }

    /// Settle a weapon found on the floor
    pub fn decide_weapon_swap(
        &mut self,
        decision: WeaponSwapDecision,
    ) -> Result<Option<Weapon>, GameError> {
        self.expect_phase(Phase::WeaponOffer, "swap weapons")?;
        let at = self.hero.position;
        let Some(weapon) = self.offer.take() else {
            self.phase = Phase::Exploring;
            return Ok(None);
        };

        let dropped = if decision.0 {
            let old = self.hero.equip(weapon);
            if let Some(old) = &old {
                self.board.place(at, Occupant::Weapon(old.clone()))?;
            }
            old
        } else {
            self.board.place(at, Occupant::Weapon(weapon))?;
            None
        };

        self.phase = Phase::Exploring;
        Ok(dropped)
    }

    /// Use something from the bag, in or out of a fight
    pub fn inventory(&mut self, action: InventoryAction) -> Result<BonusOutcome, GameError> {
        match self.phase {
            Phase::Fighting => match self.encounter.as_mut() {
                Some(encounter) => encounter.use_bonus(&mut self.hero, action),
                None => Err(NO_FIGHT),
            },
            Phase::Exploring | Phase::WeaponOffer => self.hero.use_inventory(action),
            _ => Err(self.phase_error("use an item")),
        }
    }

    /// Enemy pre-turn; places any spider that answered a call for help
    pub fn begin_round(&mut self) -> Result<RoundStart, GameError> {
        self.expect_phase(Phase::Fighting, "start a round")?;
        let Some(encounter) = self.encounter.as_mut() else {
            return Err(NO_FIGHT);
        };
        let mut start = encounter.begin_round(&mut self.hero, self.dice.as_mut())?;

        if let PreTurn::Summoned(spider) = &start.pre_turn {
            let line = self.place_reinforcement(spider.clone());
            start.logs.push(line);
        }

        if start.outcome.is_some() {
            self.end_encounter();
        }
        Ok(start)
    }

    fn place_reinforcement(&mut self, mut spider: combat::Enemy) -> String {
        let free = self.board.free_neighbours(self.hero.position);
        if free.is_empty() {
            tracing::warn!(at = %self.hero.position, "no room for reinforcement; discarded");
            return "No help arrives".into();
        }

        let idx = self.dice.range(0, free.len() as u32 - 1) as usize;
        let at = free[idx.min(free.len() - 1)];
        spider.position = at;
        let name = spider.name().to_owned();
        match self.board.place(at, Occupant::Enemy(spider)) {
            Ok(()) => {
                tracing::debug!(%at, "reinforcement placed");
                format!("A {name} crawls out at {at}")
            }
            Err(err) => {
                tracing::warn!(%at, %err, "reinforcement discarded");
                "No help arrives".into()
            }
        }
    }

    /// Player attack and everything that follows it
    pub fn attack(&mut self) -> Result<Exchange, GameError> {
        self.expect_phase(Phase::Fighting, "attack")?;
        let Some(encounter) = self.encounter.as_mut() else {
            return Err(NO_FIGHT);
        };
        let exchange = encounter.attack(&mut self.hero, self.dice.as_mut())?;

        match exchange.outcome {
            Some(Outcome::Victory) => {
                if exchange.loot.is_some() {
                    self.phase = Phase::LootOffer;
                } else {
                    self.end_encounter();
                }
            }
            Some(Outcome::Defeat) => {
                self.encounter = None;
                self.phase = Phase::Lost;
                tracing::info!(coins = self.hero.coins, "hero defeated");
            }
            Some(Outcome::Fled) | None => {}
        }
        Ok(exchange)
    }

    /// Settle a skeleton's dropped weapon
    pub fn resolve_loot(
        &mut self,
        decision: LootSwapDecision,
    ) -> Result<Option<Weapon>, GameError> {
        self.expect_phase(Phase::LootOffer, "take loot")?;
        let old = match self.encounter.as_mut() {
            Some(encounter) => encounter.resolve_loot(&mut self.hero, decision)?,
            None => None,
        };
        if let Some(old) = &old {
            self.board
                .place(self.hero.position, Occupant::Weapon(old.clone()))?;
        }
        self.end_encounter();
        Ok(old)
    }

    fn end_encounter(&mut self) {
        self.encounter = None;
        self.phase = Phase::Exploring;
    }

    pub fn is_revealed(&self, pos: Position) -> bool {
        self.board.is_revealed(pos, self.config.reveal_all)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            name: self.hero.name.clone(),
            lvl: self.hero.lvl,
            hp: self.hero.hp(),
            max_hp: self.hero.max_hp(),
            coins: self.hero.coins,
            rage: self.hero.rage,
            accuracy: self.hero.accuracy,
            position: self.hero.position,
            inventory: self.hero.inventory(),
            effects: self
                .hero
                .effects
                .active()
                .map(|(kind, effect)| EffectView {
                    kind,
                    turns_left: effect.turns_left,
                    damage_per_turn: effect.damage_per_turn,
                })
                .collect(),
            enemy: self.encounter.as_ref().map(Encounter::snapshot),
            pending_weapon: self.offer.as_ref().map(|w| w.to_string()),
            revealed_cells: self.board.revealed_count(),
        }
    }
}
