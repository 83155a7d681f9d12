//! One fight between the hero and a single enemy.
//!
//! A round is driven in two calls: [`Encounter::begin_round`] runs the enemy's
//! pre-turn hook, then [`Encounter::attack`] resolves the exchange, weapon
//! wear and the end-of-round status tick. Bonuses can be used in between
//! without ending the round.

use combat::{Combat, Combatant, Enemy, EnemyKind, PreTurn, StatusTick};
use dice::Dice;
use error::GameError;
use hero::{Hero, InventoryAction};
use items::{BonusOutcome, Weapon};
use serde::{Deserialize, Serialize};

/// How an encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Victory,
    Defeat,
    Fled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterState {
    AwaitingPreTurn,
    AwaitingPlayerAction,
    Resolved(Outcome),
}

impl EncounterState {
    fn label(self) -> &'static str {
        match self {
            EncounterState::AwaitingPreTurn => "waiting for the enemy",
            EncounterState::AwaitingPlayerAction => "waiting for the player",
            EncounterState::Resolved(_) => "the fight is over",
        }
    }
}

/// What the player picked on their turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatAction {
    Attack,
    OpenInventory,
}

/// Take the weapon a defeated skeleton left behind?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootSwapDecision(pub bool);

/// Result of the enemy's pre-turn hook
#[derive(Debug, Clone, PartialEq)]
pub struct RoundStart {
    pub round: u32,
    pub pre_turn: PreTurn,
    pub logs: Vec<String>,
    pub outcome: Option<Outcome>,
}

/// Everything one attack changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exchange {
    pub dealt: f32,
    pub taken: f32,
    pub ticks: Vec<StatusTick>,
    /// The hero's weapon ran dry and was swapped for the fist
    pub hero_weapon_lost: Option<Weapon>,
    /// Same for a skeleton's weapon
    pub enemy_weapon_lost: Option<Weapon>,
    pub coins: u32,
    /// Weapon offered as a swap after a victory
    pub loot: Option<Weapon>,
    pub outcome: Option<Outcome>,
    pub logs: Vec<String>,
}

/// Plain view of the engaged enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub kind: EnemyKind,
    pub lvl: u32,
    pub hp: f32,
    pub max_hp: f32,
    pub weapon: Option<String>,
    pub round: u32,
    pub state: EncounterState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    enemy: Enemy,
    state: EncounterState,
    round: u32,
    loot: Option<Weapon>,
}

impl Encounter {
    pub fn new(enemy: Enemy, hero: &mut Hero) -> Self {
        hero.fight = true;
        tracing::info!(enemy = enemy.name(), lvl = enemy.lvl, "encounter started");
        Self {
            enemy,
            state: EncounterState::AwaitingPreTurn,
            round: 1,
            loot: None,
        }
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            EncounterState::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Loot still waiting for the player's decision
    pub fn pending_loot(&self) -> Option<&Weapon> {
        self.loot.as_ref()
    }

    fn expect_state(&self, wanted: EncounterState, action: &'static str) -> Result<(), GameError> {
        if self.state == wanted {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                action,
                phase: self.state.label(),
            })
        }
    }

    fn resolve(&mut self, hero: &mut Hero, outcome: Outcome) {
        self.state = EncounterState::Resolved(outcome);
        hero.fight = false;
        tracing::info!(
            enemy = self.enemy.name(),
            rounds = self.round,
            ?outcome,
            "encounter resolved"
        );
    }

    /// Step 1 of a round: the enemy's pre-turn hook
    pub fn begin_round(
        &mut self,
        hero: &mut Hero,
        dice: &mut dyn Dice,
    ) -> Result<RoundStart, GameError> {
        self.expect_state(EncounterState::AwaitingPreTurn, "start a round")?;

        let pre_turn = self.enemy.before_turn(&mut hero.effects, dice);
        let mut logs = Vec::new();
        let mut outcome = None;

        match &pre_turn {
            PreTurn::Idle => {}
            PreTurn::Fled => {
                logs.push(format!("The {} flees!", self.enemy.name()));
                self.resolve(hero, Outcome::Fled);
                outcome = Some(Outcome::Fled);
            }
            PreTurn::Inflicted {
                kind,
                turns,
                damage_per_turn,
            } => {
                logs.push(format!(
                    "The {} inflicts {kind} on you ({damage_per_turn} damage for {turns} turns)",
                    self.enemy.name()
                ));
            }
            PreTurn::Summoned(_) => {
                logs.push(format!("The {} calls for help!", self.enemy.name()));
            }
        }

        if outcome.is_none() {
            self.state = EncounterState::AwaitingPlayerAction;
        }

        Ok(RoundStart {
            round: self.round,
            pre_turn,
            logs,
            outcome,
        })
    }

    /// Use something from the bag; the round does not advance
    pub fn use_bonus(
        &mut self,
        hero: &mut Hero,
        action: InventoryAction,
    ) -> Result<BonusOutcome, GameError> {
        self.expect_state(EncounterState::AwaitingPlayerAction, "use an item")?;
        let outcome = hero.use_inventory(action)?;
        tracing::debug!(%outcome, "bonus used in combat");
        Ok(outcome)
    }

    /// The player's attack, the enemy's reply, weapon wear, then status ticks
    pub fn attack(&mut self, hero: &mut Hero, dice: &mut dyn Dice) -> Result<Exchange, GameError> {
        self.expect_state(EncounterState::AwaitingPlayerAction, "attack")?;

        let result = Combat::engage(hero, &mut self.enemy, dice);
        let mut exchange = Exchange {
            dealt: result.dealt,
            taken: result.taken,
            logs: result.logs,
            ..Exchange::default()
        };

        if result.attacker_died {
            self.resolve(hero, Outcome::Defeat);
            exchange.outcome = Some(Outcome::Defeat);
            return Ok(exchange);
        }

        exchange.hero_weapon_lost = hero.ensure_weapon();
        if let Some(lost) = &exchange.hero_weapon_lost {
            exchange
                .logs
                .push(format!("Your {} is spent; you fight bare-handed", lost.name));
        }

        if result.defeated {
            exchange.coins = self.enemy.reward_coins;
            hero.coins += exchange.coins;
            exchange
                .logs
                .push(format!("You earn {} coins", exchange.coins));

            if let Some(loot) = self.enemy.drop_loot() {
                exchange
                    .logs
                    .push(format!("The {} dropped a {loot}", self.enemy.name()));
                exchange.loot = Some(loot.clone());
                self.loot = Some(loot);
            }

            self.resolve(hero, Outcome::Victory);
            exchange.outcome = Some(Outcome::Victory);
            return Ok(exchange);
        }

        exchange.enemy_weapon_lost = self.enemy.ensure_weapon();
        if let Some(lost) = &exchange.enemy_weapon_lost {
            exchange.logs.push(format!(
                "The {}'s {} is spent",
                self.enemy.name(),
                lost.name
            ));
        }

        exchange.ticks = hero.tick_effects();
        for tick in &exchange.ticks {
            exchange.logs.push(format!(
                "You suffer {} {} damage ({} turns left)",
                tick.damage, tick.kind, tick.turns_left
            ));
        }

        if !hero.is_alive() {
            exchange.logs.push(format!("{} succumbed", hero.name));
            self.resolve(hero, Outcome::Defeat);
            exchange.outcome = Some(Outcome::Defeat);
            return Ok(exchange);
        }

        self.round += 1;
        self.state = EncounterState::AwaitingPreTurn;
        Ok(exchange)
    }

    /// Settle the loot offer; returns the hero's old weapon if one was swapped out
    pub fn resolve_loot(
        &mut self,
        hero: &mut Hero,
        decision: LootSwapDecision,
    ) -> Result<Option<Weapon>, GameError> {
        let Some(loot) = self.loot.take() else {
            return Err(GameError::WrongPhase {
                action: "take loot",
                phase: "nothing was dropped",
            });
        };

        if decision.0 {
            Ok(hero.equip(loot))
        } else {
            tracing::debug!(weapon = %loot, "loot declined");
            Ok(None)
        }
    }

    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            kind: self.enemy.kind,
            lvl: self.enemy.lvl,
            hp: self.enemy.hp(),
            max_hp: self.enemy.max_hp(),
            weapon: self.enemy.weapon.as_ref().map(|w| w.name.clone()),
            round: self.round,
            state: self.state,
        }
    }
}
