// src/combat/src/enemy.rs

use dice::Dice;
use items::Weapon;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::combatant::Combatant;
use crate::health::Health;
use crate::position::Position;
use crate::status_effect::{StatusEffects, StatusKind};

/// Behaviour tuning shared by all enemies
pub mod tuning {
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 10;

    pub const FLEE_THRESHOLD: f32 = 0.15;
    pub const FLEE_CHANCE_LOW_HP: f32 = 0.10;
    pub const INFECTION_CHANCE: f32 = 0.25;
    pub const INFECTION_TURNS: u32 = 3;
    pub const INFECTION_DAMAGE_BASE: f32 = 5.0;

    pub const CALL_THRESHOLD: f32 = 0.15;
    pub const SUMMON_CHANCE_LOW_HP: f32 = 0.10;
    pub const POISON_CHANCE: f32 = 0.10;
    pub const POISON_TURNS: u32 = 2;
    pub const POISON_DAMAGE_BASE: f32 = 15.0;

    /// Chance a skeleton spawns bare-handed
    pub const SKELETON_UNARMED_CHANCE: f32 = 0.25;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum EnemyKind {
    Rat,
    Spider,
    Skeleton,
}

impl EnemyKind {
    pub fn base_hp(self) -> f32 {
        match self {
            EnemyKind::Rat => 100.0,
            EnemyKind::Spider => 80.0,
            EnemyKind::Skeleton => 120.0,
        }
    }

    pub fn base_damage(self) -> f32 {
        match self {
            EnemyKind::Rat => 10.0,
            EnemyKind::Spider => 15.0,
            EnemyKind::Skeleton => 20.0,
        }
    }

    pub fn reward_per_level(self) -> u32 {
        match self {
            EnemyKind::Rat => 200,
            EnemyKind::Spider => 250,
            EnemyKind::Skeleton => 300,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            EnemyKind::Rat => 'r',
            EnemyKind::Spider => 's',
            EnemyKind::Skeleton => 'S',
        }
    }
}

/// `(10 + lvl) / 10`, computed so whole-number stats stay exact
pub fn level_scale(base: f32, lvl: u32) -> f32 {
    base * (10.0 + lvl as f32) / 10.0
}

/// What an enemy did before the player acted
#[derive(Debug, Clone, PartialEq)]
pub enum PreTurn {
    Idle,
    /// The enemy ran away; the encounter is over with no reward
    Fled,
    Inflicted {
        kind: StatusKind,
        turns: u32,
        damage_per_turn: f32,
    },
    /// A fresh spider answered the call
    Summoned(Enemy),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub lvl: u32,
    pub health: Health,
    pub max_enemy_damage: f32,
    pub reward_coins: u32,
    pub position: Position,
    /// Only skeletons fight with a weapon
    pub weapon: Option<Weapon>,
}

impl Enemy {
    /// Enemy at a fixed level; skeletons start bare-handed
    pub fn new(kind: EnemyKind, lvl: u32, position: Position) -> Self {
        let lvl = lvl.clamp(tuning::MIN_LEVEL, tuning::MAX_LEVEL);
        Self {
            kind,
            lvl,
            health: Health::new(level_scale(kind.base_hp(), lvl)),
            max_enemy_damage: level_scale(kind.base_damage(), lvl),
            reward_coins: kind.reward_per_level() * lvl,
            position,
            weapon: (kind == EnemyKind::Skeleton).then(Weapon::fist),
        }
    }

    /// Random level, and a random weapon for skeletons
    pub fn spawn(kind: EnemyKind, position: Position, dice: &mut dyn Dice) -> Self {
        let lvl = dice.range(tuning::MIN_LEVEL, tuning::MAX_LEVEL);
        let enemy = Self::new(kind, lvl, position);
        if kind == EnemyKind::Skeleton && !dice.check(tuning::SKELETON_UNARMED_CHANCE) {
            let weapon = Weapon::random(dice);
            enemy.with_weapon(weapon)
        } else {
            enemy
        }
    }

    /// Arm a skeleton (ignored for other kinds)
    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        if self.kind == EnemyKind::Skeleton {
            self.weapon = Some(weapon);
        }
        self
    }

    pub fn symbol(&self) -> char {
        self.kind.symbol()
    }

    /// Uniform integer in `[0, max_enemy_damage]`
    pub fn roll_enemy_damage(&self, dice: &mut dyn Dice) -> f32 {
        dice.roll(self.max_enemy_damage.max(0.0) as u32) as f32
    }

    /// Runs once per round before the player acts.
    ///
    /// The low-hp flee/summon check always comes before the status check, and
    /// a failed low-hp roll still falls through to the status roll.
    pub fn before_turn(&mut self, target: &mut StatusEffects, dice: &mut dyn Dice) -> PreTurn {
        match self.kind {
            EnemyKind::Rat => {
                if self.health.ratio() < tuning::FLEE_THRESHOLD
                    && dice.check(tuning::FLEE_CHANCE_LOW_HP)
                {
                    self.health.kill();
                    tracing::debug!(lvl = self.lvl, "rat fled");
                    return PreTurn::Fled;
                }
                if dice.check(tuning::INFECTION_CHANCE) {
                    return self.inflict(
                        target,
                        StatusKind::Infection,
                        tuning::INFECTION_TURNS,
                        tuning::INFECTION_DAMAGE_BASE,
                    );
                }
                PreTurn::Idle
            }
            EnemyKind::Spider => {
                if self.health.ratio() < tuning::CALL_THRESHOLD
                    && dice.check(tuning::SUMMON_CHANCE_LOW_HP)
                {
                    tracing::debug!(lvl = self.lvl, "spider called for help");
                    return PreTurn::Summoned(Enemy::new(EnemyKind::Spider, self.lvl, self.position));
                }
                if dice.check(tuning::POISON_CHANCE) {
                    return self.inflict(
                        target,
                        StatusKind::Poison,
                        tuning::POISON_TURNS,
                        tuning::POISON_DAMAGE_BASE,
                    );
                }
                PreTurn::Idle
            }
            EnemyKind::Skeleton => PreTurn::Idle,
        }
    }

    fn inflict(
        &self,
        target: &mut StatusEffects,
        kind: StatusKind,
        turns: u32,
        base_damage: f32,
    ) -> PreTurn {
        let damage_per_turn = level_scale(base_damage, self.lvl);
        if target.inflict(kind, turns, damage_per_turn) {
            tracing::debug!(%kind, turns, damage_per_turn, "status inflicted");
            PreTurn::Inflicted {
                kind,
                turns,
                damage_per_turn,
            }
        } else {
            PreTurn::Idle
        }
    }

    /// Swap an exhausted weapon for the fist; returns the discarded one
    pub fn ensure_weapon(&mut self) -> Option<Weapon> {
        let exhausted = self.weapon.as_ref().is_some_and(|w| !w.is_available());
        if exhausted {
            self.weapon.replace(Weapon::fist())
        } else {
            None
        }
    }

    /// The weapon a defeated skeleton leaves behind; never the bare fist
    pub fn drop_loot(&mut self) -> Option<Weapon> {
        let droppable = self.weapon.as_ref().is_some_and(|w| !w.is_fallback());
        if droppable {
            self.weapon.take()
        } else {
            None
        }
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        match self.kind {
            EnemyKind::Rat => "Rat",
            EnemyKind::Spider => "Spider",
            EnemyKind::Skeleton => "Skeleton",
        }
    }

    fn position(&self) -> Position {
        self.position
    }

    fn health(&self) -> &Health {
        &self.health
    }

    fn health_mut(&mut self) -> &mut Health {
        &mut self.health
    }

    fn attack(&mut self, target: &mut dyn Combatant, dice: &mut dyn Dice) -> f32 {
        let damage = if let Some(weapon) = self.weapon.as_mut() {
            weapon.strike(1.0, dice)
        } else {
            self.roll_enemy_damage(dice)
        };
        target.take_damage(damage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice::ScriptedDice;
    use items::WeaponKind;

    #[test]
    fn stats_scale_with_level() {
        let rat = Enemy::new(EnemyKind::Rat, 1, Position::default());
        assert_eq!(rat.health.max_hp(), 110.0);
        assert_eq!(rat.max_enemy_damage, 11.0);
        assert_eq!(rat.reward_coins, 200);

        let skeleton = Enemy::new(EnemyKind::Skeleton, 10, Position::default());
        assert_eq!(skeleton.health.max_hp(), 240.0);
        assert_eq!(skeleton.reward_coins, 3000);
        assert!(skeleton.weapon.as_ref().is_some_and(Weapon::is_fallback));

        assert!(Enemy::new(EnemyKind::Spider, 3, Position::default()).weapon.is_none());
    }

    #[test]
    fn level_is_clamped() {
        assert_eq!(Enemy::new(EnemyKind::Rat, 0, Position::default()).lvl, 1);
        assert_eq!(Enemy::new(EnemyKind::Rat, 42, Position::default()).lvl, 10);
    }

    #[test]
    fn healthy_rat_infects_on_low_roll() {
        let mut rat = Enemy::new(EnemyKind::Rat, 2, Position::default());
        let mut effects = StatusEffects::new();
        let mut dice = ScriptedDice::new().then_chances([0.2]);

        let pre = rat.before_turn(&mut effects, &mut dice);
        assert_eq!(
            pre,
            PreTurn::Inflicted {
                kind: StatusKind::Infection,
                turns: 3,
                damage_per_turn: 6.0,
            }
        );
        assert!(effects.is_active(StatusKind::Infection));
    }

    #[test]
    fn healthy_rat_does_not_roll_flee() {
        let mut rat = Enemy::new(EnemyKind::Rat, 1, Position::default());
        let mut effects = StatusEffects::new();
        // a single chance is drawn: the infection check
        let mut dice = ScriptedDice::new().then_chances([0.05, 0.05]);

        let pre = rat.before_turn(&mut effects, &mut dice);
        assert!(matches!(pre, PreTurn::Inflicted { .. }));
        assert!(rat.health.is_alive());
        assert_eq!(dice.remaining_chances(), 1);
    }

    #[test]
    fn wounded_rat_flees_before_infecting() {
        let mut rat = Enemy::new(EnemyKind::Rat, 1, Position::default());
        rat.health = Health::with_hp(10.0, 110.0);
        let mut effects = StatusEffects::new();
        let mut dice = ScriptedDice::new().then_chances([0.05, 0.0]);

        assert_eq!(rat.before_turn(&mut effects, &mut dice), PreTurn::Fled);
        assert!(!rat.health.is_alive());
        assert!(!effects.is_active(StatusKind::Infection));
    }

    #[test]
    fn failed_flee_falls_through_to_infection() {
        let mut rat = Enemy::new(EnemyKind::Rat, 1, Position::default());
        rat.health = Health::with_hp(10.0, 110.0);
        let mut effects = StatusEffects::new();
        let mut dice = ScriptedDice::new().then_chances([0.5, 0.1]);

        let pre = rat.before_turn(&mut effects, &mut dice);
        assert!(matches!(pre, PreTurn::Inflicted { kind: StatusKind::Infection, .. }));
    }

    #[test]
    fn rat_does_not_refresh_running_infection() {
        let mut rat = Enemy::new(EnemyKind::Rat, 5, Position::default());
        let mut effects = StatusEffects::new();
        effects.inflict(StatusKind::Infection, 1, 2.0);
        let mut dice = ScriptedDice::new().then_chances([0.0]);

        assert_eq!(rat.before_turn(&mut effects, &mut dice), PreTurn::Idle);
        let infection = effects.get(StatusKind::Infection).copied();
        assert_eq!(infection.map(|e| (e.turns_left, e.damage_per_turn)), Some((1, 2.0)));
    }

    #[test]
    fn spider_poisons() {
        let mut spider = Enemy::new(EnemyKind::Spider, 10, Position::default());
        let mut effects = StatusEffects::new();
        let mut dice = ScriptedDice::new().then_chances([0.09]);

        let pre = spider.before_turn(&mut effects, &mut dice);
        assert_eq!(
            pre,
            PreTurn::Inflicted {
                kind: StatusKind::Poison,
                turns: 2,
                damage_per_turn: 30.0,
            }
        );
    }

    #[test]
    fn wounded_spider_summons_a_twin() {
        let mut spider = Enemy::new(EnemyKind::Spider, 4, Position::new(2, 3));
        spider.health = Health::with_hp(5.0, spider.health.max_hp());
        let mut effects = StatusEffects::new();
        let mut dice = ScriptedDice::new().then_chances([0.01]);

        match spider.before_turn(&mut effects, &mut dice) {
            PreTurn::Summoned(twin) => {
                assert_eq!(twin.kind, EnemyKind::Spider);
                assert_eq!(twin.lvl, 4);
                assert_eq!(twin.health.hp(), twin.health.max_hp());
            }
            other => panic!("expected a summon, got {other:?}"),
        }
        assert!(spider.health.is_alive());
    }

    #[test]
    fn skeleton_pre_turn_draws_nothing() {
        let mut skeleton = Enemy::new(EnemyKind::Skeleton, 1, Position::default());
        let mut effects = StatusEffects::new();
        let mut dice = ScriptedDice::new().then_chances([0.0]);
        assert_eq!(skeleton.before_turn(&mut effects, &mut dice), PreTurn::Idle);
        assert_eq!(dice.remaining_chances(), 1);
    }

    #[test]
    fn skeleton_loot_excludes_the_fist() {
        let mut unarmed = Enemy::new(EnemyKind::Skeleton, 1, Position::default());
        assert_eq!(unarmed.drop_loot(), None);

        let mut armed = Enemy::new(EnemyKind::Skeleton, 1, Position::default())
            .with_weapon(Weapon::new(WeaponKind::Axe));
        let loot = armed.drop_loot();
        assert_eq!(loot.map(|w| w.kind), Some(WeaponKind::Axe));
        assert!(armed.drop_loot().is_none());
    }

    #[test]
    fn skeleton_out_of_arrows_falls_back_to_fist() {
        let mut skeleton = Enemy::new(EnemyKind::Skeleton, 1, Position::default())
            .with_weapon(Weapon::new(WeaponKind::Bow).with_ammo(1));
        let mut target = Enemy::new(EnemyKind::Rat, 1, Position::default());
        let mut dice = ScriptedDice::with_rolls([10]);

        assert_eq!(skeleton.attack(&mut target, &mut dice), 10.0);
        let dropped = skeleton.ensure_weapon();
        assert_eq!(dropped.map(|w| w.kind), Some(WeaponKind::Bow));
        assert!(skeleton.weapon.as_ref().is_some_and(Weapon::is_fallback));
        assert!(skeleton.ensure_weapon().is_none());
    }

    #[test]
    fn spawned_levels_stay_in_range() {
        let mut dice = dice::SeededDice::new(5);
        for _ in 0..100 {
            let enemy = Enemy::spawn(EnemyKind::Skeleton, Position::default(), &mut dice);
            assert!((1..=10).contains(&enemy.lvl));
            assert!(enemy.weapon.is_some());
        }
    }
}
