//src/items/src/weapon.rs
use dice::Dice;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter};

/// Ammunition families; each matches exactly one ranged weapon kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum AmmoKind {
    Arrows,
    Bullets,
}

/// Every weapon the board can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize)]
pub enum WeaponKind {
    Fist,
    Sword,
    Axe,
    Club,
    Bow,
    Pistol,
}

impl WeaponKind {
    /// Kinds that can be generated as loot (the fist never is)
    pub const LOOT: [WeaponKind; 5] = [
        WeaponKind::Sword,
        WeaponKind::Axe,
        WeaponKind::Club,
        WeaponKind::Bow,
        WeaponKind::Pistol,
    ];

    pub fn max_damage(self) -> f32 {
        match self {
            WeaponKind::Fist => 20.0,
            WeaponKind::Sword => 35.0,
            WeaponKind::Axe => 45.0,
            WeaponKind::Club => 40.0,
            WeaponKind::Bow => 50.0,
            WeaponKind::Pistol => 60.0,
        }
    }

    /// Ammo the kind fires, `None` for melee
    pub fn ammo_kind(self) -> Option<AmmoKind> {
        match self {
            WeaponKind::Bow => Some(AmmoKind::Arrows),
            WeaponKind::Pistol => Some(AmmoKind::Bullets),
            _ => None,
        }
    }

    /// Hits before a breakable melee weapon falls apart
    pub fn durability(self) -> Option<u32> {
        match self {
            WeaponKind::Club => Some(8),
            _ => None,
        }
    }
}

/// Melee or ranged behaviour of a weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WeaponClass {
    /// Always usable unless it carries a durability counter that ran out
    Melee { durability: Option<u32> },
    /// Usable while `ammo > 0`; every shot spends one round
    Ranged { ammo_kind: AmmoKind, ammo: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub name: String,
    /// Inclusive upper bound of the damage roll
    pub max_damage: f32,
    pub class: WeaponClass,
}

impl Weapon {
    /// Catalog weapon; ranged weapons start empty
    pub fn new(kind: WeaponKind) -> Self {
        let class = match kind.ammo_kind() {
            Some(ammo_kind) => WeaponClass::Ranged { ammo_kind, ammo: 0 },
            None => WeaponClass::Melee {
                durability: kind.durability(),
            },
        };

        Self {
            kind,
            name: kind.to_string(),
            max_damage: kind.max_damage(),
            class,
        }
    }

    /// The always-available fallback weapon
    pub fn fist() -> Self {
        Self::new(WeaponKind::Fist)
    }

    /// Set the loaded ammo (no-op for melee)
    pub fn with_ammo(mut self, rounds: u32) -> Self {
        if let WeaponClass::Ranged { ammo, .. } = &mut self.class {
            *ammo = rounds;
        }
        self
    }

    /// Random loot weapon; ranged ones come with a few rounds
    pub fn random(dice: &mut dyn Dice) -> Self {
        let idx = dice.range(0, WeaponKind::LOOT.len() as u32 - 1) as usize;
        let kind = WeaponKind::LOOT[idx];
        let weapon = Self::new(kind);
        if weapon.is_ranged() {
            let rounds = dice.range(3, 10);
            weapon.with_ammo(rounds)
        } else {
            weapon
        }
    }

    /// Uniform integer in `[0, max_damage]`
    pub fn roll_damage(&self, dice: &mut dyn Dice) -> f32 {
        dice.roll(self.max_damage.max(0.0) as u32) as f32
    }

    /// Rolled damage scaled by the wielder's multiplier (rage for melee,
    /// accuracy for ranged). Ammo and durability are left untouched.
    pub fn damage(&self, multiplier: f32, dice: &mut dyn Dice) -> f32 {
        self.roll_damage(dice) * multiplier
    }

    /// One full attack: roll, then spend a round or a point of durability.
    /// An unavailable weapon deals 0 and nothing is spent.
    pub fn strike(&mut self, multiplier: f32, dice: &mut dyn Dice) -> f32 {
        if !self.is_available() {
            return 0.0;
        }

        let dealt = self.damage(multiplier, dice);
        if self.is_ranged() {
            self.consume_ammo(1);
        } else if let WeaponClass::Melee {
            durability: Some(left),
        } = &mut self.class
        {
            *left = left.saturating_sub(1);
        }
        dealt
    }

    /// Spend `n` rounds; fails without mutation when fewer are loaded
    pub fn consume_ammo(&mut self, n: u32) -> bool {
        match &mut self.class {
            WeaponClass::Ranged { ammo, .. } if *ammo >= n => {
                *ammo -= n;
                true
            }
            _ => false,
        }
    }

    /// Add rounds of the matching ammo kind
    pub fn load_ammo(&mut self, kind: AmmoKind, amount: u32) -> bool {
        match &mut self.class {
            WeaponClass::Ranged { ammo_kind, ammo } if *ammo_kind == kind => {
                *ammo += amount;
                true
            }
            _ => false,
        }
    }

    pub fn is_available(&self) -> bool {
        match self.class {
            WeaponClass::Melee { durability } => durability.is_none_or(|d| d > 0),
            WeaponClass::Ranged { ammo, .. } => ammo > 0,
        }
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self.class, WeaponClass::Ranged { .. })
    }

    pub fn is_fallback(&self) -> bool {
        self.kind == WeaponKind::Fist
    }

    pub fn ammo(&self) -> Option<u32> {
        match self.class {
            WeaponClass::Ranged { ammo, .. } => Some(ammo),
            WeaponClass::Melee { .. } => None,
        }
    }

    pub fn ammo_kind(&self) -> Option<AmmoKind> {
        match self.class {
            WeaponClass::Ranged { ammo_kind, .. } => Some(ammo_kind),
            WeaponClass::Melee { .. } => None,
        }
    }

    pub fn durability(&self) -> Option<u32> {
        match self.class {
            WeaponClass::Melee { durability } => durability,
            WeaponClass::Ranged { .. } => None,
        }
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Self::fist()
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (max {})", self.name, self.max_damage)?;
        match self.class {
            WeaponClass::Ranged { ammo_kind, ammo } => write!(f, " [{ammo} {ammo_kind}]"),
            WeaponClass::Melee {
                durability: Some(d),
            } => write!(f, " [{d} uses]"),
            WeaponClass::Melee { durability: None } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dice::ScriptedDice;
    use proptest::prelude::*;

    #[test]
    fn catalog_classes() {
        assert!(!Weapon::fist().is_ranged());
        assert_eq!(Weapon::fist().max_damage, 20.0);
        assert_eq!(Weapon::new(WeaponKind::Bow).ammo_kind(), Some(AmmoKind::Arrows));
        assert_eq!(Weapon::new(WeaponKind::Pistol).ammo_kind(), Some(AmmoKind::Bullets));
        assert_eq!(Weapon::new(WeaponKind::Club).durability(), Some(8));
        assert!(Weapon::fist().is_fallback());
    }

    #[test]
    fn melee_damage_scales_with_rage() {
        let sword = Weapon::new(WeaponKind::Sword);
        let mut dice = ScriptedDice::with_rolls([10]);
        assert_eq!(sword.damage(1.5, &mut dice), 15.0);
    }

    #[test]
    fn roll_never_exceeds_max_damage() {
        let fist = Weapon::fist();
        let mut dice = ScriptedDice::with_rolls([99]);
        assert_eq!(fist.roll_damage(&mut dice), 20.0);
    }

    #[test]
    fn ranged_strike_spends_one_round() {
        let mut bow = Weapon::new(WeaponKind::Bow).with_ammo(2);
        let mut dice = ScriptedDice::with_rolls([10, 10]);

        assert_eq!(bow.strike(2.0, &mut dice), 20.0);
        assert_eq!(bow.ammo(), Some(1));
        assert!(bow.is_available());

        bow.strike(1.0, &mut dice);
        assert_eq!(bow.ammo(), Some(0));
        assert!(!bow.is_available());
    }

    #[test]
    fn empty_bow_deals_nothing() {
        let mut bow = Weapon::new(WeaponKind::Bow);
        let mut dice = ScriptedDice::with_rolls([50]);
        assert_eq!(bow.strike(1.0, &mut dice), 0.0);
        assert_eq!(bow.ammo(), Some(0));
        // the roll was not drawn
        assert_eq!(dice.remaining_rolls(), 1);
    }

    #[test]
    fn club_breaks_after_its_uses() {
        let mut club = Weapon::new(WeaponKind::Club);
        let mut dice = ScriptedDice::new();
        for _ in 0..8 {
            assert!(club.is_available());
            club.strike(1.0, &mut dice);
        }
        assert_eq!(club.durability(), Some(0));
        assert!(!club.is_available());
    }

    #[test]
    fn ammo_only_loads_into_matching_weapon() {
        let mut bow = Weapon::new(WeaponKind::Bow);
        assert!(!bow.load_ammo(AmmoKind::Bullets, 5));
        assert!(bow.load_ammo(AmmoKind::Arrows, 5));
        assert_eq!(bow.ammo(), Some(5));

        let mut sword = Weapon::new(WeaponKind::Sword);
        assert!(!sword.load_ammo(AmmoKind::Arrows, 5));
        assert!(!sword.consume_ammo(1));
    }

    #[test]
    fn random_loot_is_never_a_fist() {
        let mut dice = dice::SeededDice::new(11);
        for _ in 0..200 {
            let weapon = Weapon::random(&mut dice);
            assert!(!weapon.is_fallback());
            if weapon.is_ranged() {
                assert!(weapon.is_available());
            }
        }
    }

    proptest! {
        #[test]
        fn consume_fails_iff_short(ammo in 0u32..50, n in 0u32..60) {
            let mut pistol = Weapon::new(WeaponKind::Pistol).with_ammo(ammo);
            let ok = pistol.consume_ammo(n);
            prop_assert_eq!(ok, ammo >= n);
            let expected = if ok { ammo - n } else { ammo };
            prop_assert_eq!(pistol.ammo(), Some(expected));
        }

        #[test]
        fn repeated_single_shots(ammo in 1u32..40, shots in 0u32..40) {
            let shots = shots.min(ammo);
            let mut bow = Weapon::new(WeaponKind::Bow).with_ammo(ammo);
            for _ in 0..shots {
                prop_assert!(bow.consume_ammo(1));
            }
            prop_assert_eq!(bow.ammo(), Some(ammo - shots));
        }

        #[test]
        fn strike_spends_like_a_single_consume(ammo in 0u32..20, roll in 0u32..30) {
            let mut fired = Weapon::new(WeaponKind::Pistol).with_ammo(ammo);
            let mut consumed = fired.clone();
            let mut dice = ScriptedDice::with_rolls([roll]);

            fired.strike(1.0, &mut dice);
            consumed.consume_ammo(1);
            prop_assert_eq!(fired.ammo(), consumed.ammo());
        }

        #[test]
        fn availability_tracks_ammo(ammo in 0u32..10) {
            let bow = Weapon::new(WeaponKind::Bow).with_ammo(ammo);
            prop_assert_eq!(bow.is_available(), ammo > 0);
            prop_assert!(Weapon::new(WeaponKind::Sword).is_available());
        }
    }
}
