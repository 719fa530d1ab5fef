//! Player stats and health.

use crate::core::constants::{
    MIN_PURSUIT_FACTOR, PLAYER_BASE_ATTACK, PLAYER_BASE_MOVE_SPEED, XP_PICKUP_RANGE_MAX,
};
use crate::data::characters::{CharacterClass, CharacterDefinition, Passive};
use serde::{Deserialize, Serialize};

/// Upper bound for cooldown reduction so cooldowns never reach zero.
const MAX_COOLDOWN_REDUCTION: f64 = 0.9;

/// Mutable player stats for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub max_hp: f64,
    pub attack_power: f64,
    pub move_speed: f64,
    /// Fraction removed from every skill cooldown (0.1 = 10%).
    pub cooldown_reduction: f64,
    pub xp_multiplier: f64,
    pub gold_multiplier: f64,
    pub pickup_range: f64,
    /// Extra fraction of damage for every element.
    pub elemental_damage: f64,
}

impl PlayerStats {
    pub fn from_definition(def: &CharacterDefinition) -> Self {
        Self {
            max_hp: def.max_hp,
            attack_power: def.attack_power,
            move_speed: def.move_speed,
            cooldown_reduction: 0.0,
            xp_multiplier: 1.0,
            gold_multiplier: 1.0,
            pickup_range: def.pickup_range,
            elemental_damage: 0.0,
        }
    }

    /// Attack power relative to the baseline character.
    pub fn attack_multiplier(&self) -> f64 {
        self.attack_power / PLAYER_BASE_ATTACK
    }

    /// Multiplier applied to skill cooldowns.
    pub fn cooldown_multiplier(&self) -> f64 {
        1.0 - self.cooldown_reduction
    }

    /// Closing speed multiplier for enemies chasing the player.
    ///
    /// 1.0 at base move speed, falling toward [`MIN_PURSUIT_FACTOR`] as the
    /// player gets faster.
    pub fn pursuit_factor(&self) -> f64 {
        if self.move_speed <= 0.0 {
            return 1.0;
        }
        (PLAYER_BASE_MOVE_SPEED / self.move_speed).clamp(MIN_PURSUIT_FACTOR, 1.0)
    }
}

/// Additive stat change from a meta upgrade or an in-run effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatModifier {
    /// Flat max HP. Current HP rises by the same amount.
    MaxHp(f64),
    /// Fraction of base attack power.
    AttackPercent(f64),
    MoveSpeed(f64),
    CooldownReduction(f64),
    XpMultiplier(f64),
    GoldMultiplier(f64),
    PickupRange(f64),
    ElementalDamage(f64),
}

/// The player during a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub class: CharacterClass,
    pub stats: PlayerStats,
    pub current_hp: f64,
    pub passive: Passive,
}

impl PlayerState {
    pub fn new(def: &CharacterDefinition) -> Self {
        let stats = PlayerStats::from_definition(def);
        Self {
            class: def.class,
            stats,
            current_hp: stats.max_hp,
            passive: def.passive,
        }
    }

    pub fn max_hp(&self) -> f64 {
        self.stats.max_hp
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp <= 0.0
    }

    /// Applies damage and returns true if this hit killed the player.
    pub fn take_damage(&mut self, amount: f64) -> bool {
        if self.is_dead() || amount <= 0.0 {
            return false;
        }
        self.current_hp = (self.current_hp - amount).max(0.0);
        self.is_dead()
    }

    /// Heals up to max HP and returns the amount actually restored.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if self.is_dead() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount).min(self.stats.max_hp);
        self.current_hp - before
    }

    /// Passive regeneration for `dt` seconds. Returns HP restored.
    pub fn regenerate(&mut self, dt: f64) -> f64 {
        match self.passive {
            Passive::Regeneration { per_second } => self.heal(per_second * dt),
            _ => 0.0,
        }
    }

    pub fn apply_modifier(&mut self, modifier: StatModifier) {
        let stats = &mut self.stats;
        match modifier {
            StatModifier::MaxHp(value) => {
                stats.max_hp = (stats.max_hp + value).max(1.0);
                self.current_hp = (self.current_hp + value).clamp(0.0, stats.max_hp);
            }
            StatModifier::AttackPercent(value) => {
                stats.attack_power += PLAYER_BASE_ATTACK * value;
            }
            StatModifier::MoveSpeed(value) => stats.move_speed += value,
            StatModifier::CooldownReduction(value) => {
                stats.cooldown_reduction =
                    (stats.cooldown_reduction + value).clamp(0.0, MAX_COOLDOWN_REDUCTION);
            }
            StatModifier::XpMultiplier(value) => stats.xp_multiplier += value,
            StatModifier::GoldMultiplier(value) => stats.gold_multiplier += value,
            StatModifier::PickupRange(value) => {
                stats.pickup_range = (stats.pickup_range + value).min(XP_PICKUP_RANGE_MAX);
            }
            StatModifier::ElementalDamage(value) => stats.elemental_damage += value,
        }
    }

    pub fn apply_modifiers(&mut self, modifiers: &[StatModifier]) {
        for modifier in modifiers {
            self.apply_modifier(*modifier);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::characters::get_character;

    fn fire_mage() -> PlayerState {
        PlayerState::new(get_character(CharacterClass::FireMage).unwrap())
    }

    #[test]
    fn test_new_player_starts_at_full_health() {
        let player = fire_mage();
        assert_eq!(player.current_hp, 100.0);
        assert_eq!(player.stats.attack_multiplier(), 1.0);
        assert!(!player.is_dead());
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut player = fire_mage();
        assert!(!player.take_damage(40.0));
        assert_eq!(player.current_hp, 60.0);
        assert!(player.take_damage(500.0));
        assert_eq!(player.current_hp, 0.0);
        // Already dead: further hits are not a new death
        assert!(!player.take_damage(10.0));
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut player = fire_mage();
        player.take_damage(10.0);
        assert_eq!(player.heal(25.0), 10.0);
        assert_eq!(player.current_hp, 100.0);
    }

    #[test]
    fn test_regeneration_only_for_holy_adept() {
        let mut fire = fire_mage();
        fire.take_damage(10.0);
        assert_eq!(fire.regenerate(1.0), 0.0);

        let mut holy = PlayerState::new(get_character(CharacterClass::LightMage).unwrap());
        holy.take_damage(10.0);
        assert!((holy.regenerate(2.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_hp_modifier_raises_current_hp() {
        let mut player = fire_mage();
        player.take_damage(30.0);
        player.apply_modifier(StatModifier::MaxHp(20.0));
        assert_eq!(player.max_hp(), 120.0);
        assert_eq!(player.current_hp, 90.0);
    }

    #[test]
    fn test_modifier_caps() {
        let mut player = fire_mage();
        player.apply_modifiers(&[
            StatModifier::CooldownReduction(2.0),
            StatModifier::PickupRange(10.0),
            StatModifier::AttackPercent(0.5),
        ]);
        assert_eq!(player.stats.cooldown_reduction, 0.9);
        assert_eq!(player.stats.pickup_range, XP_PICKUP_RANGE_MAX);
        assert!((player.stats.attack_multiplier() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_pursuit_factor_falls_with_move_speed() {
        let mut player = fire_mage();
        assert_eq!(player.stats.pursuit_factor(), 1.0);
        player.apply_modifier(StatModifier::MoveSpeed(4.5));
        assert!((player.stats.pursuit_factor() - 0.5).abs() < 1e-9);
        player.apply_modifier(StatModifier::MoveSpeed(10.0));
        assert_eq!(player.stats.pursuit_factor(), MIN_PURSUIT_FACTOR);
    }
}
