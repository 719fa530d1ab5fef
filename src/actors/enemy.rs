//! Enemy runtime state on the radial battlefield.
//!
//! Enemies only track their distance to the player. An enemy inside its
//! detection range closes in at full speed until it reaches attack range;
//! outside detection range it drifts in at half speed. A chasing enemy's
//! closing speed is scaled by the player's pursuit factor.

use crate::data::enemies::{EnemyDefinition, EnemyStats, EnemyTier, EnemyType};

const UNDETECTED_SPEED_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyState {
    /// Unique within a run, assigned by the spawner.
    pub id: u64,
    pub kind: EnemyType,
    pub tier: EnemyTier,
    pub stats: EnemyStats,
    pub current_hp: f64,
    pub distance: f64,
    pub attack_timer: f64,
    pub slow_factor: f64,
    pub slow_remaining: f64,
}

impl EnemyState {
    pub fn new(id: u64, def: &EnemyDefinition, distance: f64) -> Self {
        Self {
            id,
            kind: def.id,
            tier: def.tier,
            stats: def.stats,
            current_hp: def.stats.max_hp,
            distance: distance.max(0.0),
            attack_timer: 0.0,
            slow_factor: 1.0,
            slow_remaining: 0.0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0.0
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.tier, EnemyTier::MiniBoss | EnemyTier::Boss)
    }

    /// Applies damage and returns true if this hit killed the enemy.
    pub fn take_damage(&mut self, amount: f64) -> bool {
        if !self.is_alive() || amount <= 0.0 {
            return false;
        }
        self.current_hp = (self.current_hp - amount).max(0.0);
        !self.is_alive()
    }

    /// Slows movement. A stronger or longer slow replaces a weaker one.
    pub fn apply_slow(&mut self, factor: f64, duration: f64) {
        self.slow_factor = self.slow_factor.min(factor.clamp(0.0, 1.0));
        self.slow_remaining = self.slow_remaining.max(duration);
    }

    pub fn effective_speed(&self) -> f64 {
        self.stats.move_speed * self.slow_factor
    }

    /// Advances movement and attack timers by `dt` seconds.
    ///
    /// `pursuit` scales the closing speed while the player is detected.
    /// Returns the damage dealt to the player this tick, if the enemy attacked.
    pub fn tick(&mut self, dt: f64, pursuit: f64) -> Option<f64> {
        if !self.is_alive() || dt <= 0.0 {
            return None;
        }

        if self.attack_timer > 0.0 {
            self.attack_timer = (self.attack_timer - dt).max(0.0);
        }

        let detected = self.distance <= self.stats.detection_range;
        let speed = if detected {
            self.effective_speed() * pursuit
        } else {
            self.effective_speed() * UNDETECTED_SPEED_FACTOR
        };
        if self.distance > self.stats.attack_range {
            self.distance = (self.distance - speed * dt).max(self.stats.attack_range);
        }

        if self.slow_remaining > 0.0 {
            self.slow_remaining -= dt;
            if self.slow_remaining <= 0.0 {
                self.slow_remaining = 0.0;
                self.slow_factor = 1.0;
            }
        }

        if detected && self.distance <= self.stats.attack_range && self.attack_timer <= 0.0 {
            self.attack_timer = self.stats.attack_cooldown;
            return Some(self.stats.attack_damage);
        }
        None
    }
}
