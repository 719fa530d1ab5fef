//! In-run XP, level and gold bookkeeping.

use crate::data::enemies::EnemyTier;
use crate::data::xp_table::{max_level, xp_required_for_level};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionLedger {
    pub level: u32,
    /// XP toward the next level.
    pub xp: u64,
    pub total_xp: u64,
    pub xp_multiplier: f64,
    pub gold_multiplier: f64,
    /// Gold collected from drops, already scaled.
    pub run_gold: u64,
    pub kills: u64,
    pub elites_defeated: u64,
    pub mini_bosses_defeated: u64,
    pub boss_defeated: bool,
}

impl Default for ProgressionLedger {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl ProgressionLedger {
    pub fn new(xp_multiplier: f64, gold_multiplier: f64) -> Self {
        Self {
            level: 1,
            xp: 0,
            total_xp: 0,
            xp_multiplier,
            gold_multiplier,
            run_gold: 0,
            kills: 0,
            elites_defeated: 0,
            mini_bosses_defeated: 0,
            boss_defeated: false,
        }
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= max_level()
    }

    pub fn xp_to_next_level(&self) -> u64 {
        xp_required_for_level(self.level)
    }

    /// Adds scaled XP and returns every level reached, in order.
    pub fn add_xp(&mut self, amount: u32) -> Vec<u32> {
        let scaled = (amount as f64 * self.xp_multiplier).round().max(0.0) as u64;
        self.xp += scaled;
        self.total_xp += scaled;

        let mut gained = Vec::new();
        while !self.is_max_level() {
            let required = xp_required_for_level(self.level);
            if self.xp < required {
                break;
            }
            self.xp -= required;
            self.level += 1;
            gained.push(self.level);
            debug!(level = self.level, "player leveled up");
        }

        if self.is_max_level() {
            let cap = xp_required_for_level(self.level).saturating_sub(1);
            self.xp = self.xp.min(cap);
        }
        gained
    }

    /// Adds scaled gold from a drop and returns the amount credited.
    pub fn add_gold(&mut self, amount: u32) -> u64 {
        let scaled = (amount as f64 * self.gold_multiplier).round().max(0.0) as u64;
        self.run_gold += scaled;
        scaled
    }

    pub fn record_kill(&mut self, tier: EnemyTier) {
        self.kills += 1;
        match tier {
            EnemyTier::Normal => {}
            EnemyTier::Elite => self.elites_defeated += 1,
            EnemyTier::MiniBoss => self.mini_bosses_defeated += 1,
            EnemyTier::Boss => self.boss_defeated = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_level_up() {
        let mut ledger = ProgressionLedger::default();
        assert_eq!(ledger.add_xp(12), vec![2]);
        assert_eq!(ledger.xp, 2);
        assert_eq!(ledger.xp_to_next_level(), 25);
    }

    #[test]
    fn test_multiple_level_ups_from_one_grant() {
        let mut ledger = ProgressionLedger::default();
        // 10 + 25 + 45 = 80
        assert_eq!(ledger.add_xp(85), vec![2, 3, 4]);
        assert_eq!(ledger.level, 4);
        assert_eq!(ledger.xp, 5);
    }

    #[test]
    fn test_xp_multiplier_rounds() {
        let mut ledger = ProgressionLedger::new(1.5, 1.0);
        ledger.add_xp(5);
        // 7.5 rounds to 8
        assert_eq!(ledger.xp, 8);
        assert_eq!(ledger.total_xp, 8);
    }

    #[test]
    fn test_max_level_clamps_xp() {
        let mut ledger = ProgressionLedger::default();
        ledger.add_xp(1_000_000);
        assert_eq!(ledger.level, 20);
        assert!(ledger.xp < xp_required_for_level(20));
        assert!(ledger.add_xp(5000).is_empty());
        assert_eq!(ledger.xp, 2299);
    }

    #[test]
    fn test_gold_and_kills() {
        let mut ledger = ProgressionLedger::new(1.0, 1.25);
        assert_eq!(ledger.add_gold(8), 10);
        ledger.record_kill(EnemyTier::Normal);
        ledger.record_kill(EnemyTier::MiniBoss);
        ledger.record_kill(EnemyTier::Boss);
        assert_eq!(ledger.run_gold, 10);
        assert_eq!(ledger.kills, 3);
        assert_eq!(ledger.mini_bosses_defeated, 1);
        assert!(ledger.boss_defeated);
    }
}
