//! End-of-run reward calculation.

use super::ledger::ProgressionLedger;
use crate::core::constants::{
    GOLD_PER_KILL, GOLD_PER_MINIBOSS, GOLD_VICTORY_BONUS, MAGIC_STONES_PER_MINIBOSS,
    MAGIC_STONES_VICTORY_BONUS,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The player survived until the clock ran out.
    Victory,
    Defeat,
}

impl RunOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            RunOutcome::Victory => "Victory",
            RunOutcome::Defeat => "Defeat",
        }
    }
}

/// Currency banked into meta progression when a run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRewards {
    /// Gold picked up from drops during the run, scaled by gold gain.
    pub drop_gold: u64,
    /// Kill, mini-boss and victory bonus. Not affected by gold gain.
    pub bonus_gold: u64,
    pub magic_stones: u64,
}

impl RunRewards {
    pub fn total_gold(&self) -> u64 {
        self.drop_gold + self.bonus_gold
    }
}

pub fn calculate_run_rewards(ledger: &ProgressionLedger, outcome: RunOutcome) -> RunRewards {
    let victory = outcome == RunOutcome::Victory;

    let mut bonus_gold =
        ledger.kills * GOLD_PER_KILL + ledger.mini_bosses_defeated * GOLD_PER_MINIBOSS;
    if victory {
        bonus_gold += GOLD_VICTORY_BONUS;
    }

    let mut magic_stones = ledger.mini_bosses_defeated * MAGIC_STONES_PER_MINIBOSS;
    if victory {
        magic_stones += MAGIC_STONES_VICTORY_BONUS;
    }

    RunRewards {
        drop_gold: ledger.run_gold,
        bonus_gold,
        magic_stones,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::enemies::EnemyTier;

    fn ledger_with(kills: u64, mini_bosses: u64, gold_multiplier: f64) -> ProgressionLedger {
        let mut ledger = ProgressionLedger::new(1.0, gold_multiplier);
        for _ in 0..kills {
            ledger.record_kill(EnemyTier::Normal);
        }
        for _ in 0..mini_bosses {
            ledger.record_kill(EnemyTier::MiniBoss);
        }
        ledger
    }

    #[test]
    fn test_defeat_rewards() {
        let mut ledger = ledger_with(10, 1, 1.0);
        ledger.add_gold(30);
        let rewards = calculate_run_rewards(&ledger, RunOutcome::Defeat);
        // 11 kills * 2 + 1 mini-boss * 50
        assert_eq!(rewards.bonus_gold, 72);
        assert_eq!(rewards.drop_gold, 30);
        assert_eq!(rewards.total_gold(), 102);
        assert_eq!(rewards.magic_stones, 1);
    }

    #[test]
    fn test_victory_bonus() {
        let ledger = ledger_with(0, 3, 1.0);
        let rewards = calculate_run_rewards(&ledger, RunOutcome::Victory);
        assert_eq!(rewards.bonus_gold, 3 * 2 + 3 * 50 + 200);
        assert_eq!(rewards.magic_stones, 8);
    }

    #[test]
    fn test_gold_multiplier_only_scales_drops() {
        let mut ledger = ledger_with(5, 0, 1.5);
        ledger.add_gold(10);
        let rewards = calculate_run_rewards(&ledger, RunOutcome::Victory);
        assert_eq!(rewards.drop_gold, 15);
        assert_eq!(rewards.bonus_gold, 5 * 2 + 200);
    }
}
