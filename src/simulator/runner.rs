//! Whole-run driver on top of `RunState` and `game_tick`.
//!
//! Choices are resolved by a fixed policy so runs are reproducible for a
//! given seed. Statistics are collected from `TickResult` events.

use super::config::SimConfig;
use super::report::SimReport;
use crate::core::run_state::{RunConfig, RunState, RunSummary};
use crate::core::tick::{game_tick, TickEvent};
use crate::progression::PendingChoice;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Statistics for one simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub summary: RunSummary,
    pub total_ticks: u64,
    /// Elapsed seconds when each level was reached, in order.
    pub level_up_times: Vec<(u32, f64)>,
    pub damage_taken: f64,
    /// Hit the tick cap before the run ended.
    pub timed_out: bool,
}

/// Run the full simulation batch and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = play_run(
            config.run_config(run_idx),
            config.tick_seconds,
            config.tick_cap(),
            &mut rng,
        );

        if config.verbosity >= 2 {
            let s = &stats.summary;
            println!(
                "Run {}/{} - {} {}, {:.0}s, Level {}, Kills {}, Mini-bosses {}, Gold {}",
                run_idx + 1,
                config.num_runs,
                s.character.name(),
                s.outcome.map(|o| o.name()).unwrap_or("Timeout"),
                s.elapsed_secs,
                s.level,
                s.kills,
                s.mini_bosses_defeated,
                s.rewards.map(|r| r.total_gold()).unwrap_or(0),
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs)
}

/// Plays one run to its end, resolving every choice with `auto_choose`.
pub fn play_run<R: Rng>(config: RunConfig, dt: f64, max_ticks: u64, rng: &mut R) -> RunStats {
    let mut state = RunState::new(config);
    let mut level_up_times = Vec::new();
    let mut damage_taken = 0.0;
    let mut total_ticks = 0;

    while !state.is_over() && total_ticks < max_ticks {
        while state.is_paused() {
            auto_choose(&mut state, rng);
        }

        let result = game_tick(&mut state, dt, rng);
        total_ticks += 1;

        for event in &result.events {
            match event {
                TickEvent::LevelUp { level } => {
                    level_up_times.push((*level, state.clock.elapsed()));
                }
                TickEvent::EnemyAttack { damage, .. } => damage_taken += damage,
                _ => {}
            }
        }
    }

    RunStats {
        summary: state.summary(),
        total_ticks,
        level_up_times,
        damage_taken,
        timed_out: !state.is_over(),
    }
}

/// Resolves the pending choice.
///
/// Level-ups prefer deepening an owned skill, then the first new skill
/// offered. Evolutions take the first card.
pub fn auto_choose<R: Rng>(state: &mut RunState, rng: &mut R) {
    let resolved = match state.pending_choice() {
        None => return,
        Some(PendingChoice::LevelUp { choices, .. }) => {
            let index = choices
                .iter()
                .position(|&skill| state.loadout.contains(skill))
                .unwrap_or(0);
            state
                .choose_level_up(index, rng)
                .map(|r| debug!(change = ?r.change, "auto level-up"))
        }
        Some(PendingChoice::Evolution { .. }) => state
            .choose_evolution(0, rng)
            .map(|r| debug!(evolution = r.evolution.name(), "auto evolution")),
    };

    if resolved.is_err() {
        let _ = state.skip_choice(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::characters::CharacterClass;

    #[test]
    fn test_quick_run_finishes() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let stats = play_run(
            RunConfig::quick(CharacterClass::FireMage, 60.0),
            0.1,
            10_000,
            &mut rng,
        );
        assert!(!stats.timed_out);
        assert!(stats.summary.outcome.is_some());
        assert!(stats.summary.rewards.is_some());
        assert!(stats.total_ticks > 0);
    }

    #[test]
    fn test_tick_cap_times_out() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let stats = play_run(RunConfig::default(), 0.1, 50, &mut rng);
        assert!(stats.timed_out);
        assert_eq!(stats.total_ticks, 50);
        assert_eq!(stats.summary.outcome, None);
    }

    #[test]
    fn test_batch_uses_configured_tick_cap() {
        let config = SimConfig {
            num_runs: 1,
            seed: Some(4),
            max_ticks_per_run: Some(5),
            verbosity: 0,
            ..SimConfig::default()
        };
        let report = run_simulation(&config);
        assert_eq!(report.runs_timed_out, 1);
        assert_eq!(report.run_stats[0].total_ticks, 5);
    }

    #[test]
    fn test_level_up_times_are_ordered() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let stats = play_run(
            RunConfig::quick(CharacterClass::IceMage, 120.0),
            0.1,
            10_000,
            &mut rng,
        );
        for pair in stats.level_up_times.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn test_seeded_batch_is_reproducible() {
        let config = SimConfig {
            seed: Some(99),
            verbosity: 0,
            ..SimConfig::quick_balance_test(3)
        };
        let a = run_simulation(&config);
        let b = run_simulation(&config);
        assert_eq!(a.run_stats, b.run_stats);
    }
}
