//! Simulation configuration.

use crate::core::constants::TICK_INTERVAL_MS;
use crate::core::run_state::RunConfig;
use crate::data::characters::CharacterClass;
use crate::meta::MetaBonuses;
use crate::run::RunSchedule;

/// Extra ticks allowed past the scheduled end before a run counts as timed out.
const TICK_CAP_MARGIN: u64 = 100;

/// Configuration for a simulation batch.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of runs to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Fixed character, or None to rotate through all of them
    pub character: Option<CharacterClass>,

    /// Run length and gate times
    pub schedule: RunSchedule,

    /// Meta bonuses applied to every run
    pub bonuses: MetaBonuses,

    /// Simulated seconds per tick
    pub tick_seconds: f64,

    /// Safety cap on ticks per run (None = derived from the schedule)
    pub max_ticks_per_run: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            character: None,
            schedule: RunSchedule::default(),
            bonuses: MetaBonuses::default(),
            tick_seconds: TICK_INTERVAL_MS as f64 / 1000.0,
            max_ticks_per_run: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Short runs with the full gate schedule compressed, for fast checks
    pub fn quick_balance_test(num_runs: u32) -> Self {
        Self {
            num_runs,
            schedule: RunSchedule::scaled(120.0),
            ..Default::default()
        }
    }

    /// Full-length runs for one character
    pub fn character_test(character: CharacterClass, num_runs: u32) -> Self {
        Self {
            num_runs,
            character: Some(character),
            ..Default::default()
        }
    }

    /// Full-length runs with purchased meta upgrades
    pub fn meta_bonus_test(bonuses: MetaBonuses, num_runs: u32) -> Self {
        Self {
            num_runs,
            bonuses,
            ..Default::default()
        }
    }

    /// Character used for the run at `run_index`.
    pub fn character_for_run(&self, run_index: u32) -> CharacterClass {
        self.character
            .unwrap_or(CharacterClass::ALL[run_index as usize % CharacterClass::ALL.len()])
    }

    /// Tick cap per run: the explicit cap, or enough ticks to cover the
    /// schedule plus a margin.
    pub fn tick_cap(&self) -> u64 {
        if let Some(cap) = self.max_ticks_per_run {
            return cap;
        }
        if self.tick_seconds <= 0.0 {
            return TICK_CAP_MARGIN;
        }
        (self.schedule.duration / self.tick_seconds).ceil() as u64 + TICK_CAP_MARGIN
    }

    pub fn run_config(&self, run_index: u32) -> RunConfig {
        RunConfig {
            character: self.character_for_run(run_index),
            schedule: self.schedule.clone(),
            bonuses: self.bonuses,
            ..RunConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotates_characters() {
        let config = SimConfig::default();
        assert_eq!(config.character_for_run(0), CharacterClass::FireMage);
        assert_eq!(config.character_for_run(1), CharacterClass::IceMage);
        assert_eq!(config.character_for_run(2), CharacterClass::LightMage);
        assert_eq!(config.character_for_run(3), CharacterClass::FireMage);
    }

    #[test]
    fn test_fixed_character() {
        let config = SimConfig::character_test(CharacterClass::LightMage, 5);
        assert_eq!(config.character_for_run(1), CharacterClass::LightMage);
        assert_eq!(config.run_config(1).character, CharacterClass::LightMage);
    }

    #[test]
    fn test_tick_cap_covers_long_schedules() {
        let config = SimConfig {
            schedule: RunSchedule::scaled(3000.0),
            ..SimConfig::default()
        };
        // 3000s at 0.1s per tick
        assert_eq!(config.tick_cap(), 30_000 + TICK_CAP_MARGIN);

        let capped = SimConfig {
            max_ticks_per_run: Some(50),
            ..config
        };
        assert_eq!(capped.tick_cap(), 50);
    }

    #[test]
    fn test_quick_schedule() {
        let config = SimConfig::quick_balance_test(10);
        assert_eq!(config.run_config(0).schedule.duration, 120.0);
    }
}
