//! Simulation report generation.

use super::runner::RunStats;
use crate::data::characters::CharacterClass;
use crate::data::synergies::SynergyType;
use crate::progression::RunOutcome;
use std::collections::HashMap;

/// Win/loss counts for one character.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CharacterRecord {
    pub runs: u32,
    pub victories: u32,
}

impl CharacterRecord {
    pub fn victory_rate(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.victories as f64 / self.runs as f64
        }
    }
}

/// Aggregated results from multiple simulated runs.
#[derive(Debug, Clone)]
pub struct SimReport {
    pub num_runs: u32,
    pub victories: u32,
    pub defeats: u32,
    pub runs_timed_out: u32,

    // Aggregated stats
    pub avg_final_level: f64,
    pub avg_kills: f64,
    pub avg_elapsed_secs: f64,
    pub avg_damage_taken: f64,
    pub avg_gold: f64,
    pub avg_magic_stones: f64,
    pub avg_mini_bosses: f64,

    // Distribution data
    pub level_distribution: HashMap<u32, u32>,
    pub character_records: HashMap<CharacterClass, CharacterRecord>,
    pub synergy_counts: HashMap<SynergyType, u32>,
    /// Average elapsed seconds when each level was first reached (index = level)
    pub avg_time_to_level: Vec<f64>,

    // Individual run stats for detailed analysis
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    /// Create a new report from finished run stats.
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = num_runs.max(1) as f64;
        let count_outcome = |outcome: RunOutcome| {
            runs.iter()
                .filter(|r| r.summary.outcome == Some(outcome))
                .count() as u32
        };
        let victories = count_outcome(RunOutcome::Victory);
        let defeats = count_outcome(RunOutcome::Defeat);
        let runs_timed_out = runs.iter().filter(|r| r.timed_out).count() as u32;

        let avg = |f: &dyn Fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / divisor;
        let avg_final_level = avg(&|r| r.summary.level as f64);
        let avg_kills = avg(&|r| r.summary.kills as f64);
        let avg_elapsed_secs = avg(&|r| r.summary.elapsed_secs);
        let avg_damage_taken = avg(&|r| r.damage_taken);
        let avg_gold = avg(&|r| r.summary.rewards.map(|x| x.total_gold()).unwrap_or(0) as f64);
        let avg_magic_stones = avg(&|r| r.summary.rewards.map(|x| x.magic_stones).unwrap_or(0) as f64);
        let avg_mini_bosses = avg(&|r| r.summary.mini_bosses_defeated as f64);

        let mut level_distribution = HashMap::new();
        let mut character_records: HashMap<CharacterClass, CharacterRecord> = HashMap::new();
        let mut synergy_counts = HashMap::new();
        for run in &runs {
            *level_distribution.entry(run.summary.level).or_insert(0) += 1;

            let record = character_records.entry(run.summary.character).or_default();
            record.runs += 1;
            if run.summary.outcome == Some(RunOutcome::Victory) {
                record.victories += 1;
            }

            for synergy in &run.summary.synergies {
                *synergy_counts.entry(*synergy).or_insert(0) += 1;
            }
        }

        let max_level = runs.iter().map(|r| r.summary.level).max().unwrap_or(1) as usize;
        let mut avg_time_to_level = vec![0.0; max_level + 1];
        for (level, slot) in avg_time_to_level.iter_mut().enumerate().skip(2) {
            let times: Vec<f64> = runs
                .iter()
                .filter_map(|r| {
                    r.level_up_times
                        .iter()
                        .find(|(l, _)| *l as usize == level)
                        .map(|(_, t)| *t)
                })
                .collect();
            if !times.is_empty() {
                *slot = times.iter().sum::<f64>() / times.len() as f64;
            }
        }

        Self {
            num_runs,
            victories,
            defeats,
            runs_timed_out,
            avg_final_level,
            avg_kills,
            avg_elapsed_secs,
            avg_damage_taken,
            avg_gold,
            avg_magic_stones,
            avg_mini_bosses,
            level_distribution,
            character_records,
            synergy_counts,
            avg_time_to_level,
            run_stats: runs,
        }
    }

    pub fn victory_rate(&self) -> f64 {
        if self.num_runs == 0 {
            0.0
        } else {
            self.victories as f64 / self.num_runs as f64
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total, {} victories, {} defeats, {} timed out\n\n",
            self.num_runs, self.victories, self.defeats, self.runs_timed_out
        ));

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Kills:           {:.0}\n", self.avg_kills));
        report.push_str(&format!("  Avg Run Length:      {:.0}s\n", self.avg_elapsed_secs));
        report.push_str(&format!("  Avg Mini-bosses:     {:.2}\n", self.avg_mini_bosses));
        report.push_str(&format!("  Avg Damage Taken:    {:.0}\n\n", self.avg_damage_taken));

        report.push_str("── REWARDS ──────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Gold:            {:.0}\n", self.avg_gold));
        report.push_str(&format!("  Avg Magic Stones:    {:.1}\n\n", self.avg_magic_stones));

        report.push_str("── CHARACTERS ───────────────────────────────────────────────────\n");
        for class in CharacterClass::ALL {
            if let Some(record) = self.character_records.get(&class) {
                report.push_str(&format!(
                    "  {:<12} {:>4} runs   {:>5.1}% victories\n",
                    class.name(),
                    record.runs,
                    record.victory_rate() * 100.0
                ));
            }
        }
        report.push('\n');

        report.push_str("── LEVEL PACING ─────────────────────────────────────────────────\n");
        for (level, time) in self.avg_time_to_level.iter().enumerate().skip(2) {
            if *time > 0.0 {
                report.push_str(&format!("  Level {:2}: {:>7.1}s\n", level, time));
            }
        }
        report.push('\n');

        report.push_str("── SYNERGIES ────────────────────────────────────────────────────\n");
        let mut synergies: Vec<(&SynergyType, &u32)> = self.synergy_counts.iter().collect();
        synergies.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.name().cmp(b.0.name())));
        if synergies.is_empty() {
            report.push_str("  None activated\n");
        }
        for (synergy, count) in synergies {
            let pct = *count as f64 / self.num_runs.max(1) as f64 * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<22} {:>5.1}% {}\n", synergy.name(), pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rate = self.victory_rate() * 100.0;
        let rating = if rate > 90.0 {
            "TOO EASY - Almost every run survives"
        } else if rate > 40.0 {
            "GOOD - Challenging but fair"
        } else if rate > 10.0 {
            "HARD - Most runs fail"
        } else {
            "TOO HARD - Runs rarely survive"
        };
        report.push_str(&format!("  Victory Rate: {:.1}%\n", rate));
        report.push_str(&format!("  Rating:       {}\n", rating));
        if self.runs_timed_out > 0 {
            report.push_str("  ⚠️  Some runs hit the tick cap - raise max_ticks_per_run?\n");
        }
        if self.avg_final_level < 5.0 && self.num_runs > 0 {
            report.push_str("  ⚠️  Low average level - XP curve too steep?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl serde::Serialize for SimReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("SimReport", 13)?;
        state.serialize_field("num_runs", &self.num_runs)?;
        state.serialize_field("victories", &self.victories)?;
        state.serialize_field("defeats", &self.defeats)?;
        state.serialize_field("runs_timed_out", &self.runs_timed_out)?;
        state.serialize_field("avg_final_level", &self.avg_final_level)?;
        state.serialize_field("avg_kills", &self.avg_kills)?;
        state.serialize_field("avg_elapsed_secs", &self.avg_elapsed_secs)?;
        state.serialize_field("avg_damage_taken", &self.avg_damage_taken)?;
        state.serialize_field("avg_gold", &self.avg_gold)?;
        state.serialize_field("avg_magic_stones", &self.avg_magic_stones)?;
        state.serialize_field("avg_mini_bosses", &self.avg_mini_bosses)?;
        state.serialize_field("avg_time_to_level", &self.avg_time_to_level)?;
        state.serialize_field("victory_rate", &(self.victory_rate() * 100.0))?;
        state.end()
    }
}
