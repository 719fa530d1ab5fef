//! Finished-run history, newest last, capped to a fixed number of entries.

use crate::core::constants::{HISTORY_FILE_NAME, RUN_HISTORY_CAPACITY};
use crate::data::characters::CharacterClass;
use crate::progression::rewards::{RunOutcome, RunRewards};
use crate::utils::persistence::{config_path, load_json_or_default, save_json, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: Uuid,
    /// Unix timestamp.
    pub finished_at: i64,
    pub character: CharacterClass,
    pub outcome: RunOutcome,
    pub elapsed_secs: f64,
    pub level: u32,
    pub kills: u64,
    pub mini_bosses_defeated: u64,
    pub rewards: RunRewards,
}

impl RunRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        character: CharacterClass,
        outcome: RunOutcome,
        elapsed_secs: f64,
        level: u32,
        kills: u64,
        mini_bosses_defeated: u64,
        rewards: RunRewards,
        finished_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            finished_at,
            character,
            outcome,
            elapsed_secs,
            level,
            kills,
            mini_bosses_defeated,
            rewards,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunHistory {
    pub runs: Vec<RunRecord>,
}

impl RunHistory {
    pub fn default_path() -> Result<PathBuf> {
        config_path(HISTORY_FILE_NAME)
    }

    pub fn load(path: &Path) -> Self {
        load_json_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(path, self)
    }

    /// Appends a run, dropping the oldest beyond capacity.
    pub fn record(&mut self, record: RunRecord) {
        self.runs.push(record);
        if self.runs.len() > RUN_HISTORY_CAPACITY {
            let excess = self.runs.len() - RUN_HISTORY_CAPACITY;
            self.runs.drain(..excess);
        }
    }

    pub fn victories(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| r.outcome == RunOutcome::Victory)
            .count()
    }

    pub fn best_kills(&self) -> Option<&RunRecord> {
        self.runs.iter().max_by_key(|r| r.kills)
    }
}
