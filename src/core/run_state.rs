//! The state of one run, owned by the caller and advanced by `game_tick`.

use crate::actors::enemy::EnemyState;
use crate::actors::player::PlayerState;
use crate::core::constants::{EVOLUTION_CARD_COUNT, LEVEL_UP_CARD_COUNT, MAX_SKILL_SLOTS};
use crate::data::characters::CharacterClass;
use crate::data::evolutions::{get_evolution, EvolutionType};
use crate::data::skills::SkillType;
use crate::data::synergies::SynergyType;
use crate::meta::MetaBonuses;
use crate::progression::{
    calculate_run_rewards, generate_evolution_choices, generate_level_up_choices, OrbField,
    PendingChoice, ProgressionLedger, RunOutcome, RunRewards,
};
use crate::run::{RunClock, RunSchedule, SpawnSettings, Spawner};
use crate::skills::{SkillChange, SkillLoadout};
use crate::synergy::SynergyEvaluator;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;
use tracing::{debug, info};

/// Everything needed to start a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub character: CharacterClass,
    pub schedule: RunSchedule,
    pub spawn: SpawnSettings,
    pub bonuses: MetaBonuses,
    pub max_skill_slots: usize,
    pub level_up_card_count: usize,
    pub evolution_card_count: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            character: CharacterClass::FireMage,
            schedule: RunSchedule::default(),
            spawn: SpawnSettings::default(),
            bonuses: MetaBonuses::default(),
            max_skill_slots: MAX_SKILL_SLOTS,
            level_up_card_count: LEVEL_UP_CARD_COUNT,
            evolution_card_count: EVOLUTION_CARD_COUNT,
        }
    }
}

impl RunConfig {
    pub fn for_character(character: CharacterClass) -> Self {
        Self {
            character,
            ..Self::default()
        }
    }

    /// Full gate schedule compressed into `duration` seconds.
    pub fn quick(character: CharacterClass, duration: f64) -> Self {
        Self {
            character,
            schedule: RunSchedule::scaled(duration),
            ..Self::default()
        }
    }

    pub fn with_bonuses(mut self, bonuses: MetaBonuses) -> Self {
        self.bonuses = bonuses;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    LevelUp(u32),
    Evolution(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("no choice is pending")]
    NothingPending,

    #[error("pending choice is not a {0}")]
    WrongKind(&'static str),

    #[error("choice {index} is out of range ({len} options)")]
    InvalidIndex { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillChoiceResult {
    pub change: SkillChange,
    pub new_synergies: Vec<SynergyType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionChoiceResult {
    pub evolution: EvolutionType,
    pub evolved_skills: Vec<SkillType>,
}

/// Snapshot of a run for reports and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub character: CharacterClass,
    pub outcome: Option<RunOutcome>,
    pub elapsed_secs: f64,
    pub level: u32,
    pub kills: u64,
    pub elites_defeated: u64,
    pub mini_bosses_defeated: u64,
    pub boss_defeated: bool,
    pub final_hp: f64,
    pub skills: Vec<(SkillType, u32)>,
    pub evolutions: Vec<EvolutionType>,
    pub synergies: Vec<SynergyType>,
    pub rewards: Option<RunRewards>,
}

#[derive(Debug, Clone)]
pub struct RunState {
    pub config: RunConfig,
    pub player: PlayerState,
    pub enemies: Vec<EnemyState>,
    pub loadout: SkillLoadout,
    pub synergies: SynergyEvaluator,
    pub clock: RunClock,
    pub spawner: Spawner,
    pub ledger: ProgressionLedger,
    pub orbs: OrbField,
    pub outcome: Option<RunOutcome>,
    pub rewards: Option<RunRewards>,
    current_choice: Option<PendingChoice>,
    queued: VecDeque<PendingKind>,
    new_synergies: Vec<SynergyType>,
}

impl RunState {
    /// Starts a run: applies meta bonuses and grants the starting skill.
    pub fn new(config: RunConfig) -> Self {
        let definition = config.character.definition();
        let mut player = PlayerState::new(definition);
        player.apply_modifiers(&config.bonuses.modifiers());

        let mut loadout = SkillLoadout::new(config.max_skill_slots);
        loadout.acquire(definition.starting_skill);
        let mut synergies = SynergyEvaluator::default();
        synergies.on_skill_changed(&loadout);

        let ledger = ProgressionLedger::new(player.stats.xp_multiplier, player.stats.gold_multiplier);

        info!(character = definition.name, "run started");
        Self {
            player,
            enemies: Vec::new(),
            loadout,
            synergies,
            clock: RunClock::new(config.schedule.clone()),
            spawner: Spawner::new(config.spawn),
            ledger,
            orbs: OrbField::default(),
            outcome: None,
            rewards: None,
            current_choice: None,
            queued: VecDeque::new(),
            new_synergies: Vec::new(),
            config,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// A run waits for the player while a choice is pending.
    pub fn is_paused(&self) -> bool {
        self.current_choice.is_some()
    }

    pub fn pending_choice(&self) -> Option<&PendingChoice> {
        self.current_choice.as_ref()
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    pub(crate) fn take_new_synergies(&mut self) -> Vec<SynergyType> {
        std::mem::take(&mut self.new_synergies)
    }

    pub(crate) fn queue_level_up(&mut self, level: u32) {
        self.queued.push_back(PendingKind::LevelUp(level));
    }

    pub(crate) fn queue_evolution(&mut self, gate: u8) {
        self.queued.push_back(PendingKind::Evolution(gate));
    }

    /// Promotes the next queued choice that has something to offer.
    /// Returns the newly pending choice, if any.
    pub(crate) fn advance_choices(&mut self, rng: &mut impl Rng) -> Option<PendingChoice> {
        if self.current_choice.is_some() || self.is_over() {
            return None;
        }
        while let Some(kind) = self.queued.pop_front() {
            let choice = match kind {
                PendingKind::LevelUp(level) => {
                    let choices = generate_level_up_choices(
                        &self.loadout,
                        self.config.level_up_card_count,
                        rng,
                    );
                    (!choices.is_empty()).then_some(PendingChoice::LevelUp { level, choices })
                }
                PendingKind::Evolution(gate) => {
                    let choices = generate_evolution_choices(
                        &self.loadout,
                        self.config.evolution_card_count,
                        rng,
                    );
                    (!choices.is_empty()).then_some(PendingChoice::Evolution { gate, choices })
                }
            };
            if let Some(choice) = choice {
                self.current_choice = Some(choice.clone());
                return Some(choice);
            }
            debug!(?kind, "nothing to offer, choice skipped");
        }
        None
    }

    /// Resolves a pending level-up with the card at `index`.
    pub fn choose_level_up(
        &mut self,
        index: usize,
        rng: &mut impl Rng,
    ) -> Result<SkillChoiceResult, ChoiceError> {
        let skill = match &self.current_choice {
            None => return Err(ChoiceError::NothingPending),
            Some(PendingChoice::Evolution { .. }) => return Err(ChoiceError::WrongKind("level-up")),
            Some(PendingChoice::LevelUp { choices, .. }) => {
                *choices.get(index).ok_or(ChoiceError::InvalidIndex {
                    index,
                    len: choices.len(),
                })?
            }
        };
        self.current_choice = None;

        let change = self.loadout.acquire(skill);
        let new_synergies = if change.is_change() {
            self.synergies.on_skill_changed(&self.loadout)
        } else {
            Vec::new()
        };
        self.new_synergies.extend_from_slice(&new_synergies);
        self.advance_choices(rng);
        Ok(SkillChoiceResult {
            change,
            new_synergies,
        })
    }

    /// Resolves a pending evolution with the card at `index`.
    pub fn choose_evolution(
        &mut self,
        index: usize,
        rng: &mut impl Rng,
    ) -> Result<EvolutionChoiceResult, ChoiceError> {
        let evolution = match &self.current_choice {
            None => return Err(ChoiceError::NothingPending),
            Some(PendingChoice::LevelUp { .. }) => return Err(ChoiceError::WrongKind("evolution")),
            Some(PendingChoice::Evolution { choices, .. }) => {
                *choices.get(index).ok_or(ChoiceError::InvalidIndex {
                    index,
                    len: choices.len(),
                })?
            }
        };
        self.current_choice = None;

        let evolved_skills = match get_evolution(evolution) {
            Some(def) => self.loadout.apply_evolution(def),
            None => Vec::new(),
        };
        self.advance_choices(rng);
        Ok(EvolutionChoiceResult {
            evolution,
            evolved_skills,
        })
    }

    /// Declines the pending choice.
    pub fn skip_choice(&mut self, rng: &mut impl Rng) -> Result<(), ChoiceError> {
        if self.current_choice.take().is_none() {
            return Err(ChoiceError::NothingPending);
        }
        self.advance_choices(rng);
        Ok(())
    }

    /// Ends the run, computes rewards and drops pending choices.
    pub(crate) fn finish(&mut self, outcome: RunOutcome) -> RunRewards {
        self.clock.stop();
        self.current_choice = None;
        self.queued.clear();
        let rewards = calculate_run_rewards(&self.ledger, outcome);
        self.outcome = Some(outcome);
        self.rewards = Some(rewards);
        info!(
            outcome = outcome.name(),
            elapsed = self.clock.elapsed(),
            level = self.ledger.level,
            kills = self.ledger.kills,
            gold = rewards.total_gold(),
            "run ended"
        );
        rewards
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            character: self.config.character,
            outcome: self.outcome,
            elapsed_secs: self.clock.elapsed(),
            level: self.ledger.level,
            kills: self.ledger.kills,
            elites_defeated: self.ledger.elites_defeated,
            mini_bosses_defeated: self.ledger.mini_bosses_defeated,
            boss_defeated: self.ledger.boss_defeated,
            final_hp: self.player.current_hp,
            skills: self.loadout.iter().map(|s| (s.skill(), s.level())).collect(),
            evolutions: self.loadout.iter().filter_map(|s| s.evolution()).collect(),
            synergies: self.synergies.active().to_vec(),
            rewards: self.rewards,
        }
    }
}
