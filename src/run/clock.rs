//! Run clock with one-shot timed gates.

use crate::core::constants::{
    FINAL_BOSS_TIME, GAME_DURATION, MINIBOSS_1_TIME, MINIBOSS_2_TIME, MINIBOSS_3_TIME,
    SPAWN_DENSITY_END, SPAWN_DENSITY_START, STAGE_1_DURATION,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Forest,
    Cave,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Forest => "Forest",
            Stage::Cave => "Cave",
        }
    }
}

/// A timed event that fires once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// Mini-boss gate, 1-based.
    MiniBoss(u8),
    StageTransition,
    FinalBoss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    GateReached(Gate),
    RunEnded,
}

/// Run length and gate thresholds in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSchedule {
    pub duration: f64,
    pub gates: Vec<(f64, Gate)>,
}

impl Default for RunSchedule {
    fn default() -> Self {
        Self {
            duration: GAME_DURATION,
            gates: vec![
                (MINIBOSS_1_TIME, Gate::MiniBoss(1)),
                (STAGE_1_DURATION, Gate::StageTransition),
                (MINIBOSS_2_TIME, Gate::MiniBoss(2)),
                (MINIBOSS_3_TIME, Gate::MiniBoss(3)),
                (FINAL_BOSS_TIME, Gate::FinalBoss),
            ],
        }
    }
}

impl RunSchedule {
    /// Same gates compressed into a shorter run.
    pub fn scaled(duration: f64) -> Self {
        let base = Self::default();
        if base.duration <= 0.0 {
            return base;
        }
        Self {
            duration,
            gates: base
                .gates
                .into_iter()
                .map(|(time, gate)| (time / base.duration * duration, gate))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunClock {
    duration: f64,
    /// Sorted by threshold. Ties keep schedule order.
    gates: Vec<(f64, Gate)>,
    fired: Vec<bool>,
    elapsed: f64,
    active: bool,
    stage: Stage,
}

impl Default for RunClock {
    fn default() -> Self {
        Self::new(RunSchedule::default())
    }
}

impl RunClock {
    /// A started clock at time zero in the Forest stage.
    pub fn new(schedule: RunSchedule) -> Self {
        let mut gates = schedule.gates;
        gates.sort_by(|a, b| a.0.total_cmp(&b.0));
        let fired = vec![false; gates.len()];
        Self {
            duration: schedule.duration,
            gates,
            fired,
            elapsed: 0.0,
            active: true,
            stage: Stage::Forest,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn remaining(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn has_fired(&self, gate: Gate) -> bool {
        self.gates
            .iter()
            .zip(&self.fired)
            .any(|((_, g), fired)| *g == gate && *fired)
    }

    /// Fraction of the run elapsed, clamped to [0, 1].
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Spawn rate multiplier, rising quadratically over the run.
    pub fn spawn_density(&self) -> f64 {
        let t = self.progress();
        SPAWN_DENSITY_START + (SPAWN_DENSITY_END - SPAWN_DENSITY_START) * t * t
    }

    /// Stops the clock without emitting `RunEnded`.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Advances time and returns newly reached gates in threshold order,
    /// followed by `RunEnded` when the run time is up.
    pub fn tick(&mut self, dt: f64) -> Vec<ClockEvent> {
        let mut events = Vec::new();
        if !self.active || dt <= 0.0 {
            return events;
        }

        self.elapsed += dt;

        for (index, &(threshold, gate)) in self.gates.iter().enumerate() {
            if self.fired[index] || self.elapsed < threshold {
                continue;
            }
            self.fired[index] = true;
            if gate == Gate::StageTransition {
                self.stage = Stage::Cave;
            }
            debug!(?gate, elapsed = self.elapsed, "gate reached");
            events.push(ClockEvent::GateReached(gate));
        }

        if self.elapsed >= self.duration {
            self.active = false;
            debug!(elapsed = self.elapsed, "run time is up");
            events.push(ClockEvent::RunEnded);
        }

        events
    }
}
