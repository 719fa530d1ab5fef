//! Enemy spawning on the radial battlefield.

use crate::actors::enemy::EnemyState;
use crate::core::constants::{
    BASE_SPAWN_INTERVAL, ELITE_SPAWN_CHANCE, MAX_ENEMY_COUNT, SPAWN_DISTANCE_MAX,
    SPAWN_DISTANCE_MIN,
};
use crate::data::enemies::{elite_enemies, normal_enemies, EnemyDefinition};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSettings {
    /// Seconds between spawns at density 1.
    pub base_interval: f64,
    pub max_enemies: usize,
    pub elite_chance: f64,
    pub distance_min: f64,
    pub distance_max: f64,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            base_interval: BASE_SPAWN_INTERVAL,
            max_enemies: MAX_ENEMY_COUNT,
            elite_chance: ELITE_SPAWN_CHANCE,
            distance_min: SPAWN_DISTANCE_MIN,
            distance_max: SPAWN_DISTANCE_MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Spawner {
    settings: SpawnSettings,
    timer: f64,
    next_id: u64,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(SpawnSettings::default())
    }
}

impl Spawner {
    pub fn new(settings: SpawnSettings) -> Self {
        Self {
            settings,
            timer: 0.0,
            next_id: 1,
        }
    }

    pub fn settings(&self) -> &SpawnSettings {
        &self.settings
    }

    /// Accumulates time and spawns one enemy per elapsed interval while
    /// fewer than `max_enemies` are alive.
    pub fn tick(
        &mut self,
        dt: f64,
        density: f64,
        alive: usize,
        rng: &mut impl Rng,
    ) -> Vec<EnemyState> {
        let mut spawned = Vec::new();
        if dt <= 0.0 || density <= 0.0 || self.settings.base_interval <= 0.0 {
            return spawned;
        }

        let interval = self.settings.base_interval / density;
        self.timer += dt;
        while self.timer >= interval {
            self.timer -= interval;
            if alive + spawned.len() >= self.settings.max_enemies {
                continue;
            }
            if let Some(def) = self.pick_enemy(rng) {
                spawned.push(self.spawn(def, rng));
            }
        }
        spawned
    }

    /// Elite with `elite_chance`, otherwise a uniformly chosen normal enemy.
    pub fn pick_enemy(&self, rng: &mut impl Rng) -> Option<&'static EnemyDefinition> {
        let elite = rng.gen_bool(self.settings.elite_chance.clamp(0.0, 1.0));
        let pool: Vec<&'static EnemyDefinition> = if elite {
            elite_enemies().collect()
        } else {
            normal_enemies().collect()
        };
        pool.choose(rng).copied()
    }

    /// Places an enemy at a random spawn distance. Bosses use this too and
    /// ignore the population cap.
    pub fn spawn(&mut self, def: &EnemyDefinition, rng: &mut impl Rng) -> EnemyState {
        let (min, max) = (self.settings.distance_min, self.settings.distance_max);
        let distance = if max > min {
            rng.gen_range(min..max)
        } else {
            min
        };
        let id = self.next_id;
        self.next_id += 1;
        EnemyState::new(id, def, distance)
    }
}
