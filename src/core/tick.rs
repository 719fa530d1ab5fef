//! The per-tick orchestration function.
//!
//! `game_tick()` advances one step of a run: the clock and its gates,
//! spawning, enemy movement and attacks, skill casts, kill rewards, XP orb
//! pickup and level-ups. It returns a [`TickResult`] describing what happened so a
//! presentation layer or the simulator can react without the rules
//! depending on them.

use crate::core::combat_math::cast_modifiers;
use crate::core::run_state::RunState;
use crate::data::enemies::{final_boss, mini_boss_for_gate, EnemyType};
use crate::data::skills::SkillType;
use crate::data::synergies::SynergyType;
use crate::progression::{PendingChoice, RunOutcome, RunRewards};
use crate::run::{ClockEvent, Gate, Stage};
use rand::Rng;
use tracing::debug;

/// A single event produced by a game tick.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Run clock ───────────────────────────────────────────────
    GateReached { gate: Gate, elapsed: f64 },

    StageChanged { stage: Stage },

    // ── Enemies ─────────────────────────────────────────────────
    EnemySpawned { id: u64, kind: EnemyType },

    /// A mini-boss or the final boss entered the field.
    BossSpawned { id: u64, kind: EnemyType },

    EnemyAttack {
        id: u64,
        kind: EnemyType,
        damage: f64,
        player_hp: f64,
    },

    // ── Combat ──────────────────────────────────────────────────
    SkillCast { skill: SkillType },

    EnemyDefeated {
        id: u64,
        kind: EnemyType,
        xp: u32,
        gold: u64,
    },

    // ── Progression ─────────────────────────────────────────────
    /// An XP orb reached the player. `xp` is the unscaled orb value.
    XpCollected { xp: u32 },

    LevelUp { level: u32 },

    /// A choice is now pending and the run is paused until it is resolved.
    ChoiceOffered { choice: PendingChoice },

    SynergyActivated { synergy: SynergyType },

    // ── Run end ─────────────────────────────────────────────────
    PlayerDied,

    RunEnded {
        outcome: RunOutcome,
        rewards: RunRewards,
    },
}

/// Everything that happened during one tick, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub events: Vec<TickEvent>,
}

impl TickResult {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn run_ended(&self) -> Option<RunOutcome> {
        self.events.iter().find_map(|e| match e {
            TickEvent::RunEnded { outcome, .. } => Some(*outcome),
            _ => None,
        })
    }

    pub fn offered_choice(&self) -> Option<&PendingChoice> {
        self.events.iter().find_map(|e| match e {
            TickEvent::ChoiceOffered { choice } => Some(choice),
            _ => None,
        })
    }
}

/// Advances `state` by `dt` seconds.
///
/// Does nothing once the run is over, while a choice is pending, or for a
/// non-positive `dt`. Pass a seeded `rand_chacha::ChaCha8Rng` for
/// reproducible runs.
pub fn game_tick<R: Rng>(state: &mut RunState, dt: f64, rng: &mut R) -> TickResult {
    let mut result = TickResult::default();
    if state.is_over() || state.is_paused() || dt <= 0.0 {
        return result;
    }

    // Synergies unlocked by choices made since the last tick
    for synergy in state.take_new_synergies() {
        result.events.push(TickEvent::SynergyActivated { synergy });
    }

    // ── 1. Clock and gates ──────────────────────────────────────
    let mut time_up = false;
    for event in state.clock.tick(dt) {
        match event {
            ClockEvent::GateReached(gate) => {
                result.events.push(TickEvent::GateReached {
                    gate,
                    elapsed: state.clock.elapsed(),
                });
                on_gate_reached(state, gate, rng, &mut result);
            }
            ClockEvent::RunEnded => time_up = true,
        }
    }

    // ── 2. Spawning ─────────────────────────────────────────────
    let density = state.clock.spawn_density();
    let alive = state.alive_enemies();
    for enemy in state.spawner.tick(dt, density, alive, rng) {
        result.events.push(TickEvent::EnemySpawned {
            id: enemy.id,
            kind: enemy.kind,
        });
        state.enemies.push(enemy);
    }

    // ── 3. Enemy movement and attacks ───────────────────────────
    let pursuit = state.player.stats.pursuit_factor();
    for enemy in state.enemies.iter_mut() {
        let Some(damage) = enemy.tick(dt, pursuit) else {
            continue;
        };
        let killed = state.player.take_damage(damage);
        result.events.push(TickEvent::EnemyAttack {
            id: enemy.id,
            kind: enemy.kind,
            damage,
            player_hp: state.player.current_hp,
        });
        if killed {
            break;
        }
    }
    if state.player.is_dead() {
        result.events.push(TickEvent::PlayerDied);
        end_run(state, RunOutcome::Defeat, &mut result);
        return result;
    }

    // ── 4. Passive regeneration ─────────────────────────────────
    state.player.regenerate(dt);

    // ── 5. Skills ───────────────────────────────────────────────
    let modifiers = cast_modifiers(&state.player, &state.synergies);
    let loadout_tick = state.loadout.tick(dt, &mut state.enemies, &modifiers);
    for skill in &loadout_tick.casts {
        result.events.push(TickEvent::SkillCast { skill: *skill });
    }

    // ── 6. Kill rewards ─────────────────────────────────────────
    for id in loadout_tick.kills() {
        let Some(enemy) = state.enemies.iter().find(|e| e.id == id) else {
            continue;
        };
        let (kind, tier, xp, gold_drop, distance) = (
            enemy.kind,
            enemy.tier,
            enemy.stats.xp_drop,
            enemy.stats.gold_drop,
            enemy.distance,
        );
        state.ledger.record_kill(tier);
        let gold = state.ledger.add_gold(gold_drop);
        state.orbs.drop_orb(xp, distance);
        debug!(id, enemy = kind.name(), xp, gold, "enemy defeated");
        result.events.push(TickEvent::EnemyDefeated { id, kind, xp, gold });
    }
    state.enemies.retain(|e| e.is_alive());

    // ── 7. XP orbs ──────────────────────────────────────────────
    let mut levels = Vec::new();
    let stats = state.player.stats;
    for xp in state.orbs.tick(dt, stats.pickup_range, stats.move_speed) {
        levels.extend(state.ledger.add_xp(xp));
        result.events.push(TickEvent::XpCollected { xp });
    }

    // ── 8. Level-ups ────────────────────────────────────────────
    for level in levels {
        result.events.push(TickEvent::LevelUp { level });
        state.queue_level_up(level);
    }

    // ── 9. Run end ──────────────────────────────────────────────
    if time_up {
        end_run(state, RunOutcome::Victory, &mut result);
        return result;
    }

    // ── 10. Pending choices ─────────────────────────────────────
    if let Some(choice) = state.advance_choices(rng) {
        result.events.push(TickEvent::ChoiceOffered { choice });
    }

    result
}

fn on_gate_reached<R: Rng>(state: &mut RunState, gate: Gate, rng: &mut R, result: &mut TickResult) {
    let boss = match gate {
        Gate::MiniBoss(index) => {
            state.queue_evolution(index);
            mini_boss_for_gate(index)
        }
        Gate::FinalBoss => final_boss(),
        Gate::StageTransition => {
            result.events.push(TickEvent::StageChanged {
                stage: state.clock.stage(),
            });
            None
        }
    };

    if let Some(def) = boss {
        let enemy = state.spawner.spawn(def, rng);
        debug!(id = enemy.id, boss = def.name, "boss spawned");
        result.events.push(TickEvent::BossSpawned {
            id: enemy.id,
            kind: enemy.kind,
        });
        state.enemies.push(enemy);
    }
}

fn end_run(state: &mut RunState, outcome: RunOutcome, result: &mut TickResult) {
    let rewards = state.finish(outcome);
    result.events.push(TickEvent::RunEnded { outcome, rewards });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::enemy::EnemyState;
    use crate::core::run_state::RunConfig;
    use crate::data::characters::CharacterClass;
    use crate::data::enemies::get_enemy;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    fn enemy_at(id: u64, kind: EnemyType, distance: f64) -> EnemyState {
        EnemyState::new(id, get_enemy(kind).unwrap(), distance)
    }

    #[test]
    fn test_non_positive_dt_is_a_no_op() {
        let mut state = RunState::new(RunConfig::default());
        let mut rng = test_rng();
        assert!(game_tick(&mut state, 0.0, &mut rng).is_empty());
        assert!(game_tick(&mut state, -1.0, &mut rng).is_empty());
        assert_eq!(state.clock.elapsed(), 0.0);
    }

    #[test]
    fn test_spawns_after_interval() {
        let mut state = RunState::new(RunConfig::default());
        let mut rng = test_rng();
        for _ in 0..25 {
            game_tick(&mut state, 0.1, &mut rng);
        }
        assert!(!state.enemies.is_empty());
    }

    #[test]
    fn test_kill_grants_xp_and_gold() {
        let mut state = RunState::new(RunConfig::default());
        let mut rng = test_rng();
        let mut slime = enemy_at(900, EnemyType::Slime, 3.0);
        slime.current_hp = 1.0;
        state.enemies.push(slime);

        let result = game_tick(&mut state, 0.1, &mut rng);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::EnemyDefeated { id: 900, .. })));
        assert_eq!(state.ledger.kills, 1);
        assert!(state.ledger.run_gold > 0);
        assert!(state.enemies.iter().all(|e| e.id != 900));

        // XP lands when the orb reaches the player
        assert_eq!(state.ledger.total_xp, 0);
        assert_eq!(state.orbs.uncollected_xp(), 4);
        let mut collected = false;
        for _ in 0..10 {
            let result = game_tick(&mut state, 0.1, &mut rng);
            collected |= result.events.contains(&TickEvent::XpCollected { xp: 4 });
        }
        assert!(collected);
        assert_eq!(state.ledger.total_xp, 4);
    }

    #[test]
    fn test_pickup_range_bonus_collects_orbs_sooner() {
        let ticks_until_xp = |pickup_range: f64| {
            let mut state = RunState::new(RunConfig::default());
            let mut rng = test_rng();
            state.player.stats.pickup_range = pickup_range;
            state.orbs.drop_orb(4, 4.5);
            let mut ticks = 0;
            while state.ledger.total_xp == 0 && ticks < 200 {
                game_tick(&mut state, 0.1, &mut rng);
                ticks += 1;
            }
            ticks
        };
        assert!(ticks_until_xp(5.0) < ticks_until_xp(3.0));
    }

    #[test]
    fn test_faster_player_is_reached_later() {
        let distance_after = |move_speed: f64| {
            let mut state = RunState::new(RunConfig::default());
            let mut rng = test_rng();
            state.player.stats.move_speed = move_speed;
            state.enemies.push(enemy_at(900, EnemyType::Slime, 11.0));
            state.enemies[0].current_hp = 1e9;
            game_tick(&mut state, 0.5, &mut rng);
            state.enemies.iter().find(|e| e.id == 900).map(|e| e.distance)
        };
        let base = distance_after(4.5).unwrap();
        let fast = distance_after(9.0).unwrap();
        assert!(fast > base);
    }

    #[test]
    fn test_player_death_ends_run() {
        let mut state = RunState::new(RunConfig::default());
        let mut rng = test_rng();
        state.player.current_hp = 0.5;
        state.enemies.push(enemy_at(900, EnemyType::Goblin, 0.5));

        let result = game_tick(&mut state, 0.1, &mut rng);
        assert!(result.events.contains(&TickEvent::PlayerDied));
        assert_eq!(result.run_ended(), Some(RunOutcome::Defeat));
        assert_eq!(state.outcome, Some(RunOutcome::Defeat));

        // Over runs ignore further ticks
        assert!(game_tick(&mut state, 0.1, &mut rng).is_empty());
    }

    #[test]
    fn test_mini_boss_gate_spawns_boss_and_offers_evolution() {
        let mut state = RunState::new(RunConfig::quick(CharacterClass::FireMage, 20.0));
        let mut rng = test_rng();
        state.player.current_hp = 1e9;

        let mut saw_boss = false;
        let mut offered_evolution = false;
        for _ in 0..60 {
            let result = game_tick(&mut state, 0.1, &mut rng);
            saw_boss |= result
                .events
                .iter()
                .any(|e| matches!(e, TickEvent::BossSpawned { .. }));
            while let Some(choice) = state.pending_choice() {
                if matches!(choice, PendingChoice::Evolution { gate: 1, .. }) {
                    offered_evolution = true;
                }
                state.skip_choice(&mut rng).unwrap();
            }
        }
        assert!(saw_boss);
        assert!(offered_evolution);
    }

    #[test]
    fn test_paused_run_does_not_advance() {
        let mut state = RunState::new(RunConfig::default());
        let mut rng = test_rng();
        state.queue_level_up(2);
        state.advance_choices(&mut rng);
        assert!(state.is_paused());

        assert!(game_tick(&mut state, 1.0, &mut rng).is_empty());
        assert_eq!(state.clock.elapsed(), 0.0);
    }

    #[test]
    fn test_surviving_the_clock_is_victory() {
        let mut state = RunState::new(RunConfig::quick(CharacterClass::LightMage, 2.0));
        let mut rng = test_rng();
        state.player.current_hp = 1e9;
        state.player.stats.max_hp = 1e9;

        let mut outcome = None;
        for _ in 0..100 {
            while state.is_paused() {
                state.skip_choice(&mut rng).unwrap();
            }
            let result = game_tick(&mut state, 0.1, &mut rng);
            if let Some(o) = result.run_ended() {
                outcome = Some(o);
                break;
            }
        }
        assert_eq!(outcome, Some(RunOutcome::Victory));
        let rewards = state.rewards.unwrap();
        assert!(rewards.magic_stones >= 5);
    }
}
