//! Skill runtime data structures.

use crate::core::constants::AREA_DAMAGE_INTERVAL;
use crate::data::elements::ElementType;
use crate::data::evolutions::{EvolutionDefinition, EvolutionType};
use crate::data::skills::{SkillDefinition, SkillStats, SkillType};

/// A skill owned by the player.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillInstance {
    definition: &'static SkillDefinition,
    level: u32,
    cooldown_timer: f64,
    stats: SkillStats,
    evolution: Option<&'static EvolutionDefinition>,
}

impl SkillInstance {
    /// Level 1 with a ready cooldown, so the first cast is immediate.
    pub fn new(definition: &'static SkillDefinition) -> Self {
        Self {
            definition,
            level: 1,
            cooldown_timer: 0.0,
            stats: definition.base,
            evolution: None,
        }
    }

    pub fn skill(&self) -> SkillType {
        self.definition.id
    }

    pub fn definition(&self) -> &'static SkillDefinition {
        self.definition
    }

    pub fn element(&self) -> ElementType {
        self.definition.element
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.definition.max_level
    }

    pub fn stats(&self) -> &SkillStats {
        &self.stats
    }

    pub fn cooldown_remaining(&self) -> f64 {
        self.cooldown_timer.max(0.0)
    }

    pub fn evolution(&self) -> Option<EvolutionType> {
        self.evolution.map(|e| e.id)
    }

    pub fn is_evolved(&self) -> bool {
        self.evolution.is_some()
    }

    pub fn tick(&mut self, dt: f64) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        }
    }

    pub fn can_cast(&self) -> bool {
        self.cooldown_timer <= 0.0
    }

    /// Starts the cooldown. `cooldown_multiplier` comes from player stats.
    pub fn cast(&mut self, cooldown_multiplier: f64) {
        self.cooldown_timer = self.effective_cooldown() * cooldown_multiplier;
    }

    /// Raises the level by one. Returns false at max level.
    pub fn level_up(&mut self) -> bool {
        if self.is_max_level() {
            return false;
        }
        self.level += 1;
        self.stats.damage += self.definition.damage_per_level;
        self.stats.cooldown *= 1.0 - self.definition.cooldown_reduction_per_level;
        true
    }

    /// Damage per hit before player and synergy multipliers.
    pub fn damage(&self) -> f64 {
        let evolved = self.evolution.map(|e| e.damage_multiplier).unwrap_or(1.0);
        self.stats.damage * evolved
    }

    pub fn effective_cooldown(&self) -> f64 {
        let evolved = self.evolution.map(|e| e.cooldown_multiplier).unwrap_or(1.0);
        self.stats.cooldown * evolved
    }

    pub fn projectile_count(&self) -> u32 {
        let extra = self.evolution.map(|e| e.extra_projectiles).unwrap_or(0);
        self.stats.projectile_count.max(1) + extra
    }

    pub fn pierce_count(&self) -> u32 {
        let extra = self.evolution.map(|e| e.extra_pierce).unwrap_or(0);
        self.stats.pierce_count + extra
    }

    /// Applies an evolution. A skill holds at most one.
    pub fn apply_evolution(&mut self, evolution: &'static EvolutionDefinition) -> bool {
        if self.evolution.is_some() {
            return false;
        }
        self.evolution = Some(evolution);
        true
    }
}

/// Result of offering a skill to the loadout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillChange {
    Acquired { skill: SkillType },
    LeveledUp { skill: SkillType, level: u32 },
    AlreadyMaxed { skill: SkillType },
    SlotsFull { skill: SkillType },
    Unknown { skill: SkillType },
}

impl SkillChange {
    /// True when the loadout actually changed.
    pub fn is_change(&self) -> bool {
        matches!(self, SkillChange::Acquired { .. } | SkillChange::LeveledUp { .. })
    }
}

/// Multipliers that outgoing skill damage picks up from the player,
/// meta upgrades, synergies and the character passive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastModifiers {
    pub attack_multiplier: f64,
    pub cooldown_multiplier: f64,
    /// Indexed by `ElementType::index()`.
    pub element_multipliers: [f64; 6],
    /// Element, slow factor and duration applied by hits of that element.
    pub slow_on_hit: Option<(ElementType, f64, f64)>,
}

impl Default for CastModifiers {
    fn default() -> Self {
        Self {
            attack_multiplier: 1.0,
            cooldown_multiplier: 1.0,
            element_multipliers: [1.0; 6],
            slow_on_hit: None,
        }
    }
}

impl CastModifiers {
    pub fn outgoing_damage(&self, base: f64, element: ElementType) -> f64 {
        base * self.attack_multiplier * self.element_multipliers[element.index()]
    }
}

/// A lingering area effect around the player.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveArea {
    pub skill: SkillType,
    pub element: ElementType,
    pub radius: f64,
    /// Damage dealt to each enemy in the radius per pulse.
    pub damage_per_pulse: f64,
    pub remaining: f64,
    pulse_timer: f64,
}

impl ActiveArea {
    pub fn new(skill: SkillType, element: ElementType, radius: f64, damage: f64, duration: f64) -> Self {
        Self {
            skill,
            element,
            radius,
            damage_per_pulse: damage * AREA_DAMAGE_INTERVAL,
            remaining: duration.max(0.0),
            pulse_timer: 0.0,
        }
    }

    /// Advances the timers. Returns true when the area pulses this step.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.remaining -= dt;
        self.pulse_timer -= dt;
        if self.pulse_timer <= 0.0 {
            self.pulse_timer = AREA_DAMAGE_INTERVAL;
            return true;
        }
        false
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// One skill hit on one enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillHit {
    pub skill: SkillType,
    pub enemy_id: u64,
    pub damage: f64,
    pub killed: bool,
}

/// What the loadout did during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadoutTick {
    pub casts: Vec<SkillType>,
    pub hits: Vec<SkillHit>,
}

impl LoadoutTick {
    pub fn kills(&self) -> impl Iterator<Item = u64> + '_ {
        self.hits.iter().filter(|h| h.killed).map(|h| h.enemy_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::evolutions::get_evolution;
    use crate::data::skills::get_skill;

    fn firebolt() -> SkillInstance {
        SkillInstance::new(get_skill(SkillType::Firebolt).unwrap())
    }

    #[test]
    fn test_first_cast_is_immediate() {
        let mut skill = firebolt();
        assert!(skill.can_cast());
        skill.cast(1.0);
        assert!(!skill.can_cast());
        skill.tick(1.5);
        assert!(skill.can_cast());
    }

    #[test]
    fn test_level_up_scales_damage_and_cooldown() {
        let mut skill = firebolt();
        assert!(skill.level_up());
        assert_eq!(skill.level(), 2);
        assert_eq!(skill.damage(), 18.0);
        assert!((skill.stats().cooldown - 1.5 * 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_level_up_at_max_is_noop() {
        let mut skill = firebolt();
        for _ in 0..4 {
            assert!(skill.level_up());
        }
        assert!(skill.is_max_level());
        let before = skill.clone();
        assert!(!skill.level_up());
        assert_eq!(skill, before);
    }

    #[test]
    fn test_cooldown_multiplier_shortens_cast_cooldown() {
        let mut skill = firebolt();
        skill.cast(0.5);
        assert!((skill.cooldown_remaining() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_single_evolution() {
        let mut skill = firebolt();
        let lance = get_evolution(EvolutionType::FireLance).unwrap();
        let prime = get_evolution(EvolutionType::PrimeFire).unwrap();
        assert!(skill.apply_evolution(lance));
        assert!(!skill.apply_evolution(prime));
        assert_eq!(skill.evolution(), Some(EvolutionType::FireLance));
        assert_eq!(skill.damage(), 15.0 * 1.5);
        assert!((skill.effective_cooldown() - 1.5 * 0.8).abs() < 1e-9);
        assert_eq!(skill.pierce_count(), 3);
    }

    #[test]
    fn test_area_pulses_on_creation_and_every_interval() {
        let mut area = ActiveArea::new(SkillType::FrostArea, ElementType::Ice, 6.0, 8.0, 1.0);
        assert_eq!(area.damage_per_pulse, 4.0);
        assert!(area.advance(0.0));
        assert!(!area.advance(0.25));
        assert!(area.advance(0.25));
        assert!(!area.is_expired());
        assert!(!area.advance(0.25));
        assert!(area.advance(0.25));
        assert!(area.is_expired());
    }

    #[test]
    fn test_skill_change_is_change() {
        let skill = SkillType::Firebolt;
        assert!(SkillChange::Acquired { skill }.is_change());
        assert!(SkillChange::LeveledUp { skill, level: 2 }.is_change());
        assert!(!SkillChange::SlotsFull { skill }.is_change());
        assert!(!SkillChange::AlreadyMaxed { skill }.is_change());
    }
}
