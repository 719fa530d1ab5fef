//! Skill loadout: acquisition, evolutions and per-tick cast resolution.

use super::types::{ActiveArea, CastModifiers, LoadoutTick, SkillChange, SkillHit, SkillInstance};
use crate::actors::enemy::EnemyState;
use crate::core::constants::MAX_SKILL_SLOTS;
use crate::data::elements::ElementType;
use crate::data::evolutions::{EvolutionDefinition, EvolutionScope};
use crate::data::skills::{get_skill, SkillDelivery, SkillType};
use tracing::debug;

/// The player's owned skills, in acquisition order.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillLoadout {
    skills: Vec<SkillInstance>,
    areas: Vec<ActiveArea>,
    max_slots: usize,
}

impl Default for SkillLoadout {
    fn default() -> Self {
        Self::new(MAX_SKILL_SLOTS)
    }
}

impl SkillLoadout {
    pub fn new(max_slots: usize) -> Self {
        Self {
            skills: Vec::new(),
            areas: Vec::new(),
            max_slots,
        }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.skills.len() >= self.max_slots
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillInstance> {
        self.skills.iter()
    }

    pub fn get(&self, skill: SkillType) -> Option<&SkillInstance> {
        self.skills.iter().find(|s| s.skill() == skill)
    }

    pub fn contains(&self, skill: SkillType) -> bool {
        self.get(skill).is_some()
    }

    pub fn active_areas(&self) -> &[ActiveArea] {
        &self.areas
    }

    /// Adds a new skill at level 1 or levels up an owned one.
    pub fn acquire(&mut self, skill: SkillType) -> SkillChange {
        if let Some(owned) = self.skills.iter_mut().find(|s| s.skill() == skill) {
            if owned.level_up() {
                debug!(skill = skill.name(), level = owned.level(), "skill leveled up");
                return SkillChange::LeveledUp {
                    skill,
                    level: owned.level(),
                };
            }
            return SkillChange::AlreadyMaxed { skill };
        }

        let Some(definition) = get_skill(skill) else {
            return SkillChange::Unknown { skill };
        };
        if self.is_full() {
            return SkillChange::SlotsFull { skill };
        }

        self.skills.push(SkillInstance::new(definition));
        debug!(skill = skill.name(), slot = self.skills.len(), "skill acquired");
        SkillChange::Acquired { skill }
    }

    /// Sum of skill levels per element.
    pub fn total_level_for_element(&self, element: ElementType) -> u32 {
        self.skills
            .iter()
            .filter(|s| s.element() == element)
            .map(|s| s.level())
            .sum()
    }

    /// Distinct elements of owned skills, in acquisition order.
    pub fn active_elements(&self) -> Vec<ElementType> {
        let mut elements = Vec::new();
        for skill in &self.skills {
            if !elements.contains(&skill.element()) {
                elements.push(skill.element());
            }
        }
        elements
    }

    /// Skills that a level-up card could improve or add.
    pub fn upgrade_candidates(&self) -> Vec<SkillType> {
        SkillType::ALL
            .into_iter()
            .filter(|&skill| match self.get(skill) {
                Some(owned) => !owned.is_max_level(),
                None => !self.is_full() && get_skill(skill).is_some(),
            })
            .collect()
    }

    /// Whether an evolution would change at least one owned skill.
    pub fn can_evolve(&self, evolution: &EvolutionDefinition) -> bool {
        self.skills
            .iter()
            .any(|s| !s.is_evolved() && evolution_targets(evolution, s))
    }

    /// Applies an evolution and returns the skills it changed.
    pub fn apply_evolution(&mut self, evolution: &'static EvolutionDefinition) -> Vec<SkillType> {
        let mut changed = Vec::new();
        for skill in self.skills.iter_mut() {
            if evolution_targets(evolution, skill) && skill.apply_evolution(evolution) {
                changed.push(skill.skill());
            }
        }
        if !changed.is_empty() {
            debug!(evolution = evolution.name, count = changed.len(), "evolution applied");
        }
        changed
    }

    /// Advances cooldowns and area effects, then resolves every ready skill
    /// that has a target.
    pub fn tick(
        &mut self,
        dt: f64,
        enemies: &mut [EnemyState],
        modifiers: &CastModifiers,
    ) -> LoadoutTick {
        let mut result = LoadoutTick::default();

        for area in self.areas.iter_mut() {
            if area.advance(dt) {
                pulse_area(area, enemies, modifiers, &mut result.hits);
            }
        }
        self.areas.retain(|a| !a.is_expired());

        for skill in self.skills.iter_mut() {
            skill.tick(dt);
            if !skill.can_cast() {
                continue;
            }

            let stats = *skill.stats();
            let element = skill.element();
            let damage = modifiers.outgoing_damage(skill.damage(), element);

            match stats.delivery() {
                SkillDelivery::Projectile => {
                    if nearest_in_range(enemies, stats.range, 1).is_empty() {
                        continue;
                    }
                    for _ in 0..skill.projectile_count() {
                        let targets =
                            nearest_in_range(enemies, stats.range, skill.pierce_count() as usize + 1);
                        for index in targets {
                            result.hits.push(hit_enemy(
                                &mut enemies[index],
                                skill.skill(),
                                element,
                                damage,
                                modifiers,
                            ));
                        }
                    }
                }
                SkillDelivery::Area => {
                    if nearest_in_range(enemies, stats.area_radius, 1).is_empty() {
                        continue;
                    }
                    let mut area = ActiveArea::new(
                        skill.skill(),
                        element,
                        stats.area_radius,
                        damage,
                        stats.duration,
                    );
                    if area.advance(0.0) {
                        pulse_area(&area, enemies, modifiers, &mut result.hits);
                    }
                    if !area.is_expired() {
                        self.areas.push(area);
                    }
                }
            }

            skill.cast(modifiers.cooldown_multiplier);
            result.casts.push(skill.skill());
        }

        result
    }
}

fn evolution_targets(evolution: &EvolutionDefinition, skill: &SkillInstance) -> bool {
    match evolution.scope {
        EvolutionScope::BaseSkill => skill.skill() == evolution.base_skill,
        EvolutionScope::Element => skill.element() == evolution.element,
    }
}

/// Indices of up to `count` living enemies within `range`, nearest first.
fn nearest_in_range(enemies: &[EnemyState], range: f64, count: usize) -> Vec<usize> {
    let mut in_range: Vec<usize> = enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive() && e.distance <= range)
        .map(|(i, _)| i)
        .collect();
    in_range.sort_by(|&a, &b| {
        enemies[a]
            .distance
            .total_cmp(&enemies[b].distance)
            .then(enemies[a].id.cmp(&enemies[b].id))
    });
    in_range.truncate(count);
    in_range
}

fn pulse_area(
    area: &ActiveArea,
    enemies: &mut [EnemyState],
    modifiers: &CastModifiers,
    hits: &mut Vec<SkillHit>,
) {
    for enemy in enemies.iter_mut() {
        if enemy.is_alive() && enemy.distance <= area.radius {
            hits.push(hit_enemy(
                enemy,
                area.skill,
                area.element,
                area.damage_per_pulse,
                modifiers,
            ));
        }
    }
}

fn hit_enemy(
    enemy: &mut EnemyState,
    skill: SkillType,
    element: ElementType,
    damage: f64,
    modifiers: &CastModifiers,
) -> SkillHit {
    if let Some((slow_element, factor, duration)) = modifiers.slow_on_hit {
        if slow_element == element {
            enemy.apply_slow(factor, duration);
        }
    }
    let killed = enemy.take_damage(damage);
    SkillHit {
        skill,
        enemy_id: enemy.id,
        damage,
        killed,
    }
}
