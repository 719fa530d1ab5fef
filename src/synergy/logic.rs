//! Elemental synergy activation.
//!
//! A synergy activates once both of its elements reach the required total
//! skill level, and stays active for the rest of the run.

use crate::core::constants::SYNERGY_REQUIRED_LEVEL;
use crate::data::elements::ElementType;
use crate::data::synergies::{get_synergy, SynergyDefinition, SynergyType, ALL_SYNERGIES};
use crate::skills::SkillLoadout;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct SynergyEvaluator {
    /// In activation order.
    active: Vec<SynergyType>,
    required_level: u32,
}

impl Default for SynergyEvaluator {
    fn default() -> Self {
        Self::new(SYNERGY_REQUIRED_LEVEL)
    }
}

impl SynergyEvaluator {
    pub fn new(required_level: u32) -> Self {
        Self {
            active: Vec::new(),
            required_level,
        }
    }

    pub fn active(&self) -> &[SynergyType] {
        &self.active
    }

    pub fn is_active(&self, synergy: SynergyType) -> bool {
        self.active.contains(&synergy)
    }

    /// Re-evaluates after any loadout change. Returns the synergies that
    /// became active on this call.
    pub fn on_skill_changed(&mut self, loadout: &SkillLoadout) -> Vec<SynergyType> {
        let mut totals = [0u32; 6];
        for element in ElementType::ALL {
            totals[element.index()] = loadout.total_level_for_element(element);
        }

        let mut activated = Vec::new();
        for def in ALL_SYNERGIES.iter() {
            if self.is_active(def.id) {
                continue;
            }
            let (a, b) = def.elements;
            if totals[a.index()] >= self.required_level && totals[b.index()] >= self.required_level
            {
                self.active.push(def.id);
                activated.push(def.id);
                debug!(synergy = def.name, multiplier = def.damage_multiplier, "synergy activated");
            }
        }
        activated
    }

    fn active_definitions(&self) -> impl Iterator<Item = &'static SynergyDefinition> + '_ {
        self.active.iter().filter_map(|&id| get_synergy(id))
    }

    /// Product of every active synergy multiplier.
    pub fn damage_multiplier(&self) -> f64 {
        self.active_definitions()
            .map(|d| d.damage_multiplier)
            .product()
    }

    /// Product of active synergy multipliers that involve `element`.
    pub fn damage_multiplier_for(&self, element: ElementType) -> f64 {
        self.active_definitions()
            .filter(|d| d.involves(element))
            .map(|d| d.damage_multiplier)
            .product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::skills::SkillType;

    fn loadout_with(skills: &[(SkillType, u32)]) -> SkillLoadout {
        let mut loadout = SkillLoadout::default();
        for &(skill, level) in skills {
            for _ in 0..level {
                loadout.acquire(skill);
            }
        }
        loadout
    }

    #[test]
    fn test_no_synergy_below_threshold() {
        let loadout = loadout_with(&[(SkillType::Firebolt, 3), (SkillType::WindArrow, 2)]);
        let mut evaluator = SynergyEvaluator::default();
        assert!(evaluator.on_skill_changed(&loadout).is_empty());
        assert_eq!(evaluator.damage_multiplier(), 1.0);
    }

    #[test]
    fn test_activation_at_threshold() {
        let loadout = loadout_with(&[(SkillType::Firebolt, 3), (SkillType::WindArrow, 3)]);
        let mut evaluator = SynergyEvaluator::default();
        assert_eq!(
            evaluator.on_skill_changed(&loadout),
            vec![SynergyType::FireTornado]
        );
        assert!(evaluator.is_active(SynergyType::FireTornado));
        assert_eq!(evaluator.damage_multiplier(), 1.5);
        assert_eq!(evaluator.damage_multiplier_for(ElementType::Fire), 1.5);
        assert_eq!(evaluator.damage_multiplier_for(ElementType::Ice), 1.0);
    }

    #[test]
    fn test_element_totals_span_skills() {
        // Two Ice skills at levels 2 and 1 reach the threshold together
        let loadout = loadout_with(&[
            (SkillType::IceShot, 2),
            (SkillType::FrostArea, 1),
            (SkillType::DarkBolt, 3),
        ]);
        let mut evaluator = SynergyEvaluator::default();
        assert_eq!(
            evaluator.on_skill_changed(&loadout),
            vec![SynergyType::FrozenCurse]
        );
    }

    #[test]
    fn test_idempotent_and_monotonic() {
        let mut loadout = loadout_with(&[(SkillType::Firebolt, 3), (SkillType::IceShot, 3)]);
        let mut evaluator = SynergyEvaluator::default();
        assert_eq!(evaluator.on_skill_changed(&loadout).len(), 1);
        assert!(evaluator.on_skill_changed(&loadout).is_empty());

        for _ in 0..3 {
            loadout.acquire(SkillType::WindArrow);
        }
        let added = evaluator.on_skill_changed(&loadout);
        assert_eq!(added, vec![SynergyType::FireTornado, SynergyType::Blizzard]);
        assert_eq!(evaluator.active().len(), 3);
        let expected = 1.6 * 1.5 * 1.5;
        assert!((evaluator.damage_multiplier() - expected).abs() < 1e-9);
        // Fire is in Steam Explosion and Fire Tornado
        assert!((evaluator.damage_multiplier_for(ElementType::Fire) - 1.6 * 1.5).abs() < 1e-9);
    }
}
