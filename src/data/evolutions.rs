//! Skill evolutions offered after mini-boss gates.

use super::elements::ElementType;
use super::skills::SkillType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvolutionType {
    FireLance,
    IceNeedle,
    TwinArrow,
    SuperconductorCore,
    PrimeFire,
    PrimeIce,
    PrimeThunder,
    PrimeWind,
    PrimeLight,
    PrimeDark,
}

impl EvolutionType {
    pub const ALL: [EvolutionType; 10] = [
        EvolutionType::FireLance,
        EvolutionType::IceNeedle,
        EvolutionType::TwinArrow,
        EvolutionType::SuperconductorCore,
        EvolutionType::PrimeFire,
        EvolutionType::PrimeIce,
        EvolutionType::PrimeThunder,
        EvolutionType::PrimeWind,
        EvolutionType::PrimeLight,
        EvolutionType::PrimeDark,
    ];

    pub fn name(&self) -> &'static str {
        get_evolution(*self).map(|e| e.name).unwrap_or("Unknown Evolution")
    }
}

/// Which owned skills an evolution modifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionScope {
    /// Only the base skill.
    BaseSkill,
    /// Every owned skill of the evolution's element.
    Element,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvolutionDefinition {
    pub id: EvolutionType,
    pub name: &'static str,
    pub description: &'static str,
    pub base_skill: SkillType,
    pub element: ElementType,
    pub damage_multiplier: f64,
    pub cooldown_multiplier: f64,
    pub effect: &'static str,
    pub scope: EvolutionScope,
    pub extra_projectiles: u32,
    pub extra_pierce: u32,
}

pub static ALL_EVOLUTIONS: [EvolutionDefinition; 10] = [
    EvolutionDefinition {
        id: EvolutionType::FireLance,
        name: "Fire Lance",
        description: "Evolved Firebolt - Pierces through enemies",
        base_skill: SkillType::Firebolt,
        element: ElementType::Fire,
        damage_multiplier: 1.5,
        cooldown_multiplier: 0.8,
        effect: "Pierces 3 enemies",
        extra_projectiles: 0,
        extra_pierce: 3,
        scope: EvolutionScope::BaseSkill,
    },
    EvolutionDefinition {
        id: EvolutionType::IceNeedle,
        name: "Ice Needle",
        description: "Evolved Ice Shot - Fires multiple needles",
        base_skill: SkillType::IceShot,
        element: ElementType::Ice,
        damage_multiplier: 1.3,
        cooldown_multiplier: 0.9,
        effect: "Fires 3 needles in a spread",
        extra_projectiles: 2,
        extra_pierce: 0,
        scope: EvolutionScope::BaseSkill,
    },
    EvolutionDefinition {
        id: EvolutionType::TwinArrow,
        name: "Twin Arrow",
        description: "Evolved Wind Arrow - Fires two arrows",
        base_skill: SkillType::WindArrow,
        element: ElementType::Wind,
        damage_multiplier: 1.4,
        cooldown_multiplier: 0.85,
        effect: "Fires 2 arrows simultaneously",
        extra_projectiles: 1,
        extra_pierce: 0,
        scope: EvolutionScope::BaseSkill,
    },
    EvolutionDefinition {
        id: EvolutionType::SuperconductorCore,
        name: "Superconductor Core",
        description: "Evolved Lightning Chain - Chains indefinitely",
        base_skill: SkillType::LightningChain,
        element: ElementType::Thunder,
        damage_multiplier: 1.6,
        cooldown_multiplier: 0.75,
        effect: "Chains to all nearby enemies",
        extra_projectiles: 0,
        extra_pierce: 10,
        scope: EvolutionScope::BaseSkill,
    },
    EvolutionDefinition {
        id: EvolutionType::PrimeFire,
        name: "Prime Fire",
        description: "Ultimate Fire enhancement",
        base_skill: SkillType::Firebolt,
        element: ElementType::Fire,
        damage_multiplier: 2.0,
        cooldown_multiplier: 0.7,
        effect: "All Fire skills deal massive damage",
        extra_projectiles: 0,
        extra_pierce: 0,
        scope: EvolutionScope::Element,
    },
    EvolutionDefinition {
        id: EvolutionType::PrimeIce,
        name: "Prime Ice",
        description: "Ultimate Ice enhancement",
        base_skill: SkillType::IceShot,
        element: ElementType::Ice,
        damage_multiplier: 2.0,
        cooldown_multiplier: 0.7,
        effect: "All Ice skills freeze enemies",
        extra_projectiles: 0,
        extra_pierce: 0,
        scope: EvolutionScope::Element,
    },
    EvolutionDefinition {
        id: EvolutionType::PrimeThunder,
        name: "Prime Thunder",
        description: "Ultimate Thunder enhancement",
        base_skill: SkillType::LightningChain,
        element: ElementType::Thunder,
        damage_multiplier: 2.0,
        cooldown_multiplier: 0.7,
        effect: "All Thunder skills chain infinitely",
        extra_projectiles: 0,
        extra_pierce: 0,
        scope: EvolutionScope::Element,
    },
    EvolutionDefinition {
        id: EvolutionType::PrimeWind,
        name: "Prime Wind",
        description: "Ultimate Wind enhancement",
        base_skill: SkillType::WindArrow,
        element: ElementType::Wind,
        damage_multiplier: 2.0,
        cooldown_multiplier: 0.7,
        effect: "All Wind skills pierce infinitely",
        extra_projectiles: 0,
        extra_pierce: 0,
        scope: EvolutionScope::Element,
    },
    EvolutionDefinition {
        id: EvolutionType::PrimeLight,
        name: "Prime Light",
        description: "Ultimate Light enhancement",
        base_skill: SkillType::HolyShot,
        element: ElementType::Light,
        damage_multiplier: 2.0,
        cooldown_multiplier: 0.7,
        effect: "All Light skills heal the player",
        extra_projectiles: 0,
        extra_pierce: 0,
        scope: EvolutionScope::Element,
    },
    EvolutionDefinition {
        id: EvolutionType::PrimeDark,
        name: "Prime Dark",
        description: "Ultimate Dark enhancement",
        base_skill: SkillType::DarkBolt,
        element: ElementType::Dark,
        damage_multiplier: 2.0,
        cooldown_multiplier: 0.7,
        effect: "All Dark skills drain life",
        extra_projectiles: 0,
        extra_pierce: 0,
        scope: EvolutionScope::Element,
    },
];

pub fn get_evolution(id: EvolutionType) -> Option<&'static EvolutionDefinition> {
    ALL_EVOLUTIONS.iter().find(|e| e.id == id)
}

pub fn evolutions_for_skill(skill: SkillType) -> impl Iterator<Item = &'static EvolutionDefinition> {
    ALL_EVOLUTIONS.iter().filter(move |e| e.base_skill == skill)
}

pub fn evolutions_by_element(
    element: ElementType,
) -> impl Iterator<Item = &'static EvolutionDefinition> {
    ALL_EVOLUTIONS.iter().filter(move |e| e.element == element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_evolutions_are_element_scoped() {
        for def in ALL_EVOLUTIONS.iter() {
            let is_prime = def.name.starts_with("Prime");
            assert_eq!(is_prime, def.scope == EvolutionScope::Element, "{}", def.name);
        }
    }

    #[test]
    fn test_firebolt_has_two_evolutions() {
        let ids: Vec<_> = evolutions_for_skill(SkillType::Firebolt).map(|e| e.id).collect();
        assert_eq!(ids, vec![EvolutionType::FireLance, EvolutionType::PrimeFire]);
        assert_eq!(evolutions_for_skill(SkillType::Tornado).count(), 0);
    }

    #[test]
    fn test_evolutions_speed_up_and_strengthen() {
        for def in ALL_EVOLUTIONS.iter() {
            assert!(def.damage_multiplier > 1.0);
            assert!(def.cooldown_multiplier < 1.0);
        }
        assert_eq!(evolutions_by_element(ElementType::Light).count(), 1);
    }

    #[test]
    fn test_only_base_skill_evolutions_change_shape() {
        for def in ALL_EVOLUTIONS.iter() {
            let changes_shape = def.extra_projectiles > 0 || def.extra_pierce > 0;
            assert_eq!(changes_shape, def.scope == EvolutionScope::BaseSkill, "{}", def.name);
        }
    }
}
