//! Skill definitions table.

use super::elements::ElementType;
use crate::core::constants::MAX_SKILL_LEVEL;
use serde::{Deserialize, Serialize};

/// Skill identifiers, two per element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillType {
    Firebolt,
    FlameNova,
    IceShot,
    FrostArea,
    LightningChain,
    ThunderSpear,
    WindArrow,
    Tornado,
    HolyShot,
    HolyShield,
    DarkBolt,
    LifeDrain,
}

impl SkillType {
    pub const ALL: [SkillType; 12] = [
        SkillType::Firebolt,
        SkillType::FlameNova,
        SkillType::IceShot,
        SkillType::FrostArea,
        SkillType::LightningChain,
        SkillType::ThunderSpear,
        SkillType::WindArrow,
        SkillType::Tornado,
        SkillType::HolyShot,
        SkillType::HolyShield,
        SkillType::DarkBolt,
        SkillType::LifeDrain,
    ];

    /// Display name, taken from the definition table.
    pub fn name(&self) -> &'static str {
        get_skill(*self).map(|s| s.name).unwrap_or("Unknown Skill")
    }

    /// Case-insensitive lookup by display name ("flame nova") or
    /// identifier ("FlameNova").
    pub fn from_name(name: &str) -> Option<SkillType> {
        let wanted: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();
        Self::ALL.into_iter().find(|s| {
            let candidate: String = s.name().chars().filter(|c| !c.is_whitespace()).collect();
            candidate.eq_ignore_ascii_case(&wanted)
        })
    }
}

/// Numeric stats of a skill at a given level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkillStats {
    pub damage: f64,
    pub cooldown: f64,
    pub projectile_speed: f64,
    pub range: f64,
    pub projectile_count: u32,
    pub area_radius: f64,
    pub pierce_count: u32,
    pub duration: f64,
}

/// How a cast reaches its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillDelivery {
    /// Travelling projectiles that hit the nearest enemies in range.
    Projectile,
    /// A lingering zone around the player that pulses damage.
    Area,
}

impl SkillStats {
    pub fn delivery(&self) -> SkillDelivery {
        if self.area_radius > 0.0 && self.projectile_speed <= 0.0 {
            SkillDelivery::Area
        } else {
            SkillDelivery::Projectile
        }
    }
}

/// Immutable definition of a skill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillDefinition {
    pub id: SkillType,
    pub name: &'static str,
    pub element: ElementType,
    pub description: &'static str,
    pub base: SkillStats,
    pub max_level: u32,
    pub damage_per_level: f64,
    /// Fraction of the current cooldown removed per level (0.05 = 5%).
    pub cooldown_reduction_per_level: f64,
}

const fn stats(
    damage: f64,
    cooldown: f64,
    projectile_speed: f64,
    range: f64,
    projectile_count: u32,
    area_radius: f64,
    pierce_count: u32,
    duration: f64,
) -> SkillStats {
    SkillStats {
        damage,
        cooldown,
        projectile_speed,
        range,
        projectile_count,
        area_radius,
        pierce_count,
        duration,
    }
}

pub static ALL_SKILLS: [SkillDefinition; 12] = [
    SkillDefinition {
        id: SkillType::Firebolt,
        name: "Firebolt",
        element: ElementType::Fire,
        description: "Shoots a fireball at the nearest enemy",
        base: stats(15.0, 1.5, 12.0, 15.0, 1, 0.0, 0, 0.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 3.0,
        cooldown_reduction_per_level: 0.05,
    },
    SkillDefinition {
        id: SkillType::FlameNova,
        name: "Flame Nova",
        element: ElementType::Fire,
        description: "Creates a ring of fire around the player",
        base: stats(25.0, 3.0, 0.0, 5.0, 8, 5.0, 0, 0.5),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 5.0,
        cooldown_reduction_per_level: 0.1,
    },
    SkillDefinition {
        id: SkillType::IceShot,
        name: "Ice Shot",
        element: ElementType::Ice,
        description: "Fires ice projectiles that slow enemies",
        base: stats(12.0, 1.2, 10.0, 12.0, 1, 0.0, 1, 0.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 2.5,
        cooldown_reduction_per_level: 0.05,
    },
    SkillDefinition {
        id: SkillType::FrostArea,
        name: "Frost Area",
        element: ElementType::Ice,
        description: "Creates a freezing zone that damages enemies",
        base: stats(8.0, 2.0, 0.0, 6.0, 1, 6.0, 0, 3.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 2.0,
        cooldown_reduction_per_level: 0.08,
    },
    SkillDefinition {
        id: SkillType::LightningChain,
        name: "Lightning Chain",
        element: ElementType::Thunder,
        description: "Lightning that chains between enemies",
        base: stats(20.0, 2.5, 20.0, 10.0, 1, 0.0, 3, 0.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 4.0,
        cooldown_reduction_per_level: 0.1,
    },
    SkillDefinition {
        id: SkillType::ThunderSpear,
        name: "Thunder Spear",
        element: ElementType::Thunder,
        description: "Powerful lightning spear that pierces enemies",
        base: stats(35.0, 4.0, 15.0, 20.0, 1, 0.0, 5, 0.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 7.0,
        cooldown_reduction_per_level: 0.15,
    },
    SkillDefinition {
        id: SkillType::WindArrow,
        name: "Wind Arrow",
        element: ElementType::Wind,
        description: "Fast wind arrows that pierce enemies",
        base: stats(10.0, 0.8, 18.0, 15.0, 1, 0.0, 2, 0.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 2.0,
        cooldown_reduction_per_level: 0.04,
    },
    SkillDefinition {
        id: SkillType::Tornado,
        name: "Tornado",
        element: ElementType::Wind,
        description: "Creates a tornado that pulls in enemies",
        base: stats(18.0, 3.5, 5.0, 8.0, 1, 4.0, 0, 4.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 4.0,
        cooldown_reduction_per_level: 0.12,
    },
    SkillDefinition {
        id: SkillType::HolyShot,
        name: "Holy Shot",
        element: ElementType::Light,
        description: "Holy projectile that seeks enemies",
        base: stats(14.0, 1.3, 11.0, 14.0, 1, 0.0, 0, 0.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 3.0,
        cooldown_reduction_per_level: 0.05,
    },
    SkillDefinition {
        id: SkillType::HolyShield,
        name: "Holy Shield",
        element: ElementType::Light,
        description: "Creates a protective shield that damages enemies",
        base: stats(22.0, 2.8, 0.0, 3.0, 1, 3.0, 0, 5.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 4.5,
        cooldown_reduction_per_level: 0.1,
    },
    SkillDefinition {
        id: SkillType::DarkBolt,
        name: "Dark Bolt",
        element: ElementType::Dark,
        description: "Dark projectile that deals high damage",
        base: stats(18.0, 1.8, 13.0, 16.0, 1, 0.0, 0, 0.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 3.5,
        cooldown_reduction_per_level: 0.07,
    },
    SkillDefinition {
        id: SkillType::LifeDrain,
        name: "Life Drain",
        element: ElementType::Dark,
        description: "Drains life from enemies in an area",
        base: stats(12.0, 2.2, 0.0, 7.0, 1, 7.0, 0, 2.0),
        max_level: MAX_SKILL_LEVEL,
        damage_per_level: 2.5,
        cooldown_reduction_per_level: 0.08,
    },
];

/// Looks up a skill definition. Returns `None` when the table has no entry.
pub fn get_skill(id: SkillType) -> Option<&'static SkillDefinition> {
    ALL_SKILLS.iter().find(|s| s.id == id)
}

pub fn skills_by_element(element: ElementType) -> impl Iterator<Item = &'static SkillDefinition> {
    ALL_SKILLS.iter().filter(move |s| s.element == element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_skill_type_has_a_definition() {
        for id in SkillType::ALL {
            let def = get_skill(id).expect("definition should exist");
            assert_eq!(def.id, id);
            assert!(def.base.cooldown > 0.0);
            assert_eq!(def.max_level, MAX_SKILL_LEVEL);
        }
    }

    #[test]
    fn test_two_skills_per_element() {
        for element in ElementType::ALL {
            assert_eq!(skills_by_element(element).count(), 2, "{:?}", element);
        }
    }

    #[test]
    fn test_delivery_classification() {
        let nova = get_skill(SkillType::FlameNova).unwrap();
        assert_eq!(nova.base.delivery(), SkillDelivery::Area);
        let tornado = get_skill(SkillType::Tornado).unwrap();
        assert_eq!(tornado.base.delivery(), SkillDelivery::Projectile);
        let bolt = get_skill(SkillType::Firebolt).unwrap();
        assert_eq!(bolt.base.delivery(), SkillDelivery::Projectile);
    }

    #[test]
    fn test_from_name_variants() {
        assert_eq!(SkillType::from_name("Flame Nova"), Some(SkillType::FlameNova));
        assert_eq!(SkillType::from_name("flamenova"), Some(SkillType::FlameNova));
        assert_eq!(SkillType::from_name("life-drain"), Some(SkillType::LifeDrain));
        assert_eq!(SkillType::from_name("Meteor"), None);
    }
}
