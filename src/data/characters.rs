//! Playable character classes.

use super::elements::ElementType;
use super::skills::SkillType;
use crate::core::constants::{PLAYER_BASE_ATTACK, PLAYER_BASE_MOVE_SPEED, XP_PICKUP_RANGE_BASE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    FireMage,
    IceMage,
    LightMage,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 3] = [
        CharacterClass::FireMage,
        CharacterClass::IceMage,
        CharacterClass::LightMage,
    ];

    pub fn name(&self) -> &'static str {
        self.definition().name
    }

    /// Table entry for this class. The table is ordered like the enum.
    pub fn definition(&self) -> &'static CharacterDefinition {
        &ALL_CHARACTERS[*self as usize]
    }

    /// Accepts the display name ("Frost Witch") or a short slug
    /// ("fire-mage", "frost", "holy").
    pub fn from_name(name: &str) -> Option<CharacterClass> {
        let slug = name.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match slug.as_str() {
            "fire" | "fire-mage" | "firemage" => Some(CharacterClass::FireMage),
            "ice" | "ice-mage" | "icemage" | "frost" | "frost-witch" => Some(CharacterClass::IceMage),
            "light" | "light-mage" | "lightmage" | "holy" | "holy-adept" => Some(CharacterClass::LightMage),
            _ => None,
        }
    }
}

/// Character-specific passive effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Passive {
    /// Extra damage fraction for skills of the element.
    ElementDamage { element: ElementType, bonus: f64 },
    /// Hits from skills of the element slow enemies.
    SlowOnHit {
        element: ElementType,
        factor: f64,
        duration: f64,
    },
    /// Constant HP regeneration.
    Regeneration { per_second: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterDefinition {
    pub class: CharacterClass,
    pub name: &'static str,
    pub description: &'static str,
    pub max_hp: f64,
    pub attack_power: f64,
    pub move_speed: f64,
    pub pickup_range: f64,
    pub starting_skill: SkillType,
    pub primary_element: ElementType,
    pub passive: Passive,
    pub passive_description: &'static str,
}

pub static ALL_CHARACTERS: [CharacterDefinition; 3] = [
    CharacterDefinition {
        class: CharacterClass::FireMage,
        name: "Fire Mage",
        description: "A mage who wields the power of fire. High damage output.",
        max_hp: 100.0,
        attack_power: PLAYER_BASE_ATTACK,
        move_speed: PLAYER_BASE_MOVE_SPEED,
        pickup_range: XP_PICKUP_RANGE_BASE,
        starting_skill: SkillType::Firebolt,
        primary_element: ElementType::Fire,
        passive: Passive::ElementDamage {
            element: ElementType::Fire,
            bonus: crate::core::constants::FIRE_MAGE_FIRE_DAMAGE_BONUS,
        },
        passive_description: "Fire damage +10%",
    },
    CharacterDefinition {
        class: CharacterClass::IceMage,
        name: "Frost Witch",
        description: "A witch who controls ice. Slows enemies.",
        max_hp: 105.0,
        attack_power: PLAYER_BASE_ATTACK,
        move_speed: PLAYER_BASE_MOVE_SPEED,
        pickup_range: XP_PICKUP_RANGE_BASE,
        starting_skill: SkillType::IceShot,
        primary_element: ElementType::Ice,
        passive: Passive::SlowOnHit {
            element: ElementType::Ice,
            factor: crate::core::constants::FROST_WITCH_SLOW_FACTOR,
            duration: crate::core::constants::FROST_WITCH_SLOW_DURATION,
        },
        passive_description: "Ice skills slow enemies by 20%",
    },
    CharacterDefinition {
        class: CharacterClass::LightMage,
        name: "Holy Adept",
        description: "An adept of holy magic. Balanced stats with healing.",
        max_hp: 110.0,
        attack_power: PLAYER_BASE_ATTACK,
        move_speed: PLAYER_BASE_MOVE_SPEED,
        pickup_range: XP_PICKUP_RANGE_BASE,
        starting_skill: SkillType::HolyShot,
        primary_element: ElementType::Light,
        passive: Passive::Regeneration {
            per_second: crate::core::constants::HOLY_ADEPT_REGEN_PER_SECOND,
        },
        passive_description: "Regenerate 1 HP per second",
    },
];

pub fn get_character(class: CharacterClass) -> Option<&'static CharacterDefinition> {
    ALL_CHARACTERS.iter().find(|c| c.class == class)
}
