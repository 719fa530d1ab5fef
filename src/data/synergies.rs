//! Elemental synergy definitions.

use super::elements::ElementType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SynergyType {
    FireTornado,
    SteamExplosion,
    ExplosiveThunder,
    NuclearExplosion,
    Superconductor,
    Storm,
    Blizzard,
    SolarFlare,
    FrozenCurse,
    DivineWind,
}

impl SynergyType {
    pub const ALL: [SynergyType; 10] = [
        SynergyType::FireTornado,
        SynergyType::SteamExplosion,
        SynergyType::ExplosiveThunder,
        SynergyType::NuclearExplosion,
        SynergyType::Superconductor,
        SynergyType::Storm,
        SynergyType::Blizzard,
        SynergyType::SolarFlare,
        SynergyType::FrozenCurse,
        SynergyType::DivineWind,
    ];

    pub fn name(&self) -> &'static str {
        get_synergy(*self).map(|s| s.name).unwrap_or("Unknown Synergy")
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynergyDefinition {
    pub id: SynergyType,
    pub name: &'static str,
    pub description: &'static str,
    pub elements: (ElementType, ElementType),
    pub damage_multiplier: f64,
    pub effect_cooldown: f64,
    pub effect_description: &'static str,
}

impl SynergyDefinition {
    pub fn involves(&self, element: ElementType) -> bool {
        self.elements.0 == element || self.elements.1 == element
    }
}

pub static ALL_SYNERGIES: [SynergyDefinition; 10] = [
    SynergyDefinition {
        id: SynergyType::FireTornado,
        name: "Fire Tornado",
        description: "Fire and Wind combine to create burning tornadoes",
        elements: (ElementType::Fire, ElementType::Wind),
        damage_multiplier: 1.5,
        effect_cooldown: 5.0,
        effect_description: "Tornado skills leave burning trails",
    },
    SynergyDefinition {
        id: SynergyType::SteamExplosion,
        name: "Steam Explosion",
        description: "Fire and Ice create explosive steam",
        elements: (ElementType::Fire, ElementType::Ice),
        damage_multiplier: 1.6,
        effect_cooldown: 6.0,
        effect_description: "Ice skills explode on impact",
    },
    SynergyDefinition {
        id: SynergyType::ExplosiveThunder,
        name: "Explosive Thunder",
        description: "Fire and Thunder create explosive lightning",
        elements: (ElementType::Fire, ElementType::Thunder),
        damage_multiplier: 1.7,
        effect_cooldown: 7.0,
        effect_description: "Thunder skills cause explosions",
    },
    SynergyDefinition {
        id: SynergyType::NuclearExplosion,
        name: "Nuclear Explosion",
        description: "Light and Dark create devastating explosions",
        elements: (ElementType::Light, ElementType::Dark),
        damage_multiplier: 2.0,
        effect_cooldown: 10.0,
        effect_description: "Massive area damage periodically",
    },
    SynergyDefinition {
        id: SynergyType::Superconductor,
        name: "Superconductor",
        description: "Ice and Thunder create perfect conductivity",
        elements: (ElementType::Ice, ElementType::Thunder),
        damage_multiplier: 1.8,
        effect_cooldown: 8.0,
        effect_description: "Lightning chains infinitely through frozen enemies",
    },
    SynergyDefinition {
        id: SynergyType::Storm,
        name: "Storm",
        description: "Wind and Thunder create powerful storms",
        elements: (ElementType::Wind, ElementType::Thunder),
        damage_multiplier: 1.6,
        effect_cooldown: 6.0,
        effect_description: "Wind skills call down lightning strikes",
    },
    SynergyDefinition {
        id: SynergyType::Blizzard,
        name: "Blizzard",
        description: "Ice and Wind create freezing blizzards",
        elements: (ElementType::Ice, ElementType::Wind),
        damage_multiplier: 1.5,
        effect_cooldown: 5.0,
        effect_description: "Wind skills freeze enemies",
    },
    SynergyDefinition {
        id: SynergyType::SolarFlare,
        name: "Solar Flare",
        description: "Fire and Light create intense solar energy",
        elements: (ElementType::Fire, ElementType::Light),
        damage_multiplier: 1.7,
        effect_cooldown: 7.0,
        effect_description: "Light skills burn enemies over time",
    },
    SynergyDefinition {
        id: SynergyType::FrozenCurse,
        name: "Frozen Curse",
        description: "Ice and Dark create cursed ice",
        elements: (ElementType::Ice, ElementType::Dark),
        damage_multiplier: 1.6,
        effect_cooldown: 6.0,
        effect_description: "Dark skills freeze and curse enemies",
    },
    SynergyDefinition {
        id: SynergyType::DivineWind,
        name: "Divine Wind",
        description: "Wind and Light create holy gales",
        elements: (ElementType::Wind, ElementType::Light),
        damage_multiplier: 1.5,
        effect_cooldown: 5.0,
        effect_description: "Wind skills heal the player",
    },
];

pub fn get_synergy(id: SynergyType) -> Option<&'static SynergyDefinition> {
    ALL_SYNERGIES.iter().find(|s| s.id == id)
}

/// Finds the synergy formed by two elements, in either order.
pub fn synergy_for_elements(a: ElementType, b: ElementType) -> Option<&'static SynergyDefinition> {
    ALL_SYNERGIES
        .iter()
        .find(|s| s.elements == (a, b) || s.elements == (b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_lookup_is_order_independent() {
        let a = synergy_for_elements(ElementType::Fire, ElementType::Wind).unwrap();
        let b = synergy_for_elements(ElementType::Wind, ElementType::Fire).unwrap();
        assert_eq!(a.id, SynergyType::FireTornado);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_unpaired_elements_have_no_synergy() {
        assert!(synergy_for_elements(ElementType::Thunder, ElementType::Dark).is_none());
        assert!(synergy_for_elements(ElementType::Fire, ElementType::Fire).is_none());
    }

    #[test]
    fn test_every_synergy_multiplier_is_a_bonus() {
        for id in SynergyType::ALL {
            let def = get_synergy(id).unwrap();
            assert!(def.damage_multiplier > 1.0);
            assert_ne!(def.elements.0, def.elements.1);
        }
    }
}
