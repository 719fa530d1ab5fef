//! Shared damage math for the game loop and the simulator.
//!
//! Outgoing skill damage is
//! `skill damage * attack multiplier * element multiplier`, where the
//! element multiplier combines active synergies for that element, the
//! elemental damage meta bonus and the character passive.

use crate::actors::player::PlayerState;
use crate::data::characters::Passive;
use crate::data::elements::ElementType;
use crate::skills::CastModifiers;
use crate::synergy::SynergyEvaluator;

/// Damage factor from a character passive for skills of `element`.
pub fn passive_damage_multiplier(passive: &Passive, element: ElementType) -> f64 {
    match *passive {
        Passive::ElementDamage {
            element: boosted,
            bonus,
        } if boosted == element => 1.0 + bonus,
        _ => 1.0,
    }
}

pub fn element_damage_multiplier(
    player: &PlayerState,
    synergies: &SynergyEvaluator,
    element: ElementType,
) -> f64 {
    synergies.damage_multiplier_for(element)
        * (1.0 + player.stats.elemental_damage)
        * passive_damage_multiplier(&player.passive, element)
}

/// Slow applied by hits when the passive grants one.
pub fn slow_on_hit(passive: &Passive) -> Option<(ElementType, f64, f64)> {
    match *passive {
        Passive::SlowOnHit {
            element,
            factor,
            duration,
        } => Some((element, factor, duration)),
        _ => None,
    }
}

/// Snapshot of every multiplier a cast needs this tick.
pub fn cast_modifiers(player: &PlayerState, synergies: &SynergyEvaluator) -> CastModifiers {
    let mut element_multipliers = [1.0; 6];
    for element in ElementType::ALL {
        element_multipliers[element.index()] =
            element_damage_multiplier(player, synergies, element);
    }
    CastModifiers {
        attack_multiplier: player.stats.attack_multiplier(),
        cooldown_multiplier: player.stats.cooldown_multiplier(),
        element_multipliers,
        slow_on_hit: slow_on_hit(&player.passive),
    }
}
