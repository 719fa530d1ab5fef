//! Level-up and evolution card offers.

use crate::data::evolutions::{EvolutionType, ALL_EVOLUTIONS};
use crate::data::skills::SkillType;
use crate::skills::SkillLoadout;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A pending choice that pauses the run until resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PendingChoice {
    LevelUp {
        level: u32,
        choices: Vec<SkillType>,
    },
    Evolution {
        gate: u8,
        choices: Vec<EvolutionType>,
    },
}

/// Up to `count` distinct skills the loadout can take: owned skills below
/// max level, plus unowned skills while a slot is free.
pub fn generate_level_up_choices(
    loadout: &SkillLoadout,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<SkillType> {
    let candidates = loadout.upgrade_candidates();
    candidates.choose_multiple(rng, count).copied().collect()
}

/// Up to `count` evolutions that would change at least one owned skill.
pub fn generate_evolution_choices(
    loadout: &SkillLoadout,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<EvolutionType> {
    let candidates: Vec<EvolutionType> = ALL_EVOLUTIONS
        .iter()
        .filter(|def| loadout.can_evolve(def))
        .map(|def| def.id)
        .collect();
    candidates.choose_multiple(rng, count).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_level_up_choices_are_distinct() {
        let mut loadout = SkillLoadout::default();
        loadout.acquire(SkillType::Firebolt);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let choices = generate_level_up_choices(&loadout, 3, &mut rng);
            assert_eq!(choices.len(), 3);
            let mut deduped = choices.clone();
            deduped.sort_by_key(|s| *s as u8);
            deduped.dedup();
            assert_eq!(deduped.len(), 3);
        }
    }

    #[test]
    fn test_full_loadout_only_offers_owned_skills() {
        let mut loadout = SkillLoadout::new(2);
        loadout.acquire(SkillType::Firebolt);
        loadout.acquire(SkillType::IceShot);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut choices = generate_level_up_choices(&loadout, 3, &mut rng);
        choices.sort_by_key(|s| *s as u8);
        assert_eq!(choices, vec![SkillType::Firebolt, SkillType::IceShot]);
    }

    #[test]
    fn test_everything_maxed_offers_nothing() {
        let mut loadout = SkillLoadout::new(1);
        for _ in 0..5 {
            loadout.acquire(SkillType::Firebolt);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(generate_level_up_choices(&loadout, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_evolution_choices_match_loadout() {
        let mut loadout = SkillLoadout::default();
        loadout.acquire(SkillType::Firebolt);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut choices = generate_evolution_choices(&loadout, 3, &mut rng);
        choices.sort_by_key(|e| *e as u8);
        assert_eq!(choices, vec![EvolutionType::FireLance, EvolutionType::PrimeFire]);
    }

    #[test]
    fn test_no_evolutions_without_matching_skills() {
        let mut loadout = SkillLoadout::default();
        loadout.acquire(SkillType::Tornado);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        // Prime Wind applies to every Wind skill, Tornado included
        assert_eq!(
            generate_evolution_choices(&loadout, 3, &mut rng),
            vec![EvolutionType::PrimeWind]
        );
    }
}
