//! Integration tests for in-run progression: the XP ledger, skill loadout,
//! synergies and evolutions.

use magic_survivors::data::elements::ElementType;
use magic_survivors::data::evolutions::{get_evolution, EvolutionType};
use magic_survivors::data::skills::SkillType;
use magic_survivors::data::synergies::SynergyType;
use magic_survivors::data::xp_table::{max_level, xp_required_for_level};
use magic_survivors::progression::{generate_level_up_choices, ProgressionLedger};
use magic_survivors::skills::{SkillChange, SkillLoadout};
use magic_survivors::synergy::SynergyEvaluator;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn test_xp_invariant_holds_for_any_grant_sequence() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut ledger = ProgressionLedger::new(1.0, 1.0);
    for _ in 0..2_000 {
        let amount = rng.gen_range(0..300);
        let before = ledger.level;
        let gained = ledger.add_xp(amount);

        assert!(ledger.level <= max_level());
        assert!(ledger.xp < xp_required_for_level(ledger.level));
        assert_eq!(gained.len() as u32, ledger.level - before);
    }
    assert_eq!(ledger.level, max_level());
}

#[test]
fn test_xp_multiplier_scales_grants() {
    let mut ledger = ProgressionLedger::new(1.5, 1.0);
    ledger.add_xp(4);
    assert_eq!(ledger.total_xp, 6);
}

#[test]
fn test_one_grant_can_cross_several_levels() {
    let mut ledger = ProgressionLedger::default();
    let gained = ledger.add_xp(80);
    // 10 + 25 + 45 = 80
    assert_eq!(gained, vec![2, 3, 4]);
    assert_eq!(ledger.xp, 0);
}

#[test]
fn test_synergy_activation_is_monotonic_and_idempotent() {
    let mut loadout = SkillLoadout::default();
    let mut synergies = SynergyEvaluator::default();
    let mut seen: Vec<SynergyType> = Vec::new();

    let sequence = [
        SkillType::Firebolt,
        SkillType::IceShot,
        SkillType::Firebolt,
        SkillType::IceShot,
        SkillType::Firebolt,
        SkillType::IceShot,
        SkillType::LightningChain,
        SkillType::ThunderSpear,
        SkillType::LightningChain,
    ];
    for skill in sequence {
        loadout.acquire(skill);
        let activated = synergies.on_skill_changed(&loadout);
        for synergy in &activated {
            assert!(!seen.contains(synergy));
        }
        seen.extend(activated);
        assert_eq!(synergies.active(), seen.as_slice());

        assert!(synergies.on_skill_changed(&loadout).is_empty());
    }

    assert!(synergies.is_active(SynergyType::SteamExplosion));
    assert!(synergies.is_active(SynergyType::ExplosiveThunder));
    assert!(synergies.is_active(SynergyType::Superconductor));
    assert!(synergies.damage_multiplier() > 1.0);
}

#[test]
fn test_synergy_damage_only_boosts_its_elements() {
    let mut loadout = SkillLoadout::default();
    for _ in 0..3 {
        loadout.acquire(SkillType::Firebolt);
        loadout.acquire(SkillType::IceShot);
    }
    let mut synergies = SynergyEvaluator::default();
    synergies.on_skill_changed(&loadout);

    assert!(synergies.damage_multiplier_for(ElementType::Fire) > 1.0);
    assert!(synergies.damage_multiplier_for(ElementType::Ice) > 1.0);
    assert_eq!(synergies.damage_multiplier_for(ElementType::Dark), 1.0);
}

#[test]
fn test_loadout_slots_and_levels() {
    let mut loadout = SkillLoadout::new(2);
    assert_eq!(
        loadout.acquire(SkillType::Firebolt),
        SkillChange::Acquired {
            skill: SkillType::Firebolt
        }
    );
    loadout.acquire(SkillType::IceShot);
    assert_eq!(
        loadout.acquire(SkillType::DarkBolt),
        SkillChange::SlotsFull {
            skill: SkillType::DarkBolt
        }
    );
    for _ in 0..10 {
        loadout.acquire(SkillType::Firebolt);
    }
    assert_eq!(loadout.get(SkillType::Firebolt).unwrap().level(), 5);
    assert_eq!(
        loadout.acquire(SkillType::Firebolt),
        SkillChange::AlreadyMaxed {
            skill: SkillType::Firebolt
        }
    );

    // Full loadout only offers upgrades to owned skills
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let choices = generate_level_up_choices(&loadout, 3, &mut rng);
    assert_eq!(choices, vec![SkillType::IceShot]);
}

#[test]
fn test_prime_evolution_covers_whole_element() {
    let mut loadout = SkillLoadout::default();
    loadout.acquire(SkillType::Firebolt);
    loadout.acquire(SkillType::FlameNova);
    loadout.acquire(SkillType::IceShot);

    let prime_fire = get_evolution(EvolutionType::PrimeFire).unwrap();
    assert!(loadout.can_evolve(prime_fire));
    let evolved = loadout.apply_evolution(prime_fire);
    assert_eq!(evolved, vec![SkillType::Firebolt, SkillType::FlameNova]);

    // A skill takes at most one evolution
    let lance = get_evolution(EvolutionType::FireLance).unwrap();
    assert!(!loadout.can_evolve(lance));
    assert!(loadout.apply_evolution(lance).is_empty());
}

#[test]
fn test_evolution_changes_projectile_shape() {
    let mut loadout = SkillLoadout::default();
    loadout.acquire(SkillType::IceShot);
    let before = loadout.get(SkillType::IceShot).unwrap().projectile_count();

    loadout.apply_evolution(get_evolution(EvolutionType::IceNeedle).unwrap());
    let after = loadout.get(SkillType::IceShot).unwrap();
    assert!(after.is_evolved());
    assert_eq!(after.projectile_count(), before + 2);
}
