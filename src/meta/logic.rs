//! Persistent meta progression: currencies and upgrade purchases.
//!
//! Every mutation is written through to the preferences store right away.

use super::types::{MetaUpgrade, MetaUpgradeType};
use crate::actors::player::StatModifier;
use crate::progression::rewards::RunRewards;
use crate::utils::persistence::PrefsStore;
use tracing::{info, warn};

const TOTAL_GOLD_KEY: &str = "total_gold";
const MAGIC_STONES_KEY: &str = "magic_stones";

/// Run modifiers derived from purchased upgrades.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetaBonuses {
    pub max_hp: f64,
    /// Fractions, 0.05 = 5%.
    pub attack_percent: f64,
    pub cooldown_reduction: f64,
    pub move_speed: f64,
    pub xp_gain: f64,
    pub gold_gain: f64,
    pub elemental_damage: f64,
    pub pickup_range: f64,
}

impl MetaBonuses {
    pub fn modifiers(&self) -> Vec<StatModifier> {
        let all = [
            StatModifier::MaxHp(self.max_hp),
            StatModifier::AttackPercent(self.attack_percent),
            StatModifier::CooldownReduction(self.cooldown_reduction),
            StatModifier::MoveSpeed(self.move_speed),
            StatModifier::XpMultiplier(self.xp_gain),
            StatModifier::GoldMultiplier(self.gold_gain),
            StatModifier::ElementalDamage(self.elemental_damage),
            StatModifier::PickupRange(self.pickup_range),
        ];
        all.into_iter().filter(|m| !is_zero(m)).collect()
    }
}

fn is_zero(modifier: &StatModifier) -> bool {
    let value = match *modifier {
        StatModifier::MaxHp(v)
        | StatModifier::AttackPercent(v)
        | StatModifier::MoveSpeed(v)
        | StatModifier::CooldownReduction(v)
        | StatModifier::XpMultiplier(v)
        | StatModifier::GoldMultiplier(v)
        | StatModifier::PickupRange(v)
        | StatModifier::ElementalDamage(v) => v,
    };
    value == 0.0
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaProgression {
    upgrades: Vec<MetaUpgrade>,
    total_gold: u64,
    magic_stones: u64,
    store: PrefsStore,
}

impl MetaProgression {
    /// Reads currencies and upgrade levels from `store`. Missing keys
    /// start at zero; stored levels are clamped to the max level.
    pub fn load(store: PrefsStore) -> Self {
        let upgrades = MetaUpgradeType::ALL
            .into_iter()
            .map(|t| {
                let mut upgrade = MetaUpgrade::new(t);
                let stored = store.get_or(&t.pref_key(), 0);
                upgrade.level = stored.min(upgrade.max_level as u64) as u32;
                upgrade
            })
            .collect();
        Self {
            upgrades,
            total_gold: store.get_or(TOTAL_GOLD_KEY, 0),
            magic_stones: store.get_or(MAGIC_STONES_KEY, 0),
            store,
        }
    }

    pub fn in_memory() -> Self {
        Self::load(PrefsStore::in_memory())
    }

    pub fn total_gold(&self) -> u64 {
        self.total_gold
    }

    pub fn magic_stones(&self) -> u64 {
        self.magic_stones
    }

    pub fn upgrades(&self) -> &[MetaUpgrade] {
        &self.upgrades
    }

    pub fn upgrade(&self, upgrade_type: MetaUpgradeType) -> Option<&MetaUpgrade> {
        self.upgrades.iter().find(|u| u.upgrade_type == upgrade_type)
    }

    pub fn can_purchase(&self, upgrade_type: MetaUpgradeType) -> bool {
        self.upgrade(upgrade_type)
            .is_some_and(|u| !u.is_maxed() && self.total_gold >= u.cost_for_next_level())
    }

    /// Buys the next level with gold. Returns false when maxed or unaffordable.
    pub fn purchase(&mut self, upgrade_type: MetaUpgradeType) -> bool {
        let gold = self.total_gold;
        let Some(upgrade) = self
            .upgrades
            .iter_mut()
            .find(|u| u.upgrade_type == upgrade_type)
        else {
            return false;
        };
        if upgrade.is_maxed() {
            return false;
        }
        let cost = upgrade.cost_for_next_level();
        if gold < cost {
            return false;
        }

        upgrade.level += 1;
        let level = upgrade.level;
        self.total_gold -= cost;
        info!(
            upgrade = upgrade_type.name(),
            level,
            cost,
            gold_left = self.total_gold,
            "meta upgrade purchased"
        );
        self.persist();
        true
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.total_gold = self.total_gold.saturating_add(amount);
        self.persist();
    }

    pub fn add_magic_stones(&mut self, amount: u64) {
        self.magic_stones = self.magic_stones.saturating_add(amount);
        self.persist();
    }

    /// Credits a finished run's rewards with a single write.
    pub fn bank_rewards(&mut self, rewards: &RunRewards) {
        self.total_gold = self.total_gold.saturating_add(rewards.total_gold());
        self.magic_stones = self.magic_stones.saturating_add(rewards.magic_stones);
        info!(
            gold = rewards.total_gold(),
            magic_stones = rewards.magic_stones,
            "run rewards banked"
        );
        self.persist();
    }

    pub fn bonuses(&self) -> MetaBonuses {
        let value = |t: MetaUpgradeType| self.upgrade(t).map(|u| u.current_value()).unwrap_or(0.0);
        MetaBonuses {
            max_hp: value(MetaUpgradeType::MaxHp),
            attack_percent: value(MetaUpgradeType::AttackPower) / 100.0,
            cooldown_reduction: value(MetaUpgradeType::CooldownReduction) / 100.0,
            move_speed: value(MetaUpgradeType::MovementSpeed),
            xp_gain: value(MetaUpgradeType::XpGain) / 100.0,
            gold_gain: value(MetaUpgradeType::GoldGain) / 100.0,
            elemental_damage: value(MetaUpgradeType::ElementalDamage) / 100.0,
            pickup_range: value(MetaUpgradeType::PickupRange),
        }
    }

    fn persist(&mut self) {
        self.store.set(TOTAL_GOLD_KEY, self.total_gold);
        self.store.set(MAGIC_STONES_KEY, self.magic_stones);
        for upgrade in &self.upgrades {
            self.store
                .set(&upgrade.upgrade_type.pref_key(), upgrade.level as u64);
        }
        if let Err(e) = self.store.save() {
            warn!(error = %e, "failed to save meta progression");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // =========================================================================
    // Purchases
    // =========================================================================

    #[test]
    fn test_purchase_without_gold_fails() {
        let mut meta = MetaProgression::in_memory();
        assert!(!meta.can_purchase(MetaUpgradeType::MaxHp));
        assert!(!meta.purchase(MetaUpgradeType::MaxHp));
        assert_eq!(meta.upgrade(MetaUpgradeType::MaxHp).unwrap().level, 0);
    }

    #[test]
    fn test_purchase_debits_cost() {
        let mut meta = MetaProgression::in_memory();
        meta.add_gold(260);
        assert!(meta.purchase(MetaUpgradeType::AttackPower));
        assert_eq!(meta.total_gold(), 160);
        assert!(meta.purchase(MetaUpgradeType::AttackPower));
        assert_eq!(meta.total_gold(), 10);
        assert!(!meta.purchase(MetaUpgradeType::AttackPower));
        assert_eq!(meta.upgrade(MetaUpgradeType::AttackPower).unwrap().level, 2);
    }

    #[test]
    fn test_exact_gold_allows_purchase() {
        let mut meta = MetaProgression::in_memory();
        meta.add_gold(100);
        assert!(meta.purchase(MetaUpgradeType::PickupRange));
        assert_eq!(meta.total_gold(), 0);
    }

    #[test]
    fn test_max_level_blocks_purchase() {
        let mut meta = MetaProgression::in_memory();
        meta.add_gold(1_000_000);
        for _ in 0..10 {
            assert!(meta.purchase(MetaUpgradeType::XpGain));
        }
        let gold = meta.total_gold();
        assert!(!meta.purchase(MetaUpgradeType::XpGain));
        assert_eq!(meta.total_gold(), gold);
    }

    // =========================================================================
    // Bonuses
    // =========================================================================

    #[test]
    fn test_bonuses_from_levels() {
        let mut meta = MetaProgression::in_memory();
        meta.add_gold(10_000);
        meta.purchase(MetaUpgradeType::MaxHp);
        meta.purchase(MetaUpgradeType::MaxHp);
        meta.purchase(MetaUpgradeType::AttackPower);
        meta.purchase(MetaUpgradeType::CooldownReduction);
        let bonuses = meta.bonuses();
        assert_eq!(bonuses.max_hp, 20.0);
        assert!((bonuses.attack_percent - 0.05).abs() < 1e-9);
        assert!((bonuses.cooldown_reduction - 0.02).abs() < 1e-9);
        assert_eq!(bonuses.gold_gain, 0.0);
        assert_eq!(bonuses.modifiers().len(), 3);
    }

    #[test]
    fn test_no_upgrades_no_modifiers() {
        assert!(MetaProgression::in_memory().bonuses().modifiers().is_empty());
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    #[test]
    fn test_state_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");

        let mut meta = MetaProgression::load(PrefsStore::open(path.clone()));
        meta.add_gold(500);
        meta.add_magic_stones(4);
        assert!(meta.purchase(MetaUpgradeType::GoldGain));

        let reloaded = MetaProgression::load(PrefsStore::open(path));
        assert_eq!(reloaded.total_gold(), 400);
        assert_eq!(reloaded.magic_stones(), 4);
        assert_eq!(reloaded.upgrade(MetaUpgradeType::GoldGain).unwrap().level, 1);
    }

    #[test]
    fn test_bank_rewards() {
        let mut meta = MetaProgression::in_memory();
        meta.bank_rewards(&RunRewards {
            drop_gold: 40,
            bonus_gold: 60,
            magic_stones: 2,
        });
        assert_eq!(meta.total_gold(), 100);
        assert_eq!(meta.magic_stones(), 2);
    }

    #[test]
    fn test_stored_level_is_clamped() {
        let mut store = PrefsStore::in_memory();
        store.set(&MetaUpgradeType::MaxHp.pref_key(), 99);
        let meta = MetaProgression::load(store);
        assert_eq!(meta.upgrade(MetaUpgradeType::MaxHp).unwrap().level, 10);
    }
}
