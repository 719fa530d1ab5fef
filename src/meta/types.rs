//! Meta upgrade definitions.

use crate::core::constants::{
    META_UPGRADE_BASE_COST, META_UPGRADE_COST_MULTIPLIER, META_UPGRADE_MAX_LEVEL,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetaUpgradeType {
    MaxHp,
    AttackPower,
    CooldownReduction,
    MovementSpeed,
    XpGain,
    GoldGain,
    ElementalDamage,
    PickupRange,
}

impl MetaUpgradeType {
    pub const ALL: [MetaUpgradeType; 8] = [
        MetaUpgradeType::MaxHp,
        MetaUpgradeType::AttackPower,
        MetaUpgradeType::CooldownReduction,
        MetaUpgradeType::MovementSpeed,
        MetaUpgradeType::XpGain,
        MetaUpgradeType::GoldGain,
        MetaUpgradeType::ElementalDamage,
        MetaUpgradeType::PickupRange,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetaUpgradeType::MaxHp => "Max HP",
            MetaUpgradeType::AttackPower => "Attack Power",
            MetaUpgradeType::CooldownReduction => "Cooldown Reduction",
            MetaUpgradeType::MovementSpeed => "Movement Speed",
            MetaUpgradeType::XpGain => "XP Gain",
            MetaUpgradeType::GoldGain => "Gold Gain",
            MetaUpgradeType::ElementalDamage => "Elemental Damage",
            MetaUpgradeType::PickupRange => "Pickup Range",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MetaUpgradeType::MaxHp => "Increase maximum health",
            MetaUpgradeType::AttackPower => "Increase damage dealt",
            MetaUpgradeType::CooldownReduction => "Reduce skill cooldowns",
            MetaUpgradeType::MovementSpeed => "Increase movement speed",
            MetaUpgradeType::XpGain => "Increase XP gained",
            MetaUpgradeType::GoldGain => "Increase gold gained",
            MetaUpgradeType::ElementalDamage => "Increase elemental damage",
            MetaUpgradeType::PickupRange => "Increase XP pickup range",
        }
    }

    /// Bonus granted per purchased level. Percent values for the
    /// percentage upgrades, flat values otherwise.
    pub fn value_per_level(&self) -> f64 {
        match self {
            MetaUpgradeType::MaxHp => 10.0,
            MetaUpgradeType::AttackPower => 5.0,
            MetaUpgradeType::CooldownReduction => 2.0,
            MetaUpgradeType::MovementSpeed => 0.5,
            MetaUpgradeType::XpGain => 5.0,
            MetaUpgradeType::GoldGain => 5.0,
            MetaUpgradeType::ElementalDamage => 3.0,
            MetaUpgradeType::PickupRange => 0.5,
        }
    }

    /// Whether `value_per_level` is a percentage.
    pub fn is_percent(&self) -> bool {
        !matches!(
            self,
            MetaUpgradeType::MaxHp | MetaUpgradeType::MovementSpeed | MetaUpgradeType::PickupRange
        )
    }

    /// Key in the preferences store.
    pub fn pref_key(&self) -> String {
        format!("meta_upgrade.{:?}", self)
    }

    /// Case-insensitive lookup by display name or identifier, ignoring
    /// spaces, dashes and underscores.
    pub fn from_name(name: &str) -> Option<MetaUpgradeType> {
        let wanted: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();
        Self::ALL.into_iter().find(|t| {
            let display: String = t.name().chars().filter(|c| !c.is_whitespace()).collect();
            display.eq_ignore_ascii_case(&wanted) || format!("{:?}", t).eq_ignore_ascii_case(&wanted)
        })
    }
}

/// One upgrade track with its purchased level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetaUpgrade {
    pub upgrade_type: MetaUpgradeType,
    pub level: u32,
    pub max_level: u32,
    pub base_cost: u32,
    pub cost_multiplier: f64,
}

impl MetaUpgrade {
    pub fn new(upgrade_type: MetaUpgradeType) -> Self {
        Self {
            upgrade_type,
            level: 0,
            max_level: META_UPGRADE_MAX_LEVEL,
            base_cost: META_UPGRADE_BASE_COST,
            cost_multiplier: META_UPGRADE_COST_MULTIPLIER,
        }
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }

    /// round(base_cost * multiplier^level)
    pub fn cost_for_next_level(&self) -> u64 {
        let cost = self.base_cost as f64 * self.cost_multiplier.powi(self.level as i32);
        cost.round() as u64
    }

    pub fn current_value(&self) -> f64 {
        self.upgrade_type.value_per_level() * self.level as f64
    }
}
