//! Enemy definitions table.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyType {
    Goblin,
    Slime,
    SkeletonArcher,
    EliteGoblin,
    EliteSkeleton,
    FlameOgre,
    WindHarpy,
    IceGolem,
    AncientDragon,
}

impl EnemyType {
    pub const ALL: [EnemyType; 9] = [
        EnemyType::Goblin,
        EnemyType::Slime,
        EnemyType::SkeletonArcher,
        EnemyType::EliteGoblin,
        EnemyType::EliteSkeleton,
        EnemyType::FlameOgre,
        EnemyType::WindHarpy,
        EnemyType::IceGolem,
        EnemyType::AncientDragon,
    ];

    pub fn name(&self) -> &'static str {
        get_enemy(*self).map(|e| e.name).unwrap_or("Unknown Enemy")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTier {
    Normal,
    Elite,
    MiniBoss,
    Boss,
}

/// Per-instance combat stats, copied from the definition on spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub max_hp: f64,
    pub attack_damage: f64,
    pub move_speed: f64,
    pub detection_range: f64,
    pub attack_range: f64,
    pub attack_cooldown: f64,
    pub xp_drop: u32,
    pub gold_drop: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyDefinition {
    pub id: EnemyType,
    pub name: &'static str,
    pub description: &'static str,
    pub tier: EnemyTier,
    pub stats: EnemyStats,
}

#[allow(clippy::too_many_arguments)]
const fn stats(
    max_hp: f64,
    attack_damage: f64,
    move_speed: f64,
    detection_range: f64,
    attack_range: f64,
    attack_cooldown: f64,
    xp_drop: u32,
    gold_drop: u32,
) -> EnemyStats {
    EnemyStats {
        max_hp,
        attack_damage,
        move_speed,
        detection_range,
        attack_range,
        attack_cooldown,
        xp_drop,
        gold_drop,
    }
}

pub static ALL_ENEMIES: [EnemyDefinition; 9] = [
    EnemyDefinition {
        id: EnemyType::Goblin,
        name: "Goblin",
        description: "Weak melee enemy",
        tier: EnemyTier::Normal,
        stats: stats(30.0, 5.0, 2.0, 15.0, 1.0, 1.0, 5, 2),
    },
    EnemyDefinition {
        id: EnemyType::Slime,
        name: "Slime",
        description: "Slow but tanky enemy",
        tier: EnemyTier::Normal,
        stats: stats(50.0, 3.0, 1.5, 12.0, 1.0, 1.5, 4, 1),
    },
    EnemyDefinition {
        id: EnemyType::SkeletonArcher,
        name: "Skeleton Archer",
        description: "Ranged enemy that keeps distance",
        tier: EnemyTier::Normal,
        stats: stats(25.0, 8.0, 2.5, 20.0, 10.0, 2.0, 6, 3),
    },
    EnemyDefinition {
        id: EnemyType::EliteGoblin,
        name: "Elite Goblin",
        description: "Stronger goblin variant",
        tier: EnemyTier::Elite,
        stats: stats(80.0, 12.0, 2.5, 18.0, 1.5, 0.8, 15, 8),
    },
    EnemyDefinition {
        id: EnemyType::EliteSkeleton,
        name: "Elite Skeleton",
        description: "Powerful skeleton warrior",
        tier: EnemyTier::Elite,
        stats: stats(100.0, 15.0, 3.0, 20.0, 2.0, 1.2, 20, 10),
    },
    EnemyDefinition {
        id: EnemyType::FlameOgre,
        name: "Flame Ogre",
        description: "Mini-boss at 5 minutes",
        tier: EnemyTier::MiniBoss,
        stats: stats(500.0, 25.0, 2.0, 25.0, 3.0, 2.0, 100, 50),
    },
    EnemyDefinition {
        id: EnemyType::WindHarpy,
        name: "Wind Harpy",
        description: "Mini-boss at 10 minutes",
        tier: EnemyTier::MiniBoss,
        stats: stats(800.0, 30.0, 3.5, 30.0, 8.0, 1.5, 150, 75),
    },
    EnemyDefinition {
        id: EnemyType::IceGolem,
        name: "Ice Golem",
        description: "Mini-boss at 15 minutes",
        tier: EnemyTier::MiniBoss,
        stats: stats(1200.0, 35.0, 1.5, 25.0, 4.0, 2.5, 200, 100),
    },
    EnemyDefinition {
        id: EnemyType::AncientDragon,
        name: "Ancient Dragon",
        description: "Final boss at 20 minutes",
        tier: EnemyTier::Boss,
        stats: stats(3000.0, 50.0, 2.5, 40.0, 6.0, 3.0, 500, 300),
    },
];

pub fn get_enemy(id: EnemyType) -> Option<&'static EnemyDefinition> {
    ALL_ENEMIES.iter().find(|e| e.id == id)
}

pub fn enemies_of_tier(tier: EnemyTier) -> impl Iterator<Item = &'static EnemyDefinition> {
    ALL_ENEMIES.iter().filter(move |e| e.tier == tier)
}

pub fn normal_enemies() -> impl Iterator<Item = &'static EnemyDefinition> {
    enemies_of_tier(EnemyTier::Normal)
}

pub fn elite_enemies() -> impl Iterator<Item = &'static EnemyDefinition> {
    enemies_of_tier(EnemyTier::Elite)
}

pub fn mini_bosses() -> impl Iterator<Item = &'static EnemyDefinition> {
    enemies_of_tier(EnemyTier::MiniBoss)
}

/// Mini-boss spawned at gate `index` (1-based). `None` outside 1..=3.
pub fn mini_boss_for_gate(index: u8) -> Option<&'static EnemyDefinition> {
    let id = match index {
        1 => EnemyType::FlameOgre,
        2 => EnemyType::WindHarpy,
        3 => EnemyType::IceGolem,
        _ => return None,
    };
    get_enemy(id)
}

pub fn final_boss() -> Option<&'static EnemyDefinition> {
    get_enemy(EnemyType::AncientDragon)
}
