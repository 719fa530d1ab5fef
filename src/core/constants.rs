// Run timing (seconds)
pub const GAME_DURATION: f64 = 1200.0;
pub const STAGE_1_DURATION: f64 = 600.0;
pub const MINIBOSS_1_TIME: f64 = 300.0;
pub const MINIBOSS_2_TIME: f64 = 600.0;
pub const MINIBOSS_3_TIME: f64 = 900.0;
pub const FINAL_BOSS_TIME: f64 = 1200.0;

// Fixed simulation step used by the headless runner
pub const TICK_INTERVAL_MS: u64 = 100;

// Skills and level-up
pub const MAX_SKILL_SLOTS: usize = 6;
pub const LEVEL_UP_CARD_COUNT: usize = 3;
pub const MAX_SKILL_LEVEL: u32 = 5;
pub const EVOLUTION_CARD_COUNT: usize = 3;

// Area effects pulse on a fixed interval and deal damage * interval per pulse
pub const AREA_DAMAGE_INTERVAL: f64 = 0.5;

// Player defaults
pub const XP_PICKUP_RANGE_BASE: f64 = 3.0;
pub const XP_PICKUP_RANGE_MAX: f64 = 5.0;
pub const PLAYER_BASE_MOVE_SPEED: f64 = 4.5;
pub const PLAYER_BASE_ATTACK: f64 = 10.0;

// XP orbs
pub const XP_ORB_ATTRACT_SPEED: f64 = 5.0;
pub const XP_ORB_COLLECT_DISTANCE: f64 = 0.5;
// Orbs outside pickup range drift in at this fraction of player move speed
pub const XP_ORB_SWEEP_FACTOR: f64 = 0.25;

// Chasing enemies close in more slowly on a faster player
pub const MIN_PURSUIT_FACTOR: f64 = 0.5;

// Synergies
pub const SYNERGY_REQUIRED_LEVEL: u32 = 3;

// Meta progression
pub const META_UPGRADE_MAX_LEVEL: u32 = 10;
pub const META_UPGRADE_BASE_COST: u32 = 100;
pub const META_UPGRADE_COST_MULTIPLIER: f64 = 1.5;

// Spawning
pub const BASE_SPAWN_INTERVAL: f64 = 2.0;
pub const MAX_ENEMY_COUNT: usize = 50;
pub const ELITE_SPAWN_CHANCE: f64 = 0.1;
pub const SPAWN_DISTANCE_MIN: f64 = 10.0;
pub const SPAWN_DISTANCE_MAX: f64 = 15.0;
pub const SPAWN_DENSITY_START: f64 = 1.0;
pub const SPAWN_DENSITY_END: f64 = 2.5;

// Character passives
pub const FIRE_MAGE_FIRE_DAMAGE_BONUS: f64 = 0.10;
pub const FROST_WITCH_SLOW_FACTOR: f64 = 0.8;
pub const FROST_WITCH_SLOW_DURATION: f64 = 2.0;
pub const HOLY_ADEPT_REGEN_PER_SECOND: f64 = 1.0;

// End-of-run rewards
pub const GOLD_PER_KILL: u64 = 2;
pub const GOLD_PER_MINIBOSS: u64 = 50;
pub const GOLD_VICTORY_BONUS: u64 = 200;
pub const MAGIC_STONES_PER_MINIBOSS: u64 = 1;
pub const MAGIC_STONES_VICTORY_BONUS: u64 = 5;

// Persistence
pub const RUN_HISTORY_CAPACITY: usize = 50;
pub const PREFS_FILE_NAME: &str = "prefs.json";
pub const HISTORY_FILE_NAME: &str = "history.json";
