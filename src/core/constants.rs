// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 666;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 5;
pub const GLOBAL_COOLDOWN_MS: i64 = 2_000;

// Stamina bank, in tick-units (42 hours)
pub const MAX_STAMINA: f64 = 151_200.0;
pub const STAMINA_DRAIN_PER_TICK: f64 = 1.0;
pub const STAMINA_REGEN_PER_TICK: f64 = 0.5;
pub const STAMINA_XP_BONUS: f64 = 1.5;

// Training
pub const TRAINING_EFFORT_PER_TICK: f64 = 10.0;
pub const COMBAT_WEAPON_EFFORT: f64 = 1.0;
pub const COMBAT_DEFENSE_EFFORT: f64 = 1.0;
pub const MIN_SKILL_LEVEL: u32 = 10;

// Combat formulas
pub const UNARMED_ATTACK: u32 = 1;
pub const FIST_ATTACK_FACTOR: f64 = 0.08;
pub const MELEE_ATTACK_FACTOR: f64 = 0.07;
pub const DISTANCE_ATTACK_FACTOR: f64 = 0.06;
pub const LEVEL_DAMAGE_DIVISOR: f64 = 5.0;
/// `(mana cost below, multiplier)` tiers for attack spells.
pub const SPELL_DAMAGE_TIERS: [(u32, f64); 2] = [(50, 2.0), (200, 4.0)];
pub const SPELL_DAMAGE_TOP_MULTIPLIER: f64 = 7.0;
pub const ARMOR_FLOOR_RATIO: f64 = 0.3;
pub const ARMOR_VARIABLE_RATIO: f64 = 0.7;
pub const SHIELD_SKILL_FACTOR: f64 = 0.05;
pub const WEAPON_PARRY_RATIO: f64 = 0.1;
/// Magic training points granted per point of mana spent.
pub const MAGIC_EFFORT_PER_MANA: f64 = 1.0;

// Hunting groups ("lures")
pub const MAX_GROUP_SIZE: u32 = 8;
pub const GROUP_DIFFICULTY_PER_EXTRA: f64 = 0.08;

// Death penalties
pub const DEATH_XP_LOSS: f64 = 0.10;
pub const DEATH_GOLD_LOSS_MIN: f64 = 0.10;
pub const DEATH_GOLD_LOSS_MAX: f64 = 0.25;
pub const DEATH_SKILL_LOSS_PROGRESS: f64 = 10.0;
pub const BLESSING_PENALTY_SCALE: f64 = 0.05;
pub const BLESSING_BASE_PRICE: u64 = 2_000;
pub const BLESSING_PRICE_PER_LEVEL: u64 = 200;

// Vocation choice
pub const VOCATION_MIN_LEVEL: u32 = 8;

// Offline catch-up
pub const OFFLINE_MIN_SECONDS: i64 = 60;
pub const OFFLINE_HUNT_CAP_SECONDS: i64 = 4 * 60 * 60;
pub const OFFLINE_TRAINING_CAP_SECONDS: i64 = 12 * 60 * 60;
pub const OFFLINE_SECONDS_PER_KILL: i64 = 10;
pub const OFFLINE_GROUP_PENALTY_PER_EXTRA: f64 = 0.1;
pub const OFFLINE_MIN_EFFICIENCY: f64 = 0.1;

// Hunting tasks
pub const TASK_OPTION_COUNT: usize = 3;
pub const TASK_LEVEL_BAND: u32 = 30;
pub const TASK_FALLBACK_POOL: usize = 5;
pub const TASK_BASE_KILLS: u32 = 100;
pub const TASK_KILLS_PER_LEVEL: u32 = 2;
pub const TASK_MIN_KILLS: u32 = 50;
pub const TASK_MAX_KILLS: u32 = 500;
pub const TASK_PAYOUT_RATIO: f64 = 0.6;
pub const TASK_REROLL_GOLD_PER_LEVEL: u64 = 50;

// Event sink
pub const EVENT_LOG_CAPACITY: usize = 40;
pub const HIT_EVENT_TTL_MS: i64 = 1_000;

// Persistence
pub const SAVE_FILE_VERSION: u32 = 2;
pub const SAVE_VERSION_MAGIC: u64 = 0x4944_4C45_4855_4E54; // "IDLEHUNT"
pub const CHARACTER_NAME_MAX_LENGTH: usize = 20;
