// Single source of truth for all default values.

// --- Ring / residency ---
pub const DEFAULT_MRT_MIN_SECS: u64 = 3_600; // 1 hour
pub const DEFAULT_MRT_MAX_BYPASS: u8 = 10;

// --- Streaming statistics ---
pub const DEFAULT_ALPHA_FAST_BPS: u32 = 2_000;
pub const DEFAULT_ALPHA_SLOW_BPS: u32 = 500;
pub const DEFAULT_ALPHA_VOLATILITY_BPS: u32 = 1_000;
pub const DEFAULT_ALPHA_ARRIVAL_BPS: u32 = 1_000;
pub const DEFAULT_BURST_ALPHA_UP_BPS: u32 = 3_000;
pub const DEFAULT_BURST_DECAY_PCT: u8 = 90;
pub const DEFAULT_NEG_SCORE_THRESHOLD: u8 = 30;
pub const DEFAULT_NEG_ALPHA_UP_BPS: u32 = 3_000;
pub const DEFAULT_LOYALTY_MIN_DELTA_SECS: u64 = 86_400; // 1 day
pub const DEFAULT_LOYALTY_STEP: u8 = 1;

// --- Confidence / quality ---
pub const DEFAULT_COLD_START_MIN_SAMPLES: u32 = 5;
pub const DEFAULT_COLD_START_STEP: u8 = 4;
pub const DEFAULT_COLD_START_FLOOR: u8 = 20;
pub const DEFAULT_PER_FEEDBACK: u8 = 2;
pub const DEFAULT_CONFIDENCE_CEILING: u8 = 70;
pub const DEFAULT_UNIQUENESS_BONUS_MAX: u8 = 15;
pub const DEFAULT_EPOCH_BONUS: u8 = 2;
pub const DEFAULT_EPOCH_BONUS_MAX: u8 = 10;
pub const DEFAULT_LOYALTY_DIVISOR: u8 = 2;
pub const DEFAULT_LOYALTY_BONUS_MAX: u8 = 5;
pub const DEFAULT_QUALITY_FAST_WEIGHT_PCT: u8 = 40;

// --- Risk ---
pub const DEFAULT_SYBIL_WEIGHT: u8 = 30;
pub const DEFAULT_BURST_WEIGHT: u8 = 20;
pub const DEFAULT_STAGNATION_WEIGHT: u8 = 10;
pub const DEFAULT_SHOCK_WEIGHT: u8 = 15;
pub const DEFAULT_VOLATILITY_WEIGHT: u8 = 10;
pub const DEFAULT_ARRIVAL_WEIGHT: u8 = 15;
pub const DEFAULT_STAGNATION_REF: u32 = 50;
pub const DEFAULT_SHOCK_REF: u32 = 2_500;
pub const DEFAULT_VOLATILITY_REF: u32 = 1_500;
pub const DEFAULT_ARRIVAL_FAST_REF: u32 = 1_000; // log2(~1000 s) * 100

// --- Tiers ---
pub const DEFAULT_EPOCH_LENGTH_SECS: u64 = 86_400; // 1 day
pub const DEFAULT_VESTING_EPOCHS: u32 = 8;
pub const DEFAULT_BRONZE: (u32, u8, u8) = (3_000, 70, 20);
pub const DEFAULT_SILVER: (u32, u8, u8) = (5_000, 55, 40);
pub const DEFAULT_GOLD: (u32, u8, u8) = (7_000, 40, 60);
pub const DEFAULT_PLATINUM: (u32, u8, u8) = (8_500, 25, 80);
pub const DEFAULT_PLATINUM_LOYALTY_GATE: u8 = 10;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
