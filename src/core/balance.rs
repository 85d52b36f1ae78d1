//! Shared balance curves for leveling and rewards.
//!
//! All xp-related numbers live here so the tick loop, offline catch-up and
//! task generation agree on them.

/// XP stage thresholds: `(level below, multiplier)`. Levels at or above the
/// last threshold earn the base rate.
pub const XP_STAGES: [(u32, f64); 4] = [(8, 15.0), (20, 10.0), (50, 5.0), (100, 3.0)];

/// Total experience a character holds when reaching `level`.
///
/// `50/3 * (L^3 - 6L^2 + 17L - 12)`, which is 0 at level 1.
pub fn total_xp_for_level(level: u32) -> u64 {
    let l = level.max(1) as i64;
    let numerator = (l * l * l - 6 * l * l + 17 * l - 12) * 50;
    (numerator / 3).max(0) as u64
}

/// XP threshold to advance from `level` to `level + 1`.
pub fn max_xp_for_level(level: u32) -> u64 {
    total_xp_for_level(level.saturating_add(1)).max(1)
}

/// Rate multiplier applied to kill xp for a character of `level`.
pub fn xp_stage_multiplier(level: u32) -> f64 {
    XP_STAGES
        .iter()
        .find(|(below, _)| level < *below)
        .map(|(_, mult)| *mult)
        .unwrap_or(1.0)
}

/// Difficulty multiplier for damage taken from a lured group of `group_size`.
pub fn group_difficulty(group_size: u32) -> f64 {
    1.0 + group_size.saturating_sub(1) as f64 * super::constants::GROUP_DIFFICULTY_PER_EXTRA
}

/// Efficiency of offline hunting with a lured group.
pub fn offline_group_efficiency(group_size: u32) -> f64 {
    use super::constants::{OFFLINE_GROUP_PENALTY_PER_EXTRA, OFFLINE_MIN_EFFICIENCY};
    (1.0 - group_size.saturating_sub(1) as f64 * OFFLINE_GROUP_PENALTY_PER_EXTRA)
        .max(OFFLINE_MIN_EFFICIENCY)
}

/// Price of a blessing for a character of `level`.
pub fn blessing_price(level: u32) -> u64 {
    use super::constants::{BLESSING_BASE_PRICE, BLESSING_PRICE_PER_LEVEL};
    BLESSING_BASE_PRICE + BLESSING_PRICE_PER_LEVEL * level as u64
}
