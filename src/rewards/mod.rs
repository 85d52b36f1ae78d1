//! Kill rewards, hunting tasks and quests.

pub mod quests;
pub mod tasks;

use crate::catalog::{Catalog, Monster};
use crate::core::balance::xp_stage_multiplier;
use crate::core::constants::STAMINA_XP_BONUS;
use crate::core::game_state::PlayerState;
use crate::items::drops::roll_group_loot;
use rand::Rng;
use std::collections::BTreeMap;

/// Everything a group kill pays out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KillReward {
    pub gold: u64,
    pub xp: u64,
    pub loot: BTreeMap<String, u32>,
}

/// Xp for killing `group_size` units of `monster`.
pub fn kill_xp(monster: &Monster, player_level: u32, group_size: u32, stamina: f64) -> u64 {
    let stamina_bonus = if stamina > 0.0 { STAMINA_XP_BONUS } else { 1.0 };
    (monster.exp as f64 * xp_stage_multiplier(player_level) * group_size.max(1) as f64 * stamina_bonus)
        .floor() as u64
}

/// Gold for killing `group_size` units of `monster`.
pub fn kill_gold<R: Rng>(monster: &Monster, group_size: u32, rng: &mut R) -> u64 {
    let lo = monster.gold_min.min(monster.gold_max);
    rng.gen_range(lo..=monster.gold_max) * group_size.max(1) as u64
}

/// Rolls gold, xp and loot for a group kill without applying it.
pub fn resolve_kill_reward<R: Rng>(
    state: &PlayerState,
    catalog: &Catalog,
    monster: &Monster,
    group_size: u32,
    rng: &mut R,
) -> KillReward {
    KillReward {
        gold: kill_gold(monster, group_size, rng),
        xp: kill_xp(monster, state.level, group_size, state.stamina),
        loot: roll_group_loot(state, catalog, monster, group_size, rng),
    }
}
