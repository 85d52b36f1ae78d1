//! Hunting tasks: "kill N of this monster" contracts with a bulk payout.

use crate::catalog::{Catalog, Monster};
use crate::commands::Rejected;
use crate::core::balance::xp_stage_multiplier;
use crate::core::constants::*;
use crate::core::game_logic::grant_xp;
use crate::core::game_state::PlayerState;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntingTask {
    pub monster_id: String,
    pub monster_name: String,
    pub monster_level: u32,
    pub kills_required: u32,
    #[serde(default)]
    pub kills: u32,
    pub reward_xp: u64,
    pub reward_gold: u64,
    /// Set when the kill count is reached. The reward still has to be claimed.
    #[serde(default)]
    pub completed: bool,
}

/// Payout of a claimed task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskReward {
    pub xp: u64,
    pub gold: u64,
    pub levels_gained: u32,
}

pub fn kills_required_for_level(player_level: u32) -> u32 {
    (TASK_BASE_KILLS + player_level * TASK_KILLS_PER_LEVEL).clamp(TASK_MIN_KILLS, TASK_MAX_KILLS)
}

fn build_task(monster: &Monster, player_level: u32) -> HuntingTask {
    let kills = kills_required_for_level(player_level);
    let stage = xp_stage_multiplier(player_level);
    let avg_gold = (monster.gold_min + monster.gold_max) as f64 / 2.0;
    HuntingTask {
        monster_id: monster.id.clone(),
        monster_name: monster.name.clone(),
        monster_level: monster.level,
        kills_required: kills,
        kills: 0,
        reward_xp: (monster.exp as f64 * stage * kills as f64 * TASK_PAYOUT_RATIO).floor() as u64,
        reward_gold: (avg_gold * kills as f64 * TASK_PAYOUT_RATIO).floor() as u64,
        completed: false,
    }
}

/// Offers up to three tasks against monsters near the player's level.
///
/// Falls back to the first few catalog monsters when the level band is
/// too thin.
pub fn generate_task_options<R: Rng>(
    player_level: u32,
    catalog: &Catalog,
    rng: &mut R,
) -> Vec<HuntingTask> {
    let low = player_level.saturating_sub(TASK_LEVEL_BAND);
    let high = player_level.saturating_add(TASK_LEVEL_BAND);

    let mut candidates: Vec<&Monster> = catalog
        .monsters()
        .iter()
        .filter(|m| m.level >= low && m.level <= high)
        .collect();
    if candidates.len() < TASK_OPTION_COUNT {
        candidates = catalog.monsters().iter().take(TASK_FALLBACK_POOL).collect();
    }

    candidates.shuffle(rng);
    candidates
        .into_iter()
        .take(TASK_OPTION_COUNT)
        .map(|monster| build_task(monster, player_level))
        .collect()
}

pub fn accept_task(state: &mut PlayerState, index: usize) -> Result<(), Rejected> {
    if state.active_task.is_some() {
        return Err(Rejected::TaskAlreadyActive);
    }
    if index >= state.task_options.len() {
        return Err(Rejected::NoSuchTask(index));
    }
    let task = state.task_options.remove(index);
    state.task_options.clear();
    state.active_task = Some(task);
    Ok(())
}

pub fn cancel_task(state: &mut PlayerState) -> Result<HuntingTask, Rejected> {
    state.active_task.take().ok_or(Rejected::NoActiveTask)
}

/// Counts kills toward the active task. Returns true when this call
/// completed it.
pub fn record_task_kills(state: &mut PlayerState, monster_id: &str, kills: u32) -> bool {
    let Some(task) = state.active_task.as_mut() else {
        return false;
    };
    if task.completed || task.monster_id != monster_id || kills == 0 {
        return false;
    }
    task.kills = task.kills.saturating_add(kills).min(task.kills_required);
    if task.kills >= task.kills_required {
        task.completed = true;
        return true;
    }
    false
}

/// Pays out a completed task and clears it.
pub fn claim_task(state: &mut PlayerState) -> Result<TaskReward, Rejected> {
    match &state.active_task {
        None => return Err(Rejected::NoActiveTask),
        Some(task) if !task.completed => {
            return Err(Rejected::TaskIncomplete {
                kills: task.kills,
                required: task.kills_required,
            })
        }
        Some(_) => {}
    }
    let Some(task) = state.active_task.take() else {
        return Err(Rejected::NoActiveTask);
    };
    state.gold = state.gold.saturating_add(task.reward_gold);
    let levels_gained = grant_xp(state, task.reward_xp);
    Ok(TaskReward {
        xp: task.reward_xp,
        gold: task.reward_gold,
        levels_gained,
    })
}

pub fn reroll_price(player_level: u32) -> u64 {
    TASK_REROLL_GOLD_PER_LEVEL * player_level.max(1) as u64
}

/// Replaces the offered tasks for a level-scaled gold fee.
pub fn reroll_tasks<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<(), Rejected> {
    if state.active_task.is_some() {
        return Err(Rejected::TaskAlreadyActive);
    }
    let price = reroll_price(state.level);
    if state.gold < price {
        return Err(Rejected::InsufficientGold {
            needed: price,
            available: state.gold,
        });
    }
    state.gold -= price;
    state.task_options = generate_task_options(state.level, catalog, rng);
    Ok(())
}

/// Makes sure an idle task board has something on offer.
pub fn ensure_task_options<R: Rng>(state: &mut PlayerState, catalog: &Catalog, rng: &mut R) {
    if state.active_task.is_none() && state.task_options.is_empty() {
        state.task_options = generate_task_options(state.level, catalog, rng);
    }
}
