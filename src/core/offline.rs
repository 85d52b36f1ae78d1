//! Offline progression.
//!
//! When a character is loaded after more than a minute away, the time spent
//! offline is converted into a batch of abstract kills (hunting) or a lump of
//! training effort, capped so a long absence cannot outpace active play.

use super::balance::offline_group_efficiency;
use super::constants::*;
use super::game_logic::grant_xp;
use super::game_state::{Activity, PlayerState};
use crate::catalog::Catalog;
use crate::character::skills::{process_skill_training, SkillType};
use crate::rewards::quests::record_quest_kills;
use crate::rewards::resolve_kill_reward;
use crate::rewards::tasks::record_task_kills;
use rand::Rng;
use std::collections::BTreeMap;

/// Report of offline progression results
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OfflineReport {
    pub elapsed_seconds: i64,
    /// Portion of the absence that was actually simulated after the cap.
    pub simulated_seconds: i64,
    pub level_before: u32,
    pub level_after: u32,
    pub xp_gained: u64,

    pub monster_name: Option<String>,
    /// Individual monsters killed (cycles times group size).
    pub kills: u64,
    pub gold_gained: u64,
    pub loot: BTreeMap<String, u32>,
    pub task_completed: bool,
    pub quests_ready: Vec<String>,
    /// Set when the hunt could not continue (unknown target, boss gone).
    pub hunt_ended: Option<String>,

    pub trained_skill: Option<SkillType>,
    pub skill_level_before: u32,
    pub skill_level_after: u32,
}

impl OfflineReport {
    /// Human readable summary, one line per fact.
    pub fn to_text(&self, catalog: &Catalog) -> String {
        let mut lines = vec![format!(
            "You were away for {}.",
            format_duration(self.elapsed_seconds)
        )];
        if self.simulated_seconds < self.elapsed_seconds {
            lines.push(format!(
                "Only {} of it counted.",
                format_duration(self.simulated_seconds)
            ));
        }

        if let Some(monster) = &self.monster_name {
            lines.push(format!(
                "You killed {} {} for {} xp and {} gold.",
                self.kills, monster, self.xp_gained, self.gold_gained
            ));
            for (item_id, quantity) in &self.loot {
                let name = catalog
                    .find_item(item_id)
                    .map(|item| item.name.as_str())
                    .unwrap_or(item_id);
                lines.push(format!("  {}x {}", quantity, name));
            }
        }
        if let Some(skill) = self.trained_skill {
            lines.push(format!(
                "You trained {} from {} to {}.",
                skill.name(),
                self.skill_level_before,
                self.skill_level_after
            ));
        }
        if self.level_after > self.level_before {
            lines.push(format!(
                "You advanced from level {} to {}.",
                self.level_before, self.level_after
            ));
        }
        if self.task_completed {
            lines.push("Your hunting task is complete.".to_string());
        }
        for quest in &self.quests_ready {
            lines.push(format!("Quest '{}' is ready to be claimed.", quest));
        }
        if let Some(reason) = &self.hunt_ended {
            lines.push(reason.clone());
        }
        lines.join("\n")
    }
}

fn format_duration(seconds: i64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m {}s", minutes, seconds % 60)
    }
}

fn ticks_in(seconds: i64) -> u64 {
    (seconds.max(0) as u64 * 1000) / TICK_INTERVAL_MS
}

/// Reconciles the time since `last_save_time`.
///
/// Returns `None` when the absence was a minute or less, or the character
/// was idle; the activity then simply resumes live. Stamina and vitals are
/// regenerated for any absence and `last_save_time` always moves to `now_ms`.
pub fn process_offline_progression<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    now_ms: i64,
    rng: &mut R,
) -> Option<OfflineReport> {
    let elapsed_seconds = (now_ms - state.last_save_time) / 1000;
    state.last_save_time = now_ms;
    if elapsed_seconds <= OFFLINE_MIN_SECONDS {
        return None;
    }

    let mut report = OfflineReport {
        elapsed_seconds,
        level_before: state.level,
        ..OfflineReport::default()
    };

    match state.activity.clone() {
        Activity::Idle => {
            regenerate(state, ticks_in(elapsed_seconds), true);
            return None;
        }
        Activity::Training { skill } => {
            let simulated = elapsed_seconds.min(OFFLINE_TRAINING_CAP_SECONDS);
            let ticks = ticks_in(simulated);
            report.simulated_seconds = simulated;
            report.trained_skill = Some(skill);
            report.skill_level_before = state.skills.level(skill);

            // Per tick, so the stage multiplier drops as the skill climbs.
            let trains_defense = skill.is_melee_weapon();
            for _ in 0..ticks {
                process_skill_training(state, skill, TRAINING_EFFORT_PER_TICK);
                if trains_defense {
                    process_skill_training(state, SkillType::Defense, TRAINING_EFFORT_PER_TICK);
                }
            }
            report.skill_level_after = state.skills.level(skill);
            regenerate(state, ticks_in(elapsed_seconds), true);
        }
        Activity::Hunting(hunt) => {
            let simulated = elapsed_seconds.min(OFFLINE_HUNT_CAP_SECONDS);
            report.simulated_seconds = simulated;
            offline_hunt(
                state,
                catalog,
                &hunt.monster_id,
                hunt.is_boss,
                hunt.group_size,
                simulated,
                now_ms,
                rng,
                &mut report,
            );
            // Stamina already drained per kill; vitals still recover.
            regenerate(state, ticks_in(elapsed_seconds), false);
        }
    }

    report.level_after = state.level;
    log::info!(
        "offline catch-up for {}: {}s away, {} xp, {} kills",
        state.name,
        elapsed_seconds,
        report.xp_gained,
        report.kills
    );
    Some(report)
}

fn regenerate(state: &mut PlayerState, ticks: u64, stamina: bool) {
    let profile = state.vocation.profile();
    let hp = (profile.hp_regen_per_tick as u64).saturating_mul(ticks);
    let mana = (profile.mana_regen_per_tick as u64).saturating_mul(ticks);
    state.heal(hp.min(u32::MAX as u64) as u32);
    state.restore_mana(mana.min(u32::MAX as u64) as u32);
    if stamina {
        state.stamina = (state.stamina + ticks as f64 * STAMINA_REGEN_PER_TICK).min(MAX_STAMINA);
    }
}

#[allow(clippy::too_many_arguments)]
fn offline_hunt<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    monster_id: &str,
    is_boss: bool,
    group_size: u32,
    simulated_seconds: i64,
    now_ms: i64,
    rng: &mut R,
    report: &mut OfflineReport,
) {
    let Some(monster) = catalog.find_target(monster_id, is_boss) else {
        state.stop_activity();
        report.hunt_ended = Some(format!("There is no {} to hunt anymore.", monster_id));
        return;
    };
    report.monster_name = Some(monster.name.clone());

    let group = if is_boss { 1 } else { group_size.clamp(1, MAX_GROUP_SIZE) };
    let mut cycles = (simulated_seconds as f64 / OFFLINE_SECONDS_PER_KILL as f64
        * offline_group_efficiency(group))
    .floor() as u64;

    if is_boss {
        if state.boss_cooldown_remaining(&monster.id, now_ms).is_some() {
            state.stop_activity();
            report.hunt_ended = Some(format!("{} was nowhere to be found.", monster.name));
            return;
        }
        cycles = cycles.min(1);
    }

    let stamina_per_cycle = ticks_in(OFFLINE_SECONDS_PER_KILL) as f64 * STAMINA_DRAIN_PER_TICK;
    for _ in 0..cycles {
        let reward = resolve_kill_reward(state, catalog, monster, group, rng);
        state.stamina = (state.stamina - stamina_per_cycle).max(0.0);
        state.gold = state.gold.saturating_add(reward.gold);
        grant_xp(state, reward.xp);
        for (item_id, quantity) in reward.loot {
            state.inventory.add(&item_id, quantity);
            *report.loot.entry(item_id).or_insert(0) += quantity;
        }

        report.kills += group as u64;
        report.xp_gained += reward.xp;
        report.gold_gained += reward.gold;
        if record_task_kills(state, &monster.id, group) {
            report.task_completed = true;
        }
        report
            .quests_ready
            .extend(record_quest_kills(state, catalog, &monster.id, group));
    }

    if is_boss && cycles > 0 {
        if let Some(cooldown) = monster.cooldown_ms {
            state.boss_cooldowns.insert(monster.id.clone(), now_ms + cooldown);
        }
        state.stop_activity();
        report.hunt_ended = Some(format!("{} has been defeated.", monster.name));
    }
}
