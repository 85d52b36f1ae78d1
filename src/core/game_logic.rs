//! Level-up and death transitions shared by the tick, commands and offline
//! catch-up.

use super::balance::max_xp_for_level;
use super::constants::*;
use super::game_state::{PlayerState, STARTING_HP, STARTING_MANA};
use crate::catalog::Catalog;
use crate::character::skills::SkillType;
use rand::Rng;

/// Applies every level-up the current xp pays for. Returns levels gained.
///
/// Each level raises the vocation's hp/mana pools and fully restores both.
pub fn apply_level_ups(state: &mut PlayerState) -> u32 {
    let mut levelups = 0;
    while state.current_xp >= state.max_xp {
        state.current_xp -= state.max_xp;
        state.level += 1;
        state.max_xp = max_xp_for_level(state.level);

        let profile = state.vocation.profile();
        state.max_hp += profile.hp_per_level;
        state.max_mana += profile.mana_per_level;
        state.hp = state.max_hp;
        state.mana = state.max_mana;
        levelups += 1;
    }
    levelups
}

/// Rebuilds max hp/mana as if every level so far had been gained under the
/// current vocation. Current pools are clamped, never raised.
pub fn recompute_pools(state: &mut PlayerState) {
    let profile = state.vocation.profile();
    let gained = state.level.saturating_sub(1);
    state.max_hp = STARTING_HP + gained * profile.hp_per_level;
    state.max_mana = STARTING_MANA + gained * profile.mana_per_level;
    state.hp = state.hp.min(state.max_hp);
    state.mana = state.mana.min(state.max_mana);
}

/// Adds xp and processes any level-ups. Returns levels gained.
pub fn grant_xp(state: &mut PlayerState, xp: u64) -> u32 {
    state.current_xp = state.current_xp.saturating_add(xp);
    apply_level_ups(state)
}

/// What a death cost the player.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeathReport {
    pub killer: Option<String>,
    pub lost_xp: u64,
    pub lost_gold: u64,
    /// Progress points removed per skill, for skills that lost anything.
    pub skill_losses: Vec<(SkillType, f64)>,
    pub demoted_skills: Vec<SkillType>,
    pub blessed: bool,
}

fn scaled_loss(base: u64, blessed: bool) -> u64 {
    if blessed {
        (base as f64 * BLESSING_PENALTY_SCALE).floor() as u64
    } else {
        base
    }
}

/// Death transition: stops all activity, applies penalties, restores vitals.
///
/// Runs to completion even though the tick that triggered it aborts.
pub fn handle_player_death<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    now_ms: i64,
    rng: &mut R,
) -> DeathReport {
    let blessed = state.has_blessing;
    let mut report = DeathReport {
        blessed,
        ..DeathReport::default()
    };

    if let Some(hunt) = state.hunt() {
        let target = catalog.find_target(&hunt.monster_id, hunt.is_boss);
        report.killer = target.map(|monster| monster.name.clone());
        if hunt.is_boss {
            if let Some(cooldown) = target.and_then(|boss| boss.cooldown_ms) {
                state
                    .boss_cooldowns
                    .insert(hunt.monster_id.clone(), now_ms + cooldown);
            }
        }
    }
    state.stop_activity();

    let xp_loss = scaled_loss((state.current_xp as f64 * DEATH_XP_LOSS).floor() as u64, blessed);
    state.current_xp -= xp_loss.min(state.current_xp);
    report.lost_xp = xp_loss;

    let gold_rate = rng.gen_range(DEATH_GOLD_LOSS_MIN..=DEATH_GOLD_LOSS_MAX);
    let gold_loss = scaled_loss((state.gold as f64 * gold_rate).floor() as u64, blessed);
    state.gold -= gold_loss.min(state.gold);
    report.lost_gold = gold_loss;

    let skill_loss = if blessed {
        DEATH_SKILL_LOSS_PROGRESS * BLESSING_PENALTY_SCALE
    } else {
        DEATH_SKILL_LOSS_PROGRESS
    };
    for skill_type in SkillType::all() {
        let floor = skill_type.floor_level();
        let skill = state.skills.get_mut(skill_type);
        let before = (skill.level, skill.progress);

        skill.progress -= skill_loss;
        if skill.progress < 0.0 {
            if skill.level > floor {
                skill.level -= 1;
                skill.progress += 100.0;
                report.demoted_skills.push(skill_type);
            } else {
                skill.progress = 0.0;
            }
        }

        if (skill.level, skill.progress) != before {
            let lost = if skill.level < before.0 {
                skill_loss
            } else {
                before.1 - skill.progress
            };
            report.skill_losses.push((skill_type, lost));
        }
    }

    state.has_blessing = false;
    state.hp = state.max_hp;
    state.mana = state.max_mana;

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grant_xp_no_levelup() {
        let mut state = PlayerState::new("Test Hero".to_string(), 0);
        assert_eq!(grant_xp(&mut state, 50), 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.current_xp, 50);
    }

    #[test]
    fn test_grant_xp_single_levelup() {
        let mut state = PlayerState::new("Test Hero".to_string(), 0);
        assert_eq!(grant_xp(&mut state, 100), 1);
        assert_eq!(state.level, 2);
        assert_eq!(state.current_xp, 0);
        assert_eq!(state.max_xp, 200);
    }

    #[test]
    fn test_grant_xp_multiple_levelups_restore_pools() {
        let mut state = PlayerState::new("Test Hero".to_string(), 0);
        state.hp = 1;
        state.mana = 0;
        // 100 + 200 + 400 = 700 for three levels, 50 left over
        assert_eq!(grant_xp(&mut state, 750), 3);
        assert_eq!(state.level, 4);
        assert_eq!(state.current_xp, 50);
        assert_eq!(state.max_hp, 150 + 3 * 5);
        assert_eq!(state.hp, state.max_hp);
        assert_eq!(state.mana, state.max_mana);
    }

    #[test]
    fn test_vocation_shapes_level_gains() {
        let mut knight = PlayerState::new("Knight".to_string(), 0);
        knight.vocation = crate::character::vocation::Vocation::Knight;
        grant_xp(&mut knight, 100);
        assert_eq!(knight.max_hp, 165);
        assert_eq!(knight.max_mana, 60);
    }

    #[test]
    fn test_death_clears_activity_and_restores_vitals() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Unlucky".to_string(), 0);
        state.activity = crate::core::game_state::Activity::Training {
            skill: SkillType::Axe,
        };
        state.hp = 0;
        state.mana = 3;
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        handle_player_death(&mut state, &catalog, 0, &mut rng);
        assert_eq!(state.activity, crate::core::game_state::Activity::Idle);
        assert_eq!(state.hp, state.max_hp);
        assert_eq!(state.mana, state.max_mana);
    }

    #[test]
    fn test_skill_loss_demotes_above_floor() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Unlucky".to_string(), 0);
        state.skills.club.level = 15;
        state.skills.club.progress = 4.0;
        state.skills.sword.progress = 5.0;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let report = handle_player_death(&mut state, &catalog, 0, &mut rng);

        assert_eq!(state.skills.club.level, 14);
        assert!((state.skills.club.progress - 94.0).abs() < 1e-9);
        assert_eq!(report.demoted_skills, vec![SkillType::Club]);

        // Level 10 is the floor.
        assert_eq!(state.skills.sword.level, 10);
        assert_eq!(state.skills.sword.progress, 0.0);
    }

    #[test]
    fn test_boss_death_stamps_cooldown() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Challenger".to_string(), 0);
        state.activity = crate::core::game_state::Activity::Hunting(crate::core::game_state::Hunt {
            monster_id: "munster".to_string(),
            is_boss: true,
            group_size: 1,
            monster_hp: 58,
        });
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let report = handle_player_death(&mut state, &catalog, 1_000, &mut rng);
        assert_eq!(report.killer.as_deref(), Some("Munster"));
        let cooldown = catalog.find_boss("munster").unwrap().cooldown_ms.unwrap();
        assert_eq!(state.boss_cooldowns.get("munster"), Some(&(1_000 + cooldown)));
    }
}
