//! The per-tick state transition.
//!
//! [`game_tick`] takes a snapshot of the player, advances it by one fixed
//! interval (stamina, automation, regeneration, training, combat) and returns
//! the new snapshot together with a [`TickResult`] describing what happened.
//! The event log and hit effects are built from those events by the caller;
//! nothing in here touches presentation types.

use crate::catalog::{Catalog, Monster, SpellKind};
use crate::character::skills::{process_skill_training, SkillType};
use crate::combat::logic::{
    calculate_player_damage, calculate_player_defense, calculate_rune_damage,
    calculate_spell_damage, calculate_spell_healing, check_rune_ready, check_spell_ready,
    equipped_weapon, weapon_skill,
};
use crate::combat::types::{group_hp, roll_counter_attack, AbilityHit, AbilitySource};
use crate::commands::use_potion;
use crate::core::constants::*;
use crate::core::game_logic::{grant_xp, handle_player_death, DeathReport};
use crate::core::game_state::{Activity, Hunt, PlayerState};
use crate::items::equipment::EquippedItem;
use crate::items::types::EquipmentSlot;
use crate::rewards::quests::record_quest_kills;
use crate::rewards::resolve_kill_reward;
use crate::rewards::tasks::record_task_kills;
use rand::Rng;

/// A single event produced by a game tick.
///
/// The event sink maps these to log entries and hit effects. The core never
/// reads them back.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Recovery ────────────────────────────────────────────────
    /// An automatic potion was consumed.
    PotionUsed {
        item_name: String,
        hp: u32,
        mana: u32,
        message: String,
    },

    /// The automatic heal spell was cast.
    SpellHealed {
        spell_name: String,
        amount: u32,
        message: String,
    },

    /// A skill gained one or more levels.
    SkillAdvanced {
        skill: SkillType,
        level: u32,
        message: String,
    },

    // ── Combat ──────────────────────────────────────────────────
    /// The player's basic attack landed (damage may be 0).
    PlayerAttack { damage: u32, message: String },

    /// An automatic attack spell or rune was used on the group.
    AbilityCast {
        name: String,
        damage: u32,
        message: String,
    },

    /// The last piece of ammunition was fired.
    AmmoDepleted { message: String },

    /// A thrown weapon stack ran out.
    WeaponBroke {
        item_name: String,
        replaced: bool,
        message: String,
    },

    /// The hunted group hit the player.
    MonsterAttack {
        damage: u32,
        monster_name: String,
        message: String,
    },

    /// The hunted group's attack was fully mitigated.
    MonsterMissed {
        monster_name: String,
        message: String,
    },

    /// The player died. Processing of the tick stopped right after.
    PlayerDied {
        report: DeathReport,
        message: String,
    },

    /// The whole group was killed and rewards were applied.
    MonsterKilled {
        monster_name: String,
        group_size: u32,
        xp_gained: u64,
        gold_gained: u64,
        message: String,
    },

    /// An item was picked up from a kill.
    LootDropped {
        item_name: String,
        quantity: u32,
        message: String,
    },

    // ── Progress ────────────────────────────────────────────────
    /// The active hunting task reached its kill count.
    TaskCompleted { monster_name: String, message: String },

    /// A quest reached its kill count and can be claimed.
    QuestReady { quest_name: String, message: String },

    /// A boss was killed and its cooldown started.
    BossDefeated { boss_name: String, message: String },

    /// The hunt ended without a death.
    HuntStopped { message: String },

    /// Player leveled up (may occur multiple times per tick from large XP gains).
    LeveledUp { new_level: u32 },
}

/// Result of processing a single game tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    /// Events produced during this tick, in chronological order.
    pub events: Vec<TickEvent>,

    /// True if the player died this tick.
    pub died: bool,
}

impl TickResult {
    fn push(&mut self, event: TickEvent) {
        self.events.push(event);
    }
}

/// Advances `state` by one tick and returns the new snapshot.
///
/// The input snapshot is never modified, so a caller can keep showing it
/// while the next one is computed.
pub fn game_tick<R: Rng>(
    state: &PlayerState,
    catalog: &Catalog,
    now_ms: i64,
    rng: &mut R,
) -> (PlayerState, TickResult) {
    let mut next = state.clone();
    let result = advance_tick(&mut next, catalog, now_ms, rng);
    (next, result)
}

/// In-place form of [`game_tick`].
pub fn advance_tick<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    now_ms: i64,
    rng: &mut R,
) -> TickResult {
    let mut result = TickResult::default();

    // ── 1. Stamina ──────────────────────────────────────────────
    if state.is_hunting() {
        state.stamina = (state.stamina - STAMINA_DRAIN_PER_TICK).max(0.0);
    } else {
        state.stamina = (state.stamina + STAMINA_REGEN_PER_TICK).min(MAX_STAMINA);
    }

    // ── 2-3. Automatic potions ──────────────────────────────────
    auto_potions(state, catalog, &mut result);

    // ── 4. Automatic heal spell ─────────────────────────────────
    auto_heal_spell(state, catalog, now_ms, rng, &mut result);

    // ── 5. Passive regeneration ─────────────────────────────────
    let profile = state.vocation.profile();
    state.heal(profile.hp_regen_per_tick);
    state.restore_mana(profile.mana_regen_per_tick);

    // ── 6. Training ─────────────────────────────────────────────
    if let Some(skill) = state.training_skill() {
        train(state, skill, TRAINING_EFFORT_PER_TICK, &mut result);
        if skill.is_melee_weapon() {
            train(state, SkillType::Defense, TRAINING_EFFORT_PER_TICK, &mut result);
        }
    }

    // ── 7. Combat ───────────────────────────────────────────────
    if let Some(hunt) = state.hunt().cloned() {
        combat_round(state, catalog, hunt, now_ms, rng, &mut result);
    }

    result
}

fn train(state: &mut PlayerState, skill: SkillType, effort: f64, result: &mut TickResult) {
    if process_skill_training(state, skill, effort) {
        let level = state.skills.level(skill);
        result.push(TickEvent::SkillAdvanced {
            skill,
            level,
            message: format!("You advanced to {} level {}.", skill.name(), level),
        });
    }
}

fn auto_potions(state: &mut PlayerState, catalog: &Catalog, result: &mut TickResult) {
    let settings = state.settings.clone();

    if settings.auto_health_potion
        && state.hp < state.max_hp
        && state.hp_percent() <= settings.health_potion_threshold as f64
    {
        if let Some(item_id) = settings.health_potion_id.as_deref() {
            drink(state, catalog, item_id, result);
        }
    }

    if settings.auto_mana_potion
        && state.mana < state.max_mana
        && state.mana_percent() <= settings.mana_potion_threshold as f64
    {
        if let Some(item_id) = settings.mana_potion_id.as_deref() {
            drink(state, catalog, item_id, result);
        }
    }
}

fn drink(state: &mut PlayerState, catalog: &Catalog, item_id: &str, result: &mut TickResult) {
    match use_potion(state, catalog, item_id) {
        Ok((hp, mana)) => {
            let item_name = catalog
                .find_item(item_id)
                .map(|item| item.name.clone())
                .unwrap_or_else(|| item_id.to_string());
            result.push(TickEvent::PotionUsed {
                message: format!("Auto: {} (+{} hp, +{} mana)", item_name, hp, mana),
                item_name,
                hp,
                mana,
            });
        }
        Err(reason) => log::debug!("auto potion {} skipped: {}", item_id, reason),
    }
}

fn auto_heal_spell<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    now_ms: i64,
    rng: &mut R,
    result: &mut TickResult,
) {
    let settings = &state.settings;
    if !settings.auto_heal_spell
        || state.hp >= state.max_hp
        || state.hp_percent() >= settings.heal_spell_threshold as f64
    {
        return;
    }
    let Some(spell) = settings
        .heal_spell_id
        .as_deref()
        .and_then(|id| catalog.find_spell(id))
        .filter(|spell| spell.kind == SpellKind::Heal)
    else {
        return;
    };
    if let Err(reason) = check_spell_ready(state, catalog, spell, now_ms) {
        log::debug!("auto heal {} skipped: {}", spell.id, reason);
        return;
    }

    let amount = calculate_spell_healing(state, catalog, spell, rng);
    state.mana -= spell.mana_cost;
    let healed = state.heal(amount);
    start_cooldowns(state, Some(&spell.id), spell.cooldown_ms, now_ms);
    result.push(TickEvent::SpellHealed {
        spell_name: spell.name.clone(),
        amount: healed,
        message: format!("{}: +{} hp", spell.words, healed),
    });
    train(
        state,
        SkillType::Magic,
        spell.mana_cost as f64 * MAGIC_EFFORT_PER_MANA,
        result,
    );
}

fn start_cooldowns(state: &mut PlayerState, spell_id: Option<&str>, cooldown_ms: i64, now_ms: i64) {
    if let Some(id) = spell_id {
        state.spell_cooldowns.insert(id.to_string(), now_ms + cooldown_ms);
    }
    state.global_cooldown = now_ms + GLOBAL_COOLDOWN_MS;
}

/// Picks the automatic offensive action for this tick. The attack spell
/// wins over the rune when both are ready.
fn auto_attack<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    target: &Monster,
    group_size: u32,
    now_ms: i64,
    rng: &mut R,
) -> Option<AbilityHit> {
    let settings = state.settings.clone();

    if settings.auto_attack_spell {
        let spell = settings
            .attack_spell_id
            .as_deref()
            .and_then(|id| catalog.find_spell(id))
            .filter(|spell| spell.kind == SpellKind::Attack);
        if let Some(spell) = spell {
            if check_spell_ready(state, catalog, spell, now_ms).is_ok() {
                let damage = calculate_spell_damage(state, catalog, spell, target, rng)
                    .saturating_mul(group_size);
                state.mana -= spell.mana_cost;
                start_cooldowns(state, Some(&spell.id), spell.cooldown_ms, now_ms);
                return Some(AbilityHit {
                    source: AbilitySource::Spell(spell.id.clone()),
                    name: spell.words.clone(),
                    damage,
                    mana_spent: spell.mana_cost,
                });
            }
        }
    }

    if settings.auto_attack_rune {
        let rune = settings
            .attack_rune_id
            .as_deref()
            .and_then(|id| catalog.find_item(id));
        if let Some(rune) = rune {
            if check_rune_ready(state, catalog, rune, now_ms).is_ok() {
                let damage = calculate_rune_damage(state, catalog, rune, target, rng)
                    .saturating_mul(group_size);
                state.inventory.remove(&rune.id, 1);
                start_cooldowns(state, None, 0, now_ms);
                return Some(AbilityHit {
                    source: AbilitySource::Rune(rune.id.clone()),
                    name: rune.name.clone(),
                    damage,
                    mana_spent: 0,
                });
            }
        }
    }

    None
}

/// Uses up ammunition or a thrown weapon after a basic attack.
fn consume_projectiles<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    rng: &mut R,
    result: &mut TickResult,
) {
    let Some(weapon) = equipped_weapon(state, catalog) else {
        return;
    };

    if let Some(required) = weapon.requires_ammo {
        let compatible = state
            .equipment
            .get(EquipmentSlot::Ammo)
            .and_then(|ammo| catalog.find_item(&ammo.item_id))
            .is_some_and(|ammo| ammo.ammo_type == Some(required));
        if !compatible {
            return;
        }
        if let Some(ammo) = state.equipment.get_mut(EquipmentSlot::Ammo) {
            let left = ammo.units().saturating_sub(1);
            ammo.count = Some(left);
            if left == 0 {
                state.equipment.take(EquipmentSlot::Ammo);
                result.push(TickEvent::AmmoDepleted {
                    message: "You are out of ammunition.".to_string(),
                });
            }
        }
        return;
    }

    if !weapon.stackable || weapon.break_chance <= 0.0 {
        return;
    }
    if rng.gen::<f64>() >= weapon.break_chance {
        return;
    }
    let Some(thrown) = state.equipment.get_mut(EquipmentSlot::HandRight) else {
        return;
    };
    let left = thrown.units().saturating_sub(1);
    thrown.count = Some(left);
    if left > 0 {
        return;
    }

    state.equipment.take(EquipmentSlot::HandRight);
    let spare = state.inventory.take_all(&weapon.id);
    let replaced = spare > 0;
    if replaced {
        state
            .equipment
            .set(EquippedItem::stack(&weapon.id, EquipmentSlot::HandRight, spare));
    }
    result.push(TickEvent::WeaponBroke {
        item_name: weapon.name.clone(),
        replaced,
        message: if replaced {
            format!("Your last {} broke. You grab {} more.", weapon.name, spare)
        } else {
            format!("Your last {} broke.", weapon.name)
        },
    });
}

fn combat_round<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    mut hunt: Hunt,
    now_ms: i64,
    rng: &mut R,
    result: &mut TickResult,
) {
    // a. Resolve the target.
    let Some(monster) = catalog.find_target(&hunt.monster_id, hunt.is_boss) else {
        state.stop_activity();
        result.push(TickEvent::HuntStopped {
            message: format!("There is no {} to hunt here anymore.", hunt.monster_id),
        });
        return;
    };
    if hunt.is_boss && state.boss_cooldown_remaining(&monster.id, now_ms).is_some() {
        state.stop_activity();
        result.push(TickEvent::HuntStopped {
            message: format!("{} has disappeared.", monster.name),
        });
        return;
    }
    let group = hunt.group_size.max(1);
    if hunt.monster_hp == 0 {
        hunt.monster_hp = group_hp(monster, group);
    }

    // b. Basic attack.
    let damage = calculate_player_damage(state, catalog, rng);
    if let Some(skill) = weapon_skill(state, catalog) {
        train(state, skill, COMBAT_WEAPON_EFFORT, result);
    }

    // c. Ammunition and thrown weapons.
    consume_projectiles(state, catalog, rng, result);

    // d. Automatic spell or rune.
    let ability = auto_attack(state, catalog, monster, group, now_ms, rng);

    // e. Apply damage.
    hunt.monster_hp = hunt.monster_hp.saturating_sub(damage as u64);
    result.push(TickEvent::PlayerAttack {
        damage,
        message: format!("You hit {} for {}.", monster.name, damage),
    });
    if let Some(hit) = ability {
        hunt.monster_hp = hunt.monster_hp.saturating_sub(hit.damage as u64);
        result.push(TickEvent::AbilityCast {
            message: format!("{} deals {} damage.", hit.name, hit.damage),
            name: hit.name,
            damage: hit.damage,
        });
        if hit.mana_spent > 0 {
            train(
                state,
                SkillType::Magic,
                hit.mana_spent as f64 * MAGIC_EFFORT_PER_MANA,
                result,
            );
        }
    }

    // f. Counter attack.
    if hunt.monster_hp > 0 {
        let mitigation = calculate_player_defense(state, catalog, rng);
        let counter = roll_counter_attack(monster, group, mitigation, rng);
        state.take_damage(counter.damage);
        train(state, SkillType::Defense, COMBAT_DEFENSE_EFFORT, result);
        if counter.is_miss() {
            result.push(TickEvent::MonsterMissed {
                monster_name: monster.name.clone(),
                message: format!("{} misses you.", monster.name),
            });
        } else {
            result.push(TickEvent::MonsterAttack {
                damage: counter.damage,
                monster_name: monster.name.clone(),
                message: format!("{} hits you for {}.", monster.name, counter.damage),
            });
        }
    }

    // g. Death ends the tick.
    if !state.is_alive() {
        let report = handle_player_death(state, catalog, now_ms, rng);
        let message = format!(
            "\u{1f480} You were killed by {}. Lost {} xp and {} gold.",
            monster.name, report.lost_xp, report.lost_gold
        );
        result.push(TickEvent::PlayerDied { report, message });
        result.died = true;
        return;
    }

    // h. Kill rewards.
    if hunt.monster_hp > 0 {
        if let Some(live) = state.hunt_mut() {
            live.monster_hp = hunt.monster_hp;
        }
        return;
    }
    resolve_kill(state, catalog, monster, &hunt, now_ms, rng, result);
}

fn resolve_kill<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    monster: &Monster,
    hunt: &Hunt,
    now_ms: i64,
    rng: &mut R,
    result: &mut TickResult,
) {
    let group = hunt.group_size.max(1);
    let reward = resolve_kill_reward(state, catalog, monster, group, rng);

    state.gold = state.gold.saturating_add(reward.gold);
    let level_before = state.level;
    grant_xp(state, reward.xp);

    let label = if group > 1 {
        format!("{} {}s", group, monster.name)
    } else {
        monster.name.clone()
    };
    result.push(TickEvent::MonsterKilled {
        monster_name: monster.name.clone(),
        group_size: group,
        xp_gained: reward.xp,
        gold_gained: reward.gold,
        message: format!(
            "You killed {}. +{} xp, +{} gold.",
            label, reward.xp, reward.gold
        ),
    });
    for new_level in level_before + 1..=state.level {
        result.push(TickEvent::LeveledUp { new_level });
    }

    for (item_id, quantity) in reward.loot {
        state.inventory.add(&item_id, quantity);
        let item_name = catalog
            .find_item(&item_id)
            .map(|item| item.name.clone())
            .unwrap_or(item_id);
        result.push(TickEvent::LootDropped {
            message: format!("Loot: {}x {}", quantity, item_name),
            item_name,
            quantity,
        });
    }

    if record_task_kills(state, &monster.id, group) {
        result.push(TickEvent::TaskCompleted {
            monster_name: monster.name.clone(),
            message: format!("Task complete: {}. Claim your reward!", monster.name),
        });
    }
    for quest_name in record_quest_kills(state, catalog, &monster.id, group) {
        result.push(TickEvent::QuestReady {
            message: format!("Quest '{}' is ready to be claimed.", quest_name),
            quest_name,
        });
    }

    if hunt.is_boss {
        if let Some(cooldown) = monster.cooldown_ms {
            state
                .boss_cooldowns
                .insert(monster.id.clone(), now_ms + cooldown);
        }
        state.activity = Activity::Idle;
        result.push(TickEvent::BossDefeated {
            boss_name: monster.name.clone(),
            message: format!("\u{1f3c6} {} has been defeated!", monster.name),
        });
        result.push(TickEvent::HuntStopped {
            message: format!("{} will not return for a while.", monster.name),
        });
        return;
    }

    if let Some(live) = state.hunt_mut() {
        live.monster_hp = group_hp(monster, group);
    }
}
