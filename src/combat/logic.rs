//! Damage, healing and mitigation formulas.
//!
//! Everything here reads a player snapshot and never mutates equipment or
//! inventory. Ammunition and thrown weapons are consumed by the tick.

use crate::catalog::{Catalog, Monster, Spell};
use crate::character::skills::{effective_skill, SkillType};
use crate::character::vocation::HealFormula;
use crate::commands::Rejected;
use crate::core::constants::*;
use crate::core::game_state::PlayerState;
use crate::items::types::{Element, EquipmentSlot, Item};
use rand::Rng;

/// Uniform integer roll in `[floor(min), floor(max)]`, never negative.
fn roll_between<R: Rng>(min: f64, max: f64, rng: &mut R) -> u32 {
    let lo = min.max(0.0).floor() as u32;
    let hi = (max.max(0.0).floor() as u32).max(lo);
    rng.gen_range(lo..=hi)
}

fn level_bonus(level: u32) -> f64 {
    level as f64 / LEVEL_DAMAGE_DIVISOR
}

/// The resolved right-hand weapon, if it exists in the catalog.
pub fn equipped_weapon<'a>(state: &PlayerState, catalog: &'a Catalog) -> Option<&'a Item> {
    state
        .equipment
        .get(EquipmentSlot::HandRight)
        .and_then(|equipped| catalog.find_item(&equipped.item_id))
}

/// Skill exercised by a basic attack. Wands and rods train nothing.
pub fn weapon_skill(state: &PlayerState, catalog: &Catalog) -> Option<SkillType> {
    match equipped_weapon(state, catalog).and_then(|w| w.scaling) {
        None => Some(SkillType::Fist),
        Some(SkillType::Magic) => None,
        Some(skill) => Some(skill),
    }
}

/// Attack value a launcher gets from its loaded ammunition. Zero when the
/// ammo slot is empty, unknown, or holds the wrong kind.
fn loaded_ammo_attack(state: &PlayerState, catalog: &Catalog, weapon: &Item) -> u32 {
    let Some(required) = weapon.requires_ammo else {
        return weapon.attack;
    };
    state
        .equipment
        .get(EquipmentSlot::Ammo)
        .filter(|equipped| equipped.units() > 0)
        .and_then(|equipped| catalog.find_item(&equipped.item_id))
        .filter(|ammo| ammo.ammo_type == Some(required))
        .map(|ammo| ammo.attack)
        .unwrap_or(0)
}

/// One basic attack from the player's right hand.
pub fn calculate_player_damage<R: Rng>(state: &PlayerState, catalog: &Catalog, rng: &mut R) -> u32 {
    let level = state.level;
    let floor = level_bonus(level);

    let Some(weapon) = equipped_weapon(state, catalog) else {
        let fist = effective_skill(state, catalog, SkillType::Fist) as f64;
        let ceiling = FIST_ATTACK_FACTOR * UNARMED_ATTACK as f64 * fist + floor;
        return roll_between(floor, ceiling, rng);
    };

    match weapon.scaling {
        Some(SkillType::Magic) => {
            let ml = effective_skill(state, catalog, SkillType::Magic) as f64;
            let attack = weapon.attack as f64;
            let min = level as f64 * 0.2 + ml * 1.5 + attack * 0.5;
            let max = level as f64 * 0.5 + ml * 2.5 + attack;
            roll_between(min, max, rng)
        }
        Some(SkillType::Distance) => {
            let attack = loaded_ammo_attack(state, catalog, weapon);
            if attack == 0 {
                return 0;
            }
            let skill = effective_skill(state, catalog, SkillType::Distance) as f64;
            let ceiling = DISTANCE_ATTACK_FACTOR * attack as f64 * skill + floor;
            roll_between(floor, ceiling, rng)
        }
        scaling => {
            let skill_type = scaling.unwrap_or(SkillType::Fist);
            let factor = if skill_type == SkillType::Fist {
                FIST_ATTACK_FACTOR
            } else {
                MELEE_ATTACK_FACTOR
            };
            let skill = effective_skill(state, catalog, skill_type) as f64;
            let ceiling = factor * weapon.attack as f64 * skill + floor;
            roll_between(floor, ceiling, rng)
        }
    }
}

/// Magic-level multiplier of an attack spell, tiered by mana cost.
pub fn spell_damage_multiplier(mana_cost: u32) -> f64 {
    SPELL_DAMAGE_TIERS
        .iter()
        .find(|(below, _)| mana_cost < *below)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(SPELL_DAMAGE_TOP_MULTIPLIER)
}

fn magic_damage<R: Rng>(state: &PlayerState, catalog: &Catalog, multiplier: f64, rng: &mut R) -> u32 {
    let ml = effective_skill(state, catalog, SkillType::Magic) as f64;
    let base = 0.2 * state.level as f64;
    roll_between(base + ml * multiplier * 0.8, base + ml * multiplier * 1.2, rng)
}

fn apply_element(damage: u32, target: &Monster, element: Element) -> u32 {
    (damage as f64 * target.element_multiplier(element)).floor().max(0.0) as u32
}

/// Damage of one attack spell against one target.
pub fn calculate_spell_damage<R: Rng>(
    state: &PlayerState,
    catalog: &Catalog,
    spell: &Spell,
    target: &Monster,
    rng: &mut R,
) -> u32 {
    let damage = magic_damage(state, catalog, spell_damage_multiplier(spell.mana_cost), rng);
    apply_element(damage, target, spell.element)
}

/// Damage of one rune against one target. Non-rune items deal nothing.
pub fn calculate_rune_damage<R: Rng>(
    state: &PlayerState,
    catalog: &Catalog,
    rune: &Item,
    target: &Monster,
    rng: &mut R,
) -> u32 {
    let Some(spec) = rune.rune else {
        return 0;
    };
    let damage = magic_damage(state, catalog, spec.kind.multiplier(), rng);
    apply_element(damage, target, spec.element)
}

/// Healing of one heal-spell cast.
///
/// Knights heal a flat amount regardless of the spell; every other
/// vocation scales with the spell's heal power.
pub fn calculate_spell_healing<R: Rng>(
    state: &PlayerState,
    catalog: &Catalog,
    spell: &Spell,
    rng: &mut R,
) -> u32 {
    let level = state.level as f64;
    let ml = effective_skill(state, catalog, SkillType::Magic) as f64;
    match state.vocation.profile().heal_formula {
        HealFormula::Flat => (0.5 * level + ml + 20.0).floor() as u32,
        HealFormula::SpellPower => {
            let power = spell.heal_power as f64;
            let min = 0.2 * level + ml * power * 0.8 + power;
            let max = 0.2 * level + ml * power * 1.2 + 2.0 * power;
            roll_between(min, max, rng)
        }
    }
}

/// Shield defense: the off-hand item in full, else a fraction of the
/// weapon's own defense.
fn shield_defense(state: &PlayerState, catalog: &Catalog) -> f64 {
    let off_hand = state
        .equipment
        .get(EquipmentSlot::HandLeft)
        .and_then(|equipped| catalog.find_item(&equipped.item_id));
    match off_hand {
        Some(shield) => shield.defense as f64,
        None => equipped_weapon(state, catalog)
            .map(|weapon| weapon.defense as f64 * WEAPON_PARRY_RATIO)
            .unwrap_or(0.0),
    }
}

pub fn total_armor(state: &PlayerState, catalog: &Catalog) -> u32 {
    state
        .equipment
        .iter_equipped()
        .filter_map(|equipped| catalog.find_item(&equipped.item_id))
        .map(|item| item.armor)
        .sum()
}

/// Damage mitigated from one incoming hit.
pub fn calculate_player_defense<R: Rng>(state: &PlayerState, catalog: &Catalog, rng: &mut R) -> u32 {
    let armor = total_armor(state, catalog) as f64;
    let shield = shield_defense(state, catalog);
    let shielding = effective_skill(state, catalog, SkillType::Defense) as f64;

    let armor_part = armor * ARMOR_FLOOR_RATIO + armor * rng.gen_range(0.0..ARMOR_VARIABLE_RATIO);
    let shield_part = shield * shielding * SHIELD_SKILL_FACTOR * rng.gen::<f64>();
    (armor_part + shield_part).floor().max(0.0) as u32
}

/// Checks that `spell` can be cast right now: learned, allowed for the
/// vocation, level and magic level met, mana available, and both the
/// spell's own cooldown and the global cooldown expired.
pub fn check_spell_ready(
    state: &PlayerState,
    catalog: &Catalog,
    spell: &Spell,
    now_ms: i64,
) -> Result<(), Rejected> {
    if !state.purchased_spells.contains(&spell.id) {
        return Err(Rejected::SpellNotLearned(spell.id.clone()));
    }
    if !spell.allows_vocation(state.vocation) {
        return Err(Rejected::WrongVocation);
    }
    if state.level < spell.level_required {
        return Err(Rejected::LevelTooLow {
            required: spell.level_required,
        });
    }
    if effective_skill(state, catalog, SkillType::Magic) < spell.magic_level_required {
        return Err(Rejected::MagicLevelTooLow {
            required: spell.magic_level_required,
        });
    }
    if state.mana < spell.mana_cost {
        return Err(Rejected::NotEnoughMana {
            needed: spell.mana_cost,
            available: state.mana,
        });
    }
    let ready_at = state
        .spell_cooldowns
        .get(&spell.id)
        .copied()
        .unwrap_or(0)
        .max(state.global_cooldown);
    if ready_at > now_ms {
        return Err(Rejected::OnCooldown {
            remaining_ms: ready_at - now_ms,
        });
    }
    Ok(())
}

/// Checks that `rune` can be used right now: it is a rune, one is carried,
/// level, vocation and magic level gates pass, and the global cooldown expired.
pub fn check_rune_ready(
    state: &PlayerState,
    catalog: &Catalog,
    rune: &Item,
    now_ms: i64,
) -> Result<(), Rejected> {
    let Some(spec) = rune.rune else {
        return Err(Rejected::NotUsable(rune.id.clone()));
    };
    if state.inventory.count(&rune.id) == 0 {
        return Err(Rejected::MissingItem(rune.id.clone()));
    }
    if !rune.allows_vocation(state.vocation) {
        return Err(Rejected::WrongVocation);
    }
    if state.level < rune.level_required {
        return Err(Rejected::LevelTooLow {
            required: rune.level_required,
        });
    }
    if effective_skill(state, catalog, SkillType::Magic) < spec.magic_level_required {
        return Err(Rejected::MagicLevelTooLow {
            required: spec.magic_level_required,
        });
    }
    if state.global_cooldown > now_ms {
        return Err(Rejected::OnCooldown {
            remaining_ms: state.global_cooldown - now_ms,
        });
    }
    Ok(())
}
