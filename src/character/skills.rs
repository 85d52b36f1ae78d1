//! Skill levels and the training model.
//!
//! Skills advance by accumulating training points. The stored `progress` is a
//! percentage of the points needed for the current level, so changing the
//! cost curve never invalidates saved progress.

use super::vocation::Vocation;
use crate::catalog::Catalog;
use crate::core::constants::MIN_SKILL_LEVEL;
use crate::core::game_state::PlayerState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    Sword,
    Axe,
    Club,
    Distance,
    Fist,
    Defense,
    Magic,
}

impl SkillType {
    pub fn all() -> [SkillType; 7] {
        [
            SkillType::Sword,
            SkillType::Axe,
            SkillType::Club,
            SkillType::Distance,
            SkillType::Fist,
            SkillType::Defense,
            SkillType::Magic,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            SkillType::Sword => "Sword Fighting",
            SkillType::Axe => "Axe Fighting",
            SkillType::Club => "Club Fighting",
            SkillType::Distance => "Distance Fighting",
            SkillType::Fist => "Fist Fighting",
            SkillType::Defense => "Shielding",
            SkillType::Magic => "Magic Level",
        }
    }

    pub fn parse(name: &str) -> Option<SkillType> {
        let name = name.trim().to_lowercase();
        let skill = match name.as_str() {
            "sword" => SkillType::Sword,
            "axe" => SkillType::Axe,
            "club" => SkillType::Club,
            "distance" => SkillType::Distance,
            "fist" => SkillType::Fist,
            "defense" | "shielding" => SkillType::Defense,
            "magic" => SkillType::Magic,
            _ => return None,
        };
        Some(skill)
    }

    /// Sword, axe and club. Training these also trains shielding.
    pub fn is_melee_weapon(self) -> bool {
        matches!(self, SkillType::Sword | SkillType::Axe | SkillType::Club)
    }

    /// Lowest level a death penalty can demote this skill to.
    pub fn floor_level(self) -> u32 {
        match self {
            SkillType::Magic => 0,
            _ => MIN_SKILL_LEVEL,
        }
    }

    /// `(base points, level offset)` of the training cost curve.
    fn cost_base(self) -> (f64, i32) {
        match self {
            SkillType::Magic => (1600.0, 0),
            _ => (50.0, 10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub level: u32,
    /// Percent of the current level's points already earned, in `[0, 100)`.
    pub progress: f64,
}

impl Skill {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            progress: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub sword: Skill,
    pub axe: Skill,
    pub club: Skill,
    pub distance: Skill,
    pub fist: Skill,
    pub defense: Skill,
    pub magic: Skill,
}

impl Default for Skills {
    fn default() -> Self {
        Self {
            sword: Skill::new(MIN_SKILL_LEVEL),
            axe: Skill::new(MIN_SKILL_LEVEL),
            club: Skill::new(MIN_SKILL_LEVEL),
            distance: Skill::new(MIN_SKILL_LEVEL),
            fist: Skill::new(MIN_SKILL_LEVEL),
            defense: Skill::new(MIN_SKILL_LEVEL),
            magic: Skill::new(0),
        }
    }
}

impl Skills {
    pub fn get(&self, skill: SkillType) -> &Skill {
        match skill {
            SkillType::Sword => &self.sword,
            SkillType::Axe => &self.axe,
            SkillType::Club => &self.club,
            SkillType::Distance => &self.distance,
            SkillType::Fist => &self.fist,
            SkillType::Defense => &self.defense,
            SkillType::Magic => &self.magic,
        }
    }

    pub fn get_mut(&mut self, skill: SkillType) -> &mut Skill {
        match skill {
            SkillType::Sword => &mut self.sword,
            SkillType::Axe => &mut self.axe,
            SkillType::Club => &mut self.club,
            SkillType::Distance => &mut self.distance,
            SkillType::Fist => &mut self.fist,
            SkillType::Defense => &mut self.defense,
            SkillType::Magic => &mut self.magic,
        }
    }

    pub fn level(&self, skill: SkillType) -> u32 {
        self.get(skill).level
    }
}

/// Training speed multiplier for `skill` at `level`.
///
/// Primary skills of the vocation train fast early and taper to the base
/// rate past level 100; everything else always trains at the base rate.
pub fn stage_multiplier(vocation: Vocation, skill: SkillType, level: u32) -> f64 {
    if !vocation.is_primary(skill) {
        return 1.0;
    }
    match level {
        0..=25 => 50.0,
        26..=50 => 20.0,
        51..=75 => 10.0,
        76..=100 => 5.0,
        _ => 1.0,
    }
}

/// Training points needed to advance `skill` from `level` to `level + 1`.
///
/// Strictly increasing in `level` for every vocation.
pub fn points_needed(vocation: Vocation, skill: SkillType, level: u32) -> f64 {
    let (base, offset) = skill.cost_base();
    let growth = vocation.skill_cost_multiplier(skill);
    base * growth.powi(level as i32 - offset)
}

/// Base skill level plus the bonuses of every equipped item.
///
/// Equipped ids that no longer resolve in the catalog contribute nothing.
pub fn effective_skill(state: &PlayerState, catalog: &Catalog, skill: SkillType) -> u32 {
    let bonus: u32 = state
        .equipment
        .iter_equipped()
        .filter_map(|equipped| catalog.find_item(&equipped.item_id))
        .map(|item| item.skill_bonus(skill))
        .sum();
    state.skills.level(skill) + bonus
}

/// Converts training effort into skill progress, applying as many level-ups as
/// the accumulated points pay for. Returns true if the skill leveled up.
pub fn process_skill_training(state: &mut PlayerState, skill: SkillType, effort: f64) -> bool {
    if !(effort > 0.0) || !effort.is_finite() {
        return false;
    }
    let vocation = state.vocation;
    let entry = state.skills.get_mut(skill);

    let mut needed = points_needed(vocation, skill, entry.level);
    let mut points = entry.progress / 100.0 * needed
        + effort * stage_multiplier(vocation, skill, entry.level);

    let mut leveled_up = false;
    while points >= needed {
        points -= needed;
        entry.level += 1;
        leveled_up = true;
        needed = points_needed(vocation, skill, entry.level);
    }
    entry.progress = (points / needed * 100.0).clamp(0.0, 100.0);
    if entry.progress >= 100.0 {
        entry.progress = 0.0;
        entry.level += 1;
        leveled_up = true;
    }

    leveled_up
}
