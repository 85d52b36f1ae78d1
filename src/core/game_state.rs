use super::balance::max_xp_for_level;
use super::constants::MAX_STAMINA;
use crate::catalog::Catalog;
use crate::character::skills::{SkillType, Skills};
use crate::character::vocation::Vocation;
use crate::items::equipment::{Equipment, EquippedItem, Inventory};
use crate::rewards::tasks::HuntingTask;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const STARTING_HP: u32 = 150;
pub const STARTING_MANA: u32 = 55;
pub const STARTING_GOLD: u64 = 100;

/// An ongoing hunt against one monster or boss, optionally a lured group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hunt {
    pub monster_id: String,
    pub is_boss: bool,
    pub group_size: u32,
    /// Remaining hp of the group currently being fought.
    pub monster_hp: u64,
}

/// What the character is doing. Hunting and training exclude each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    #[default]
    Idle,
    Hunting(Hunt),
    Training { skill: SkillType },
}

/// Automation toggles and thresholds (percent of max hp/mana).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationSettings {
    pub auto_health_potion: bool,
    pub health_potion_id: Option<String>,
    pub health_potion_threshold: u32,
    pub auto_mana_potion: bool,
    pub mana_potion_id: Option<String>,
    pub mana_potion_threshold: u32,
    pub auto_heal_spell: bool,
    pub heal_spell_id: Option<String>,
    pub heal_spell_threshold: u32,
    pub auto_attack_spell: bool,
    pub attack_spell_id: Option<String>,
    pub auto_attack_rune: bool,
    pub attack_rune_id: Option<String>,
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            auto_health_potion: false,
            health_potion_id: None,
            health_potion_threshold: 50,
            auto_mana_potion: false,
            mana_potion_id: None,
            mana_potion_threshold: 30,
            auto_heal_spell: false,
            heal_spell_id: None,
            heal_spell_threshold: 70,
            auto_attack_spell: false,
            attack_spell_id: None,
            auto_attack_rune: false,
            attack_rune_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuestProgress {
    pub kills: u32,
    pub completed: bool,
}

/// The canonical player snapshot.
///
/// IMPORTANT: Every field defaults when missing so older save files keep
/// loading. New fields must provide a sensible `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    pub character_id: String,
    pub name: String,
    pub level: u32,
    pub vocation: Vocation,
    pub current_xp: u64,
    pub max_xp: u64,

    pub hp: u32,
    pub max_hp: u32,
    pub mana: u32,
    pub max_mana: u32,
    pub stamina: f64,

    pub gold: u64,
    pub bank_gold: u64,

    pub activity: Activity,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub depot: Inventory,
    pub skills: Skills,
    pub settings: AutomationSettings,

    pub quests: BTreeMap<String, QuestProgress>,
    pub boss_cooldowns: BTreeMap<String, i64>,
    pub spell_cooldowns: BTreeMap<String, i64>,
    pub global_cooldown: i64,
    pub purchased_spells: BTreeSet<String>,
    pub active_task: Option<HuntingTask>,
    pub task_options: Vec<HuntingTask>,
    pub skipped_loot: BTreeSet<String>,
    pub has_blessing: bool,

    pub last_save_time: i64,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(String::new(), 0)
    }
}

impl PlayerState {
    /// Creates a fresh level 1 character from the registration template.
    pub fn new(name: String, current_time_ms: i64) -> Self {
        Self {
            character_id: uuid::Uuid::new_v4().to_string(),
            name,
            level: 1,
            vocation: Vocation::None,
            current_xp: 0,
            max_xp: max_xp_for_level(1),
            hp: STARTING_HP,
            max_hp: STARTING_HP,
            mana: STARTING_MANA,
            max_mana: STARTING_MANA,
            stamina: MAX_STAMINA,
            gold: STARTING_GOLD,
            bank_gold: 0,
            activity: Activity::Idle,
            equipment: Equipment::new(),
            inventory: Inventory::new(),
            depot: Inventory::new(),
            skills: Skills::default(),
            settings: AutomationSettings::default(),
            quests: BTreeMap::new(),
            boss_cooldowns: BTreeMap::new(),
            spell_cooldowns: BTreeMap::new(),
            global_cooldown: 0,
            purchased_spells: BTreeSet::new(),
            active_task: None,
            task_options: Vec::new(),
            skipped_loot: BTreeSet::new(),
            has_blessing: false,
            last_save_time: current_time_ms,
        }
    }

    /// Creates a character and equips the catalog's starter kit.
    pub fn register(name: String, catalog: &Catalog, current_time_ms: i64) -> Self {
        let mut state = Self::new(name, current_time_ms);
        for (item_id, count) in catalog.starter_kit() {
            let Some(item) = catalog.find_item(item_id) else {
                continue;
            };
            let Some(slot) = item.slot else {
                state.inventory.add(item_id, *count);
                continue;
            };
            let equipped = if item.stackable {
                EquippedItem::stack(item_id, slot, *count)
            } else {
                EquippedItem::new(item_id, slot)
            };
            if let Some(previous) = state.equipment.set(equipped) {
                state.inventory.add(&previous.item_id, previous.units());
            }
        }
        state
    }

    pub fn hunt(&self) -> Option<&Hunt> {
        match &self.activity {
            Activity::Hunting(hunt) => Some(hunt),
            _ => None,
        }
    }

    pub fn hunt_mut(&mut self) -> Option<&mut Hunt> {
        match &mut self.activity {
            Activity::Hunting(hunt) => Some(hunt),
            _ => None,
        }
    }

    pub fn is_hunting(&self) -> bool {
        matches!(self.activity, Activity::Hunting(_))
    }

    pub fn training_skill(&self) -> Option<SkillType> {
        match self.activity {
            Activity::Training { skill } => Some(skill),
            _ => None,
        }
    }

    pub fn stop_activity(&mut self) {
        self.activity = Activity::Idle;
    }

    pub fn hp_percent(&self) -> f64 {
        if self.max_hp == 0 {
            return 100.0;
        }
        self.hp as f64 / self.max_hp as f64 * 100.0
    }

    pub fn mana_percent(&self) -> f64 {
        if self.max_mana == 0 {
            return 100.0;
        }
        self.mana as f64 / self.max_mana as f64 * 100.0
    }

    /// Heals up to `max_hp`. Returns the amount actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Restores mana up to `max_mana`. Returns the amount actually restored.
    pub fn restore_mana(&mut self, amount: u32) -> u32 {
        let before = self.mana;
        self.mana = self.mana.saturating_add(amount).min(self.max_mana);
        self.mana - before
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Milliseconds until `boss_id` may be fought again, if it is on cooldown.
    pub fn boss_cooldown_remaining(&self, boss_id: &str, now_ms: i64) -> Option<i64> {
        self.boss_cooldowns
            .get(boss_id)
            .map(|until| until - now_ms)
            .filter(|remaining| *remaining > 0)
    }
}
