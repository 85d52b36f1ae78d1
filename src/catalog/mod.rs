//! Immutable content tables: monsters, bosses, items, spells and quests.
//!
//! The catalog is built once and shared read-only with the engine. Every
//! lookup is by string id; callers treat a missing id as "skip".

pub mod data;

use crate::character::vocation::Vocation;
use crate::items::types::{Element, Item};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item_id: String,
    /// Probability in `(0, 1]`.
    pub chance: f64,
    pub max_amount: u32,
}

impl LootEntry {
    pub fn new(item_id: &str, chance: f64, max_amount: u32) -> Self {
        Self {
            item_id: item_id.to_string(),
            chance,
            max_amount,
        }
    }
}

/// A monster or boss definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub hp: u64,
    pub damage_min: u32,
    pub damage_max: u32,
    pub gold_min: u64,
    pub gold_max: u64,
    pub exp: u64,
    #[serde(default)]
    pub loot: Vec<LootEntry>,
    /// Damage multiplier per element; missing elements count as 1.0.
    #[serde(default)]
    pub elements: BTreeMap<Element, f64>,
    /// Bosses only: how long after a kill (or a death) until it respawns.
    #[serde(default)]
    pub cooldown_ms: Option<i64>,
}

impl Monster {
    pub fn new(
        id: &str,
        name: &str,
        level: u32,
        hp: u64,
        damage: (u32, u32),
        gold: (u64, u64),
        exp: u64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            level,
            hp,
            damage_min: damage.0,
            damage_max: damage.1,
            gold_min: gold.0,
            gold_max: gold.1,
            exp,
            loot: Vec::new(),
            elements: BTreeMap::new(),
            cooldown_ms: None,
        }
    }

    pub fn with_loot(mut self, loot: Vec<LootEntry>) -> Self {
        self.loot = loot;
        self
    }

    pub fn with_element(mut self, element: Element, multiplier: f64) -> Self {
        self.elements.insert(element, multiplier);
        self
    }

    pub fn with_cooldown(mut self, cooldown_ms: i64) -> Self {
        self.cooldown_ms = Some(cooldown_ms);
        self
    }

    pub fn element_multiplier(&self, element: Element) -> f64 {
        self.elements.get(&element).copied().unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellKind {
    Heal,
    Attack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub id: String,
    pub name: String,
    pub words: String,
    pub kind: SpellKind,
    #[serde(default)]
    pub element: Element,
    pub mana_cost: u32,
    #[serde(default)]
    pub level_required: u32,
    #[serde(default)]
    pub magic_level_required: u32,
    pub cooldown_ms: i64,
    /// Empty means every vocation may learn it.
    #[serde(default)]
    pub vocations: Vec<Vocation>,
    #[serde(default)]
    pub price: u64,
    /// Healing strength for caster heal formulas.
    #[serde(default)]
    pub heal_power: u32,
}

impl Spell {
    pub fn allows_vocation(&self, vocation: Vocation) -> bool {
        self.vocations.is_empty() || self.vocations.contains(&vocation)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub monster_id: String,
    pub kills_required: u32,
    #[serde(default)]
    pub reward_xp: u64,
    #[serde(default)]
    pub reward_gold: u64,
    #[serde(default)]
    pub reward_item: Option<(String, u32)>,
}

/// Serializable catalog contents, as loaded from JSON or built in code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub monsters: Vec<Monster>,
    pub bosses: Vec<Monster>,
    pub items: Vec<Item>,
    pub spells: Vec<Spell>,
    pub quests: Vec<Quest>,
    /// Items every new character starts with, as `(item id, count)`.
    pub starter_kit: Vec<(String, u32)>,
}

/// Read-only, id-indexed content tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    monsters: Vec<Monster>,
    bosses: Vec<Monster>,
    items: HashMap<String, Item>,
    spells: Vec<Spell>,
    quests: Vec<Quest>,
    starter_kit: Vec<(String, u32)>,
    monster_index: HashMap<String, usize>,
    boss_index: HashMap<String, usize>,
    spell_index: HashMap<String, usize>,
    quest_index: HashMap<String, usize>,
}

fn index_by<T>(entries: &[T], id: impl Fn(&T) -> &str) -> HashMap<String, usize> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| (id(entry).to_string(), i))
        .collect()
}

impl Catalog {
    pub fn new(data: CatalogData) -> Self {
        let monster_index = index_by(&data.monsters, |m| &m.id);
        let boss_index = index_by(&data.bosses, |m| &m.id);
        let spell_index = index_by(&data.spells, |s| &s.id);
        let quest_index = index_by(&data.quests, |q| &q.id);
        let items = data
            .items
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        Self {
            monsters: data.monsters,
            bosses: data.bosses,
            items,
            spells: data.spells,
            quests: data.quests,
            starter_kit: data.starter_kit,
            monster_index,
            boss_index,
            spell_index,
            quest_index,
        }
    }

    /// The built-in content set.
    pub fn default_content() -> Self {
        Self::new(data::default_data())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let data: CatalogData = serde_json::from_str(json)?;
        Ok(Self::new(data))
    }

    pub fn find_monster(&self, id: &str) -> Option<&Monster> {
        self.monster_index.get(id).map(|&i| &self.monsters[i])
    }

    pub fn find_boss(&self, id: &str) -> Option<&Monster> {
        self.boss_index.get(id).map(|&i| &self.bosses[i])
    }

    /// Resolves a hunt target from the monster or boss table.
    pub fn find_target(&self, id: &str, is_boss: bool) -> Option<&Monster> {
        if is_boss {
            self.find_boss(id)
        } else {
            self.find_monster(id)
        }
    }

    pub fn find_item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn find_spell(&self, id: &str) -> Option<&Spell> {
        self.spell_index.get(id).map(|&i| &self.spells[i])
    }

    pub fn find_quest(&self, id: &str) -> Option<&Quest> {
        self.quest_index.get(id).map(|&i| &self.quests[i])
    }

    /// Regular monsters in catalog order.
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn bosses(&self) -> &[Monster] {
        &self.bosses
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn starter_kit(&self) -> &[(String, u32)] {
        &self.starter_kit
    }
}
