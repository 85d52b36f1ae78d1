use crate::character::skills::SkillType;
use crate::character::vocation::Vocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Neck,
    Body,
    HandLeft,
    HandRight,
    Legs,
    Feet,
    Ring,
    Ammo,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 9] {
        [
            EquipmentSlot::Head,
            EquipmentSlot::Neck,
            EquipmentSlot::Body,
            EquipmentSlot::HandLeft,
            EquipmentSlot::HandRight,
            EquipmentSlot::Legs,
            EquipmentSlot::Feet,
            EquipmentSlot::Ring,
            EquipmentSlot::Ammo,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            EquipmentSlot::Head => "Head",
            EquipmentSlot::Neck => "Neck",
            EquipmentSlot::Body => "Body",
            EquipmentSlot::HandLeft => "Left Hand",
            EquipmentSlot::HandRight => "Right Hand",
            EquipmentSlot::Legs => "Legs",
            EquipmentSlot::Feet => "Feet",
            EquipmentSlot::Ring => "Ring",
            EquipmentSlot::Ammo => "Ammo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Equipment,
    Potion,
    Rune,
    #[default]
    Loot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmmoType {
    Arrow,
    Bolt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    #[default]
    Physical,
    Fire,
    Energy,
    Earth,
    Ice,
    Holy,
    Death,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuneKind {
    Single,
    Area,
    Death,
}

impl RuneKind {
    /// Magic-level multiplier used by the rune damage formula.
    pub fn multiplier(self) -> f64 {
        match self {
            RuneKind::Single => 3.0,
            RuneKind::Area => 3.5,
            RuneKind::Death => 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuneSpec {
    pub kind: RuneKind,
    #[serde(default)]
    pub element: Element,
    #[serde(default)]
    pub magic_level_required: u32,
}

/// Immutable catalog item. Player state only refers to items by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: ItemCategory,
    #[serde(default)]
    pub slot: Option<EquipmentSlot>,
    /// Skill that drives this weapon's damage. Magic means wand or rod.
    #[serde(default)]
    pub scaling: Option<SkillType>,
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    #[serde(default)]
    pub armor: u32,
    #[serde(default)]
    pub two_handed: bool,
    /// Launchers (bows, crossbows) fire this kind of ammunition.
    #[serde(default)]
    pub requires_ammo: Option<AmmoType>,
    /// Set on arrows and bolts.
    #[serde(default)]
    pub ammo_type: Option<AmmoType>,
    /// Ammunition and thrown weapons are equipped as counted stacks.
    #[serde(default)]
    pub stackable: bool,
    /// Chance per attack that one unit of a thrown weapon breaks.
    #[serde(default)]
    pub break_chance: f64,
    #[serde(default)]
    pub level_required: u32,
    /// Empty means every vocation may use it.
    #[serde(default)]
    pub vocations: Vec<Vocation>,
    #[serde(default)]
    pub skill_bonuses: Vec<(SkillType, u32)>,
    #[serde(default)]
    pub loot_bonus_percent: u32,
    #[serde(default)]
    pub restore_hp: u32,
    #[serde(default)]
    pub restore_mana: u32,
    #[serde(default)]
    pub rune: Option<RuneSpec>,
    #[serde(default)]
    pub buy_price: Option<u64>,
    #[serde(default)]
    pub sell_price: u64,
}

impl Item {
    pub fn new(id: &str, name: &str, category: ItemCategory) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            slot: None,
            scaling: None,
            attack: 0,
            defense: 0,
            armor: 0,
            two_handed: false,
            requires_ammo: None,
            ammo_type: None,
            stackable: false,
            break_chance: 0.0,
            level_required: 0,
            vocations: Vec::new(),
            skill_bonuses: Vec::new(),
            loot_bonus_percent: 0,
            restore_hp: 0,
            restore_mana: 0,
            rune: None,
            buy_price: None,
            sell_price: 0,
        }
    }

    pub fn weapon(id: &str, name: &str, scaling: SkillType, attack: u32, defense: u32) -> Self {
        let mut item = Self::new(id, name, ItemCategory::Equipment);
        item.slot = Some(EquipmentSlot::HandRight);
        item.scaling = Some(scaling);
        item.attack = attack;
        item.defense = defense;
        item
    }

    pub fn armor_piece(id: &str, name: &str, slot: EquipmentSlot, armor: u32) -> Self {
        let mut item = Self::new(id, name, ItemCategory::Equipment);
        item.slot = Some(slot);
        item.armor = armor;
        item
    }

    pub fn shield(id: &str, name: &str, defense: u32) -> Self {
        let mut item = Self::new(id, name, ItemCategory::Equipment);
        item.slot = Some(EquipmentSlot::HandLeft);
        item.defense = defense;
        item
    }

    pub fn ammo(id: &str, name: &str, ammo_type: AmmoType, attack: u32) -> Self {
        let mut item = Self::new(id, name, ItemCategory::Equipment);
        item.slot = Some(EquipmentSlot::Ammo);
        item.ammo_type = Some(ammo_type);
        item.attack = attack;
        item.stackable = true;
        item
    }

    pub fn potion(id: &str, name: &str, restore_hp: u32, restore_mana: u32) -> Self {
        let mut item = Self::new(id, name, ItemCategory::Potion);
        item.restore_hp = restore_hp;
        item.restore_mana = restore_mana;
        item
    }

    pub fn rune_item(id: &str, name: &str, kind: RuneKind, element: Element, magic_level: u32) -> Self {
        let mut item = Self::new(id, name, ItemCategory::Rune);
        item.rune = Some(RuneSpec {
            kind,
            element,
            magic_level_required: magic_level,
        });
        item
    }

    pub fn loot(id: &str, name: &str, sell_price: u64) -> Self {
        let mut item = Self::new(id, name, ItemCategory::Loot);
        item.sell_price = sell_price;
        item
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level_required = level;
        self
    }

    pub fn with_vocations(mut self, vocations: &[Vocation]) -> Self {
        self.vocations = vocations.to_vec();
        self
    }

    pub fn with_prices(mut self, buy: Option<u64>, sell: u64) -> Self {
        self.buy_price = buy;
        self.sell_price = sell;
        self
    }

    pub fn with_skill_bonus(mut self, skill: SkillType, amount: u32) -> Self {
        self.skill_bonuses.push((skill, amount));
        self
    }

    pub fn with_loot_bonus(mut self, percent: u32) -> Self {
        self.loot_bonus_percent = percent;
        self
    }

    pub fn with_two_hands(mut self) -> Self {
        self.two_handed = true;
        self
    }

    pub fn launcher(mut self, ammo: AmmoType) -> Self {
        self.requires_ammo = Some(ammo);
        self.two_handed = true;
        self
    }

    pub fn thrown(mut self, break_chance: f64) -> Self {
        self.stackable = true;
        self.break_chance = break_chance;
        self
    }

    pub fn skill_bonus(&self, skill: SkillType) -> u32 {
        self.skill_bonuses
            .iter()
            .filter(|(s, _)| *s == skill)
            .map(|(_, amount)| *amount)
            .sum()
    }

    pub fn allows_vocation(&self, vocation: Vocation) -> bool {
        self.vocations.is_empty() || self.vocations.contains(&vocation)
    }

    pub fn is_thrown(&self) -> bool {
        self.scaling == Some(SkillType::Distance) && self.requires_ammo.is_none() && self.stackable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_bonus_sums_entries() {
        let item = Item::armor_piece("cap", "Cap", EquipmentSlot::Head, 1)
            .with_skill_bonus(SkillType::Magic, 1)
            .with_skill_bonus(SkillType::Magic, 2)
            .with_skill_bonus(SkillType::Sword, 4);
        assert_eq!(item.skill_bonus(SkillType::Magic), 3);
        assert_eq!(item.skill_bonus(SkillType::Sword), 4);
        assert_eq!(item.skill_bonus(SkillType::Axe), 0);
    }

    #[test]
    fn test_vocation_gate() {
        let open = Item::weapon("club", "Club", SkillType::Club, 7, 7);
        assert!(open.allows_vocation(Vocation::None));

        let gated = Item::weapon("wand", "Wand", SkillType::Magic, 13, 0)
            .with_vocations(&[Vocation::Sorcerer]);
        assert!(gated.allows_vocation(Vocation::Sorcerer));
        assert!(!gated.allows_vocation(Vocation::Druid));
    }

    #[test]
    fn test_thrown_vs_launcher() {
        let spear = Item::weapon("spear", "Spear", SkillType::Distance, 25, 0).thrown(0.03);
        let bow = Item::weapon("bow", "Bow", SkillType::Distance, 0, 0).launcher(AmmoType::Arrow);
        assert!(spear.is_thrown());
        assert!(!bow.is_thrown());
        assert!(bow.two_handed);
    }

    #[test]
    fn test_rune_multipliers() {
        assert_eq!(RuneKind::Single.multiplier(), 3.0);
        assert_eq!(RuneKind::Area.multiplier(), 3.5);
        assert_eq!(RuneKind::Death.multiplier(), 8.0);
    }
}
