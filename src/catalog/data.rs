//! Built-in content. Balanced for the default xp stages.

use super::{CatalogData, LootEntry, Monster, Quest, Spell, SpellKind};
use crate::character::skills::SkillType;
use crate::character::vocation::Vocation;
use crate::items::types::{AmmoType, Element, EquipmentSlot, Item, RuneKind};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

const CASTERS: &[Vocation] = &[Vocation::Sorcerer, Vocation::Druid];
const FIGHTERS: &[Vocation] = &[Vocation::Knight, Vocation::Paladin];

pub fn default_data() -> CatalogData {
    CatalogData {
        monsters: monsters(),
        bosses: bosses(),
        items: items(),
        spells: spells(),
        quests: quests(),
        starter_kit: vec![
            ("club".to_string(), 1),
            ("leather_armor".to_string(), 1),
            ("leather_helmet".to_string(), 1),
            ("wooden_shield".to_string(), 1),
            ("health_potion".to_string(), 5),
        ],
    }
}

fn items() -> Vec<Item> {
    vec![
        // Melee
        Item::weapon("club", "Club", SkillType::Club, 7, 7).with_prices(Some(5), 1),
        Item::weapon("mace", "Mace", SkillType::Club, 16, 11).with_prices(Some(90), 30),
        Item::weapon("sabre", "Sabre", SkillType::Sword, 12, 10).with_prices(Some(35), 12),
        Item::weapon("sword", "Sword", SkillType::Sword, 14, 12).with_prices(Some(85), 25),
        Item::weapon("hatchet", "Hatchet", SkillType::Axe, 15, 8).with_prices(Some(25), 10),
        Item::weapon("barbarian_axe", "Barbarian Axe", SkillType::Axe, 28, 18)
            .with_level(18)
            .with_prices(Some(590), 185),
        Item::weapon("two_handed_sword", "Two Handed Sword", SkillType::Sword, 30, 25)
            .with_two_hands()
            .with_level(20)
            .with_prices(Some(950), 450),
        Item::weapon("war_hammer", "War Hammer", SkillType::Club, 45, 10)
            .with_two_hands()
            .with_level(50)
            .with_vocations(&[Vocation::Knight])
            .with_prices(None, 470),
        // Distance
        Item::weapon("bow", "Bow", SkillType::Distance, 0, 0)
            .launcher(AmmoType::Arrow)
            .with_prices(Some(400), 100),
        Item::weapon("crossbow", "Crossbow", SkillType::Distance, 0, 0)
            .launcher(AmmoType::Bolt)
            .with_level(10)
            .with_prices(Some(500), 120),
        Item::ammo("arrow", "Arrow", AmmoType::Arrow, 25).with_prices(Some(3), 0),
        Item::ammo("bolt", "Bolt", AmmoType::Bolt, 30).with_prices(Some(4), 0),
        Item::ammo("piercing_bolt", "Piercing Bolt", AmmoType::Bolt, 40)
            .with_level(30)
            .with_prices(Some(5), 0),
        Item::weapon("spear", "Spear", SkillType::Distance, 25, 0)
            .thrown(0.03)
            .with_prices(Some(9), 3),
        Item::weapon("throwing_knife", "Throwing Knife", SkillType::Distance, 25, 0)
            .thrown(0.07)
            .with_prices(Some(25), 2),
        Item::weapon("throwing_star", "Throwing Star", SkillType::Distance, 24, 0)
            .thrown(0.10)
            .with_prices(Some(42), 0),
        Item::weapon("hunting_spear", "Hunting Spear", SkillType::Distance, 30, 0)
            .thrown(0.06)
            .with_level(20)
            .with_prices(None, 25),
        Item::weapon("royal_spear", "Royal Spear", SkillType::Distance, 35, 0)
            .thrown(0.03)
            .with_level(25)
            .with_vocations(&[Vocation::Paladin])
            .with_prices(Some(15), 3),
        Item::weapon("enchanted_spear", "Enchanted Spear", SkillType::Distance, 38, 0)
            .thrown(0.015)
            .with_level(42)
            .with_vocations(&[Vocation::Paladin])
            .with_prices(Some(30), 4),
        // Wands and rods
        Item::weapon("wand_of_vortex", "Wand of Vortex", SkillType::Magic, 13, 0)
            .with_vocations(&[Vocation::Sorcerer])
            .with_level(6)
            .with_prices(Some(500), 100),
        Item::weapon("snakebite_rod", "Snakebite Rod", SkillType::Magic, 13, 0)
            .with_vocations(&[Vocation::Druid])
            .with_level(6)
            .with_prices(Some(500), 100),
        Item::weapon("wand_of_inferno", "Wand of Inferno", SkillType::Magic, 38, 0)
            .with_vocations(&[Vocation::Sorcerer])
            .with_level(33)
            .with_prices(Some(15_000), 3_000),
        // Shields
        Item::shield("wooden_shield", "Wooden Shield", 14).with_prices(Some(15), 5),
        Item::shield("dwarven_shield", "Dwarven Shield", 26).with_prices(Some(500), 100),
        Item::shield("dragon_shield", "Dragon Shield", 31)
            .with_level(30)
            .with_vocations(FIGHTERS)
            .with_prices(None, 4_000),
        Item::shield("spellbook", "Spellbook", 14)
            .with_vocations(CASTERS)
            .with_skill_bonus(SkillType::Magic, 1)
            .with_prices(Some(150), 50),
        // Armor
        Item::armor_piece("leather_helmet", "Leather Helmet", EquipmentSlot::Head, 1).with_prices(Some(12), 4),
        Item::armor_piece("chain_helmet", "Chain Helmet", EquipmentSlot::Head, 2).with_prices(Some(52), 17),
        Item::armor_piece("mage_hat", "Mage Hat", EquipmentSlot::Head, 1)
            .with_vocations(CASTERS)
            .with_skill_bonus(SkillType::Magic, 2)
            .with_prices(None, 150),
        Item::armor_piece("leather_armor", "Leather Armor", EquipmentSlot::Body, 4).with_prices(Some(35), 12),
        Item::armor_piece("chain_armor", "Chain Armor", EquipmentSlot::Body, 6).with_prices(Some(200), 70),
        Item::armor_piece("plate_armor", "Plate Armor", EquipmentSlot::Body, 10)
            .with_vocations(FIGHTERS)
            .with_prices(Some(1_200), 400),
        Item::armor_piece("leather_legs", "Leather Legs", EquipmentSlot::Legs, 1).with_prices(Some(10), 9),
        Item::armor_piece("brass_legs", "Brass Legs", EquipmentSlot::Legs, 5).with_prices(Some(195), 49),
        Item::armor_piece("leather_boots", "Leather Boots", EquipmentSlot::Feet, 1).with_prices(Some(10), 2),
        Item::armor_piece("boots_of_haste", "Boots of Haste", EquipmentSlot::Feet, 2).with_prices(None, 30_000),
        Item::armor_piece("protection_amulet", "Protection Amulet", EquipmentSlot::Neck, 2).with_prices(Some(700), 100),
        Item::armor_piece("scarab_amulet", "Scarab Amulet", EquipmentSlot::Neck, 2)
            .with_loot_bonus(5)
            .with_prices(None, 200),
        // Rings
        Item::armor_piece("ring_of_shielding", "Ring of Shielding", EquipmentSlot::Ring, 0)
            .with_skill_bonus(SkillType::Defense, 3)
            .with_prices(Some(1_000), 250),
        Item::armor_piece("sword_ring", "Sword Ring", EquipmentSlot::Ring, 0)
            .with_skill_bonus(SkillType::Sword, 4)
            .with_prices(Some(500), 100),
        Item::armor_piece("axe_ring", "Axe Ring", EquipmentSlot::Ring, 0)
            .with_skill_bonus(SkillType::Axe, 4)
            .with_prices(Some(500), 100),
        Item::armor_piece("club_ring", "Club Ring", EquipmentSlot::Ring, 0)
            .with_skill_bonus(SkillType::Club, 4)
            .with_prices(Some(500), 100),
        Item::armor_piece("ring_of_fortune", "Ring of Fortune", EquipmentSlot::Ring, 0)
            .with_loot_bonus(15)
            .with_prices(None, 2_000),
        // Potions
        Item::potion("health_potion", "Health Potion", 75, 0).with_prices(Some(50), 0),
        Item::potion("strong_health_potion", "Strong Health Potion", 150, 0)
            .with_level(50)
            .with_vocations(FIGHTERS)
            .with_prices(Some(115), 0),
        Item::potion("great_health_potion", "Great Health Potion", 325, 0)
            .with_level(80)
            .with_vocations(&[Vocation::Knight])
            .with_prices(Some(225), 0),
        Item::potion("mana_potion", "Mana Potion", 0, 75).with_prices(Some(56), 0),
        Item::potion("strong_mana_potion", "Strong Mana Potion", 0, 115)
            .with_level(50)
            .with_vocations(&[Vocation::Paladin, Vocation::Sorcerer, Vocation::Druid])
            .with_prices(Some(93), 0),
        Item::potion("great_mana_potion", "Great Mana Potion", 0, 200)
            .with_level(80)
            .with_vocations(CASTERS)
            .with_prices(Some(144), 0),
        // Runes
        Item::rune_item("heavy_magic_missile", "Heavy Magic Missile Rune", RuneKind::Single, Element::Energy, 3)
            .with_prices(Some(12), 0),
        Item::rune_item("icicle", "Icicle Rune", RuneKind::Single, Element::Ice, 8)
            .with_vocations(&[Vocation::Druid])
            .with_prices(Some(30), 0),
        Item::rune_item("great_fireball", "Great Fireball Rune", RuneKind::Area, Element::Fire, 4)
            .with_prices(Some(57), 0),
        Item::rune_item("avalanche", "Avalanche Rune", RuneKind::Area, Element::Ice, 4)
            .with_prices(Some(57), 0),
        Item::rune_item("sudden_death", "Sudden Death Rune", RuneKind::Death, Element::Death, 15)
            .with_vocations(&[Vocation::Sorcerer])
            .with_prices(Some(135), 0),
        // Creature products
        Item::loot("meat", "Meat", 2),
        Item::loot("cheese", "Cheese", 2),
        Item::loot("ham", "Ham", 4),
        Item::loot("wolf_paw", "Wolf Paw", 70),
        Item::loot("bone", "Bone", 1),
        Item::loot("orc_tooth", "Orc Tooth", 150),
        Item::loot("minotaur_leather", "Minotaur Leather", 80),
        Item::loot("cyclops_toe", "Cyclops Toe", 55),
        Item::loot("spider_silk", "Spider Silk", 100),
        Item::loot("green_dragon_leather", "Green Dragon Leather", 100),
        Item::loot("green_dragon_scale", "Green Dragon Scale", 100),
        Item::loot("red_dragon_scale", "Red Dragon Scale", 200),
        Item::loot("demon_horn", "Demon Horn", 1_000),
        Item::loot("small_diamond", "Small Diamond", 300),
        Item::loot("giant_shimmering_pearl", "Giant Shimmering Pearl", 3_000),
    ]
}

fn monsters() -> Vec<Monster> {
    vec![
        Monster::new("rat", "Rat", 1, 20, (0, 8), (0, 4), 5).with_loot(vec![
            LootEntry::new("cheese", 0.4, 1),
            LootEntry::new("meat", 0.2, 2),
        ]),
        Monster::new("wolf", "Wolf", 3, 25, (0, 19), (0, 0), 18).with_loot(vec![
            LootEntry::new("meat", 0.5, 3),
            LootEntry::new("wolf_paw", 0.01, 1),
        ]),
        Monster::new("troll", "Troll", 5, 50, (0, 24), (0, 12), 20).with_loot(vec![
            LootEntry::new("ham", 0.3, 2),
            LootEntry::new("hatchet", 0.05, 1),
            LootEntry::new("leather_helmet", 0.1, 1),
            LootEntry::new("spear", 0.13, 2),
        ]),
        Monster::new("orc", "Orc", 10, 70, (0, 40), (0, 15), 25).with_loot(vec![
            LootEntry::new("meat", 0.3, 1),
            LootEntry::new("sabre", 0.07, 1),
            LootEntry::new("orc_tooth", 0.02, 1),
            LootEntry::new("chain_helmet", 0.03, 1),
        ]),
        Monster::new("skeleton", "Skeleton", 12, 50, (0, 30), (0, 10), 35)
            .with_element(Element::Holy, 1.25)
            .with_element(Element::Death, 0.0)
            .with_loot(vec![
                LootEntry::new("bone", 0.5, 2),
                LootEntry::new("mace", 0.05, 1),
            ]),
        Monster::new("minotaur", "Minotaur", 15, 100, (0, 45), (0, 20), 50).with_loot(vec![
            LootEntry::new("minotaur_leather", 0.05, 1),
            LootEntry::new("chain_armor", 0.02, 1),
            LootEntry::new("brass_legs", 0.01, 1),
            LootEntry::new("bolt", 0.2, 8),
        ]),
        Monster::new("cyclops", "Cyclops", 30, 260, (0, 105), (0, 47), 150).with_loot(vec![
            LootEntry::new("cyclops_toe", 0.1, 1),
            LootEntry::new("dwarven_shield", 0.01, 1),
            LootEntry::new("club_ring", 0.005, 1),
            LootEntry::new("meat", 0.5, 2),
        ]),
        Monster::new("giant_spider", "Giant Spider", 60, 1_300, (0, 300), (0, 100), 900)
            .with_element(Element::Fire, 1.1)
            .with_element(Element::Earth, 0.0)
            .with_loot(vec![
                LootEntry::new("spider_silk", 0.1, 1),
                LootEntry::new("plate_armor", 0.05, 1),
                LootEntry::new("strong_health_potion", 0.1, 2),
                LootEntry::new("ring_of_shielding", 0.01, 1),
            ]),
        Monster::new("dragon", "Dragon", 80, 1_000, (0, 240), (0, 105), 700)
            .with_element(Element::Fire, 0.0)
            .with_element(Element::Ice, 1.1)
            .with_loot(vec![
                LootEntry::new("green_dragon_leather", 0.1, 1),
                LootEntry::new("green_dragon_scale", 0.05, 1),
                LootEntry::new("dragon_shield", 0.004, 1),
                LootEntry::new("ham", 0.6, 3),
            ]),
        Monster::new("dragon_lord", "Dragon Lord", 100, 1_900, (0, 400), (0, 210), 2_100)
            .with_element(Element::Fire, 0.0)
            .with_element(Element::Ice, 1.1)
            .with_loot(vec![
                LootEntry::new("red_dragon_scale", 0.05, 1),
                LootEntry::new("small_diamond", 0.05, 5),
                LootEntry::new("royal_spear", 0.1, 3),
                LootEntry::new("strong_mana_potion", 0.05, 1),
            ]),
        Monster::new("demon", "Demon", 200, 8_200, (0, 650), (0, 300), 6_000)
            .with_element(Element::Holy, 1.12)
            .with_element(Element::Fire, 0.0)
            .with_element(Element::Ice, 1.12)
            .with_loot(vec![
                LootEntry::new("demon_horn", 0.05, 1),
                LootEntry::new("great_mana_potion", 0.2, 3),
                LootEntry::new("giant_shimmering_pearl", 0.01, 1),
                LootEntry::new("ring_of_fortune", 0.005, 1),
            ]),
    ]
}

fn bosses() -> Vec<Monster> {
    vec![
        Monster::new("munster", "Munster", 8, 58, (0, 20), (20, 60), 35)
            .with_cooldown(2 * HOUR_MS)
            .with_loot(vec![
                LootEntry::new("cheese", 1.0, 3),
                LootEntry::new("leather_legs", 0.5, 1),
            ]),
        Monster::new("the_old_widow", "The Old Widow", 70, 3_200, (0, 300), (100, 400), 4_200)
            .with_cooldown(4 * HOUR_MS)
            .with_element(Element::Fire, 1.1)
            .with_loot(vec![
                LootEntry::new("spider_silk", 1.0, 5),
                LootEntry::new("scarab_amulet", 0.2, 1),
                LootEntry::new("boots_of_haste", 0.02, 1),
            ]),
        Monster::new("demodras", "Demodras", 100, 4_500, (0, 500), (200, 800), 6_000)
            .with_cooldown(8 * HOUR_MS)
            .with_element(Element::Fire, 0.0)
            .with_loot(vec![
                LootEntry::new("red_dragon_scale", 1.0, 2),
                LootEntry::new("dragon_shield", 0.3, 1),
                LootEntry::new("mage_hat", 0.1, 1),
            ]),
    ]
}

#[allow(clippy::too_many_arguments)]
fn spell(
    id: &str,
    name: &str,
    words: &str,
    kind: SpellKind,
    element: Element,
    mana_cost: u32,
    level_required: u32,
    magic_level_required: u32,
) -> Spell {
    Spell {
        id: id.to_string(),
        name: name.to_string(),
        words: words.to_string(),
        kind,
        element,
        mana_cost,
        level_required,
        magic_level_required,
        cooldown_ms: 2_000,
        vocations: Vec::new(),
        price: 0,
        heal_power: 0,
    }
}

fn spells() -> Vec<Spell> {
    vec![
        Spell {
            cooldown_ms: 1_000,
            price: 170,
            heal_power: 5,
            ..spell("light_healing", "Light Healing", "exura", SpellKind::Heal, Element::Holy, 20, 8, 0)
        },
        Spell {
            cooldown_ms: 1_000,
            price: 350,
            heal_power: 10,
            vocations: vec![Vocation::Paladin, Vocation::Sorcerer, Vocation::Druid],
            ..spell("intense_healing", "Intense Healing", "exura gran", SpellKind::Heal, Element::Holy, 70, 20, 4)
        },
        Spell {
            cooldown_ms: 1_000,
            price: 1_000,
            heal_power: 20,
            vocations: CASTERS.to_vec(),
            ..spell("ultimate_healing", "Ultimate Healing", "exura vita", SpellKind::Heal, Element::Holy, 160, 30, 8)
        },
        Spell {
            cooldown_ms: 1_000,
            price: 500,
            heal_power: 5,
            vocations: vec![Vocation::Knight],
            ..spell("wound_cleansing", "Wound Cleansing", "exura ico", SpellKind::Heal, Element::Holy, 40, 8, 0)
        },
        Spell {
            price: 800,
            vocations: CASTERS.to_vec(),
            ..spell("energy_strike", "Energy Strike", "exori vis", SpellKind::Attack, Element::Energy, 20, 12, 3)
        },
        Spell {
            price: 800,
            vocations: CASTERS.to_vec(),
            ..spell("flame_strike", "Flame Strike", "exori flam", SpellKind::Attack, Element::Fire, 20, 14, 3)
        },
        Spell {
            price: 800,
            vocations: vec![Vocation::Druid],
            ..spell("terra_strike", "Terra Strike", "exori tera", SpellKind::Attack, Element::Earth, 20, 13, 3)
        },
        Spell {
            cooldown_ms: 4_000,
            price: 1_800,
            vocations: vec![Vocation::Sorcerer],
            ..spell("great_energy_beam", "Great Energy Beam", "exevo gran vis lux", SpellKind::Attack, Element::Energy, 110, 29, 10)
        },
        Spell {
            cooldown_ms: 40_000,
            price: 8_000,
            vocations: vec![Vocation::Sorcerer],
            ..spell("hells_core", "Hell's Core", "exevo gran mas flam", SpellKind::Attack, Element::Fire, 1_100, 60, 40)
        },
        Spell {
            price: 1_000,
            vocations: vec![Vocation::Knight],
            ..spell("brutal_strike", "Brutal Strike", "exori ico", SpellKind::Attack, Element::Physical, 30, 16, 0)
        },
        Spell {
            price: 1_100,
            vocations: vec![Vocation::Paladin],
            ..spell("ethereal_spear", "Ethereal Spear", "exori con", SpellKind::Attack, Element::Physical, 25, 23, 1)
        },
    ]
}

fn quests() -> Vec<Quest> {
    vec![
        Quest {
            id: "rat_plague".to_string(),
            name: "Rat Plague".to_string(),
            monster_id: "rat".to_string(),
            kills_required: 50,
            reward_xp: 500,
            reward_gold: 100,
            reward_item: Some(("leather_boots".to_string(), 1)),
        },
        Quest {
            id: "orc_raiders".to_string(),
            name: "Orc Raiders".to_string(),
            monster_id: "orc".to_string(),
            kills_required: 150,
            reward_xp: 5_000,
            reward_gold: 1_000,
            reward_item: Some(("sword_ring".to_string(), 1)),
        },
        Quest {
            id: "cyclops_camp".to_string(),
            name: "Cyclops Camp".to_string(),
            monster_id: "cyclops".to_string(),
            kills_required: 300,
            reward_xp: 40_000,
            reward_gold: 5_000,
            reward_item: Some(("dwarven_shield".to_string(), 1)),
        },
        Quest {
            id: "dragon_hoard".to_string(),
            name: "Dragon Hoard".to_string(),
            monster_id: "dragon".to_string(),
            kills_required: 500,
            reward_xp: 350_000,
            reward_gold: 30_000,
            reward_item: Some(("dragon_shield".to_string(), 1)),
        },
        Quest {
            id: "cheese_thief".to_string(),
            name: "The Cheese Thief".to_string(),
            monster_id: "munster".to_string(),
            kills_required: 1,
            reward_xp: 1_000,
            reward_gold: 250,
            reward_item: None,
        },
    ]
}
