//! Player intents and their handlers.
//!
//! Every handler either mutates the state and returns a short description
//! of what happened, or returns a [`Rejected`] reason and leaves the state
//! untouched. Nothing here panics on bad input.

use crate::catalog::Catalog;
use crate::character::skills::SkillType;
use crate::character::vocation::Vocation;
use crate::combat::types::group_hp;
use crate::core::balance::blessing_price;
use crate::core::constants::{MAX_GROUP_SIZE, VOCATION_MIN_LEVEL};
use crate::core::game_logic::recompute_pools;
use crate::core::game_state::{Activity, AutomationSettings, Hunt, PlayerState};
use crate::items::equipment::EquippedItem;
use crate::items::types::{EquipmentSlot, ItemCategory};
use crate::rewards::{quests, tasks};
use rand::Rng;
use thiserror::Error;

/// Why a command was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("not enough gold: {needed} needed, {available} available")]
    InsufficientGold { needed: u64, available: u64 },

    #[error("not enough gold in the bank: {needed} needed, {available} available")]
    InsufficientBankGold { needed: u64, available: u64 },

    #[error("requires level {required}")]
    LevelTooLow { required: u32 },

    #[error("requires magic level {required}")]
    MagicLevelTooLow { required: u32 },

    #[error("your vocation cannot do that")]
    WrongVocation,

    #[error("you do not have enough {0}")]
    MissingItem(String),

    #[error("unknown item: {0}")]
    UnknownItem(String),

    #[error("unknown monster: {0}")]
    UnknownMonster(String),

    #[error("unknown spell: {0}")]
    UnknownSpell(String),

    #[error("unknown quest: {0}")]
    UnknownQuest(String),

    #[error("{0} cannot be equipped")]
    NotEquippable(String),

    #[error("{0} cannot be used")]
    NotUsable(String),

    #[error("{0} is not sold here")]
    NotForSale(String),

    #[error("nobody buys {0}")]
    NotSellable(String),

    #[error("nothing is equipped there")]
    SlotEmpty,

    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("group size must be between 1 and {max}")]
    InvalidGroupSize { max: u32 },

    #[error("that boss returns in {remaining_ms} ms")]
    BossOnCooldown { remaining_ms: i64 },

    #[error("you are not hunting")]
    NotHunting,

    #[error("you are not training")]
    NotTraining,

    #[error("you have not learned {0}")]
    SpellNotLearned(String),

    #[error("you already know {0}")]
    AlreadyLearned(String),

    #[error("not enough mana: {needed} needed, {available} available")]
    NotEnoughMana { needed: u32, available: u32 },

    #[error("still on cooldown for {remaining_ms} ms")]
    OnCooldown { remaining_ms: i64 },

    #[error("you are already blessed")]
    AlreadyBlessed,

    #[error("a vocation has already been chosen")]
    VocationAlreadyChosen,

    #[error("that is not a vocation you can choose")]
    InvalidVocation,

    #[error("finish or cancel your current task first")]
    TaskAlreadyActive,

    #[error("there is no task option {0}")]
    NoSuchTask(usize),

    #[error("you have no active task")]
    NoActiveTask,

    #[error("task not finished: {kills}/{required} kills")]
    TaskIncomplete { kills: u32, required: u32 },

    #[error("quest not finished: {kills}/{required} kills")]
    QuestIncomplete { kills: u32, required: u32 },

    #[error("quest reward already claimed")]
    QuestAlreadyClaimed,
}

/// A discrete player intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    StartHunt {
        monster_id: String,
        is_boss: bool,
        group_size: u32,
    },
    StopHunt,
    StartTraining { skill: SkillType },
    StopTraining,
    Equip { item_id: String },
    Unequip { slot: EquipmentSlot },
    DepositItem { item_id: String, quantity: u32 },
    WithdrawItem { item_id: String, quantity: u32 },
    DepositGold { amount: u64 },
    WithdrawGold { amount: u64 },
    BuyItem { item_id: String, quantity: u32 },
    SellItem { item_id: String, quantity: u32 },
    BuySpell { spell_id: String },
    BuyBlessing,
    ChooseVocation { vocation: Vocation },
    AcceptTask { index: usize },
    CancelTask,
    ClaimTask,
    RerollTasks,
    ClaimQuest { quest_id: String },
    ToggleSkippedLoot { item_id: String },
    UpdateSettings { settings: AutomationSettings },
    UsePotion { item_id: String },
}

/// Applies one command. On success returns a player-facing message.
pub fn apply_command<R: Rng>(
    state: &mut PlayerState,
    catalog: &Catalog,
    command: Command,
    now_ms: i64,
    rng: &mut R,
) -> Result<String, Rejected> {
    match command {
        Command::StartHunt {
            monster_id,
            is_boss,
            group_size,
        } => start_hunt(state, catalog, &monster_id, is_boss, group_size, now_ms),
        Command::StopHunt => {
            if !state.is_hunting() {
                return Err(Rejected::NotHunting);
            }
            state.stop_activity();
            Ok("You stop hunting.".to_string())
        }
        Command::StartTraining { skill } => {
            state.activity = Activity::Training { skill };
            Ok(format!("You begin training {}.", skill.name()))
        }
        Command::StopTraining => {
            if state.training_skill().is_none() {
                return Err(Rejected::NotTraining);
            }
            state.stop_activity();
            Ok("You stop training.".to_string())
        }
        Command::Equip { item_id } => equip(state, catalog, &item_id),
        Command::Unequip { slot } => unequip(state, catalog, slot),
        Command::DepositItem { item_id, quantity } => {
            if quantity == 0 {
                return Err(Rejected::InvalidQuantity);
            }
            if !state.inventory.remove(&item_id, quantity) {
                return Err(Rejected::MissingItem(item_id));
            }
            state.depot.add(&item_id, quantity);
            Ok(format!("Deposited {}x {}.", quantity, item_name(catalog, &item_id)))
        }
        Command::WithdrawItem { item_id, quantity } => {
            if quantity == 0 {
                return Err(Rejected::InvalidQuantity);
            }
            if !state.depot.remove(&item_id, quantity) {
                return Err(Rejected::MissingItem(item_id));
            }
            state.inventory.add(&item_id, quantity);
            Ok(format!("Withdrew {}x {}.", quantity, item_name(catalog, &item_id)))
        }
        Command::DepositGold { amount } => {
            if amount == 0 {
                return Err(Rejected::InvalidQuantity);
            }
            if state.gold < amount {
                return Err(Rejected::InsufficientGold {
                    needed: amount,
                    available: state.gold,
                });
            }
            state.gold -= amount;
            state.bank_gold = state.bank_gold.saturating_add(amount);
            Ok(format!("Deposited {} gold.", amount))
        }
        Command::WithdrawGold { amount } => {
            if amount == 0 {
                return Err(Rejected::InvalidQuantity);
            }
            if state.bank_gold < amount {
                return Err(Rejected::InsufficientBankGold {
                    needed: amount,
                    available: state.bank_gold,
                });
            }
            state.bank_gold -= amount;
            state.gold = state.gold.saturating_add(amount);
            Ok(format!("Withdrew {} gold.", amount))
        }
        Command::BuyItem { item_id, quantity } => buy_item(state, catalog, &item_id, quantity),
        Command::SellItem { item_id, quantity } => sell_item(state, catalog, &item_id, quantity),
        Command::BuySpell { spell_id } => buy_spell(state, catalog, &spell_id),
        Command::BuyBlessing => {
            if state.has_blessing {
                return Err(Rejected::AlreadyBlessed);
            }
            let price = blessing_price(state.level);
            pay(state, price)?;
            state.has_blessing = true;
            Ok(format!("You are blessed for {} gold.", price))
        }
        Command::ChooseVocation { vocation } => choose_vocation(state, vocation),
        Command::AcceptTask { index } => {
            tasks::accept_task(state, index)?;
            let name = state
                .active_task
                .as_ref()
                .map(|task| format!("{}x {}", task.kills_required, task.monster_name))
                .unwrap_or_default();
            Ok(format!("Task accepted: hunt {}.", name))
        }
        Command::CancelTask => {
            let task = tasks::cancel_task(state)?;
            tasks::ensure_task_options(state, catalog, rng);
            Ok(format!("Task against {} cancelled.", task.monster_name))
        }
        Command::ClaimTask => {
            let reward = tasks::claim_task(state)?;
            tasks::ensure_task_options(state, catalog, rng);
            Ok(format!(
                "Task complete! +{} xp, +{} gold.",
                reward.xp, reward.gold
            ))
        }
        Command::RerollTasks => {
            tasks::reroll_tasks(state, catalog, rng)?;
            Ok("New tasks are on offer.".to_string())
        }
        Command::ClaimQuest { quest_id } => {
            let reward = quests::claim_quest(state, catalog, &quest_id)?;
            Ok(format!(
                "Quest '{}' complete! +{} xp, +{} gold.",
                reward.quest_name, reward.xp, reward.gold
            ))
        }
        Command::ToggleSkippedLoot { item_id } => {
            if catalog.find_item(&item_id).is_none() {
                return Err(Rejected::UnknownItem(item_id));
            }
            if state.skipped_loot.remove(&item_id) {
                Ok(format!("You will pick up {} again.", item_name(catalog, &item_id)))
            } else {
                let message = format!("You will leave {} behind.", item_name(catalog, &item_id));
                state.skipped_loot.insert(item_id);
                Ok(message)
            }
        }
        Command::UpdateSettings { mut settings } => {
            settings.health_potion_threshold = settings.health_potion_threshold.min(100);
            settings.mana_potion_threshold = settings.mana_potion_threshold.min(100);
            settings.heal_spell_threshold = settings.heal_spell_threshold.min(100);
            state.settings = settings;
            Ok("Settings updated.".to_string())
        }
        Command::UsePotion { item_id } => {
            let (hp, mana) = use_potion(state, catalog, &item_id)?;
            Ok(format!(
                "You drink a {} (+{} hp, +{} mana).",
                item_name(catalog, &item_id),
                hp,
                mana
            ))
        }
    }
}

fn item_name(catalog: &Catalog, item_id: &str) -> String {
    catalog
        .find_item(item_id)
        .map(|item| item.name.clone())
        .unwrap_or_else(|| item_id.to_string())
}

fn pay(state: &mut PlayerState, price: u64) -> Result<(), Rejected> {
    if state.gold < price {
        return Err(Rejected::InsufficientGold {
            needed: price,
            available: state.gold,
        });
    }
    state.gold -= price;
    Ok(())
}

fn start_hunt(
    state: &mut PlayerState,
    catalog: &Catalog,
    monster_id: &str,
    is_boss: bool,
    group_size: u32,
    now_ms: i64,
) -> Result<String, Rejected> {
    let monster = catalog
        .find_target(monster_id, is_boss)
        .ok_or_else(|| Rejected::UnknownMonster(monster_id.to_string()))?;
    let max = if is_boss { 1 } else { MAX_GROUP_SIZE };
    if group_size == 0 || group_size > max {
        return Err(Rejected::InvalidGroupSize { max });
    }
    if is_boss {
        if let Some(remaining_ms) = state.boss_cooldown_remaining(monster_id, now_ms) {
            return Err(Rejected::BossOnCooldown { remaining_ms });
        }
    }

    state.activity = Activity::Hunting(Hunt {
        monster_id: monster.id.clone(),
        is_boss,
        group_size,
        monster_hp: group_hp(monster, group_size),
    });
    if group_size > 1 {
        Ok(format!("You lure {} {}s.", group_size, monster.name))
    } else {
        Ok(format!("You start hunting {}.", monster.name))
    }
}

/// Moves an item from the backpack into its equipment slot.
///
/// Stackable items move as a whole stack. Two-handed weapons clear the
/// off-hand and an off-hand item clears a two-handed weapon.
fn equip(state: &mut PlayerState, catalog: &Catalog, item_id: &str) -> Result<String, Rejected> {
    let item = catalog
        .find_item(item_id)
        .ok_or_else(|| Rejected::UnknownItem(item_id.to_string()))?;
    let slot = item
        .slot
        .ok_or_else(|| Rejected::NotEquippable(item.name.clone()))?;
    if state.inventory.count(item_id) == 0 {
        return Err(Rejected::MissingItem(item_id.to_string()));
    }
    if state.level < item.level_required {
        return Err(Rejected::LevelTooLow {
            required: item.level_required,
        });
    }
    if !item.allows_vocation(state.vocation) {
        return Err(Rejected::WrongVocation);
    }

    let equipped = if item.stackable {
        let mut count = state.inventory.take_all(item_id);
        if let Some(current) = state.equipment.get(slot) {
            if current.item_id == item_id {
                count = count.saturating_add(current.units());
                state.equipment.take(slot);
            }
        }
        EquippedItem::stack(item_id, slot, count)
    } else {
        state.inventory.remove(item_id, 1);
        EquippedItem::new(item_id, slot)
    };

    let blocking_slot = match slot {
        EquipmentSlot::HandRight if item.two_handed => Some(EquipmentSlot::HandLeft),
        EquipmentSlot::HandLeft => state
            .equipment
            .get(EquipmentSlot::HandRight)
            .and_then(|weapon| catalog.find_item(&weapon.item_id))
            .filter(|weapon| weapon.two_handed)
            .map(|_| EquipmentSlot::HandRight),
        _ => None,
    };
    if let Some(blocking) = blocking_slot {
        if let Some(removed) = state.equipment.take(blocking) {
            state.inventory.add(&removed.item_id, removed.units());
        }
    }

    if let Some(previous) = state.equipment.set(equipped) {
        state.inventory.add(&previous.item_id, previous.units());
    }
    Ok(format!("You equip {}.", item.name))
}

fn unequip(state: &mut PlayerState, catalog: &Catalog, slot: EquipmentSlot) -> Result<String, Rejected> {
    let removed = state.equipment.take(slot).ok_or(Rejected::SlotEmpty)?;
    state.inventory.add(&removed.item_id, removed.units());
    Ok(format!("You take off {}.", item_name(catalog, &removed.item_id)))
}

fn buy_item(
    state: &mut PlayerState,
    catalog: &Catalog,
    item_id: &str,
    quantity: u32,
) -> Result<String, Rejected> {
    let item = catalog
        .find_item(item_id)
        .ok_or_else(|| Rejected::UnknownItem(item_id.to_string()))?;
    let price = item
        .buy_price
        .ok_or_else(|| Rejected::NotForSale(item.name.clone()))?;
    if quantity == 0 {
        return Err(Rejected::InvalidQuantity);
    }
    let total = price.saturating_mul(quantity as u64);
    pay(state, total)?;
    state.inventory.add(item_id, quantity);
    Ok(format!("Bought {}x {} for {} gold.", quantity, item.name, total))
}

fn sell_item(
    state: &mut PlayerState,
    catalog: &Catalog,
    item_id: &str,
    quantity: u32,
) -> Result<String, Rejected> {
    let item = catalog
        .find_item(item_id)
        .ok_or_else(|| Rejected::UnknownItem(item_id.to_string()))?;
    if item.sell_price == 0 {
        return Err(Rejected::NotSellable(item.name.clone()));
    }
    if quantity == 0 {
        return Err(Rejected::InvalidQuantity);
    }
    if !state.inventory.remove(item_id, quantity) {
        return Err(Rejected::MissingItem(item_id.to_string()));
    }
    let total = item.sell_price.saturating_mul(quantity as u64);
    state.gold = state.gold.saturating_add(total);
    Ok(format!("Sold {}x {} for {} gold.", quantity, item.name, total))
}

fn buy_spell(state: &mut PlayerState, catalog: &Catalog, spell_id: &str) -> Result<String, Rejected> {
    let spell = catalog
        .find_spell(spell_id)
        .ok_or_else(|| Rejected::UnknownSpell(spell_id.to_string()))?;
    if state.purchased_spells.contains(spell_id) {
        return Err(Rejected::AlreadyLearned(spell.name.clone()));
    }
    if !spell.allows_vocation(state.vocation) {
        return Err(Rejected::WrongVocation);
    }
    if state.level < spell.level_required {
        return Err(Rejected::LevelTooLow {
            required: spell.level_required,
        });
    }
    pay(state, spell.price)?;
    state.purchased_spells.insert(spell.id.clone());
    Ok(format!("You learned {} ({}).", spell.name, spell.words))
}

fn choose_vocation(state: &mut PlayerState, vocation: Vocation) -> Result<String, Rejected> {
    if state.vocation != Vocation::None {
        return Err(Rejected::VocationAlreadyChosen);
    }
    if vocation == Vocation::None {
        return Err(Rejected::InvalidVocation);
    }
    if state.level < VOCATION_MIN_LEVEL {
        return Err(Rejected::LevelTooLow {
            required: VOCATION_MIN_LEVEL,
        });
    }
    state.vocation = vocation;
    recompute_pools(state);
    Ok(format!("You are now a {}.", vocation.name()))
}

/// Drinks one potion from the backpack. Returns `(hp, mana)` restored.
pub fn use_potion(
    state: &mut PlayerState,
    catalog: &Catalog,
    item_id: &str,
) -> Result<(u32, u32), Rejected> {
    let item = catalog
        .find_item(item_id)
        .ok_or_else(|| Rejected::UnknownItem(item_id.to_string()))?;
    if item.category != ItemCategory::Potion {
        return Err(Rejected::NotUsable(item.name.clone()));
    }
    if state.level < item.level_required {
        return Err(Rejected::LevelTooLow {
            required: item.level_required,
        });
    }
    if !item.allows_vocation(state.vocation) {
        return Err(Rejected::WrongVocation);
    }
    if !state.inventory.remove(item_id, 1) {
        return Err(Rejected::MissingItem(item_id.to_string()));
    }
    let hp = state.heal(item.restore_hp);
    let mana = state.restore_mana(item.restore_mana);
    Ok((hp, mana))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn run(state: &mut PlayerState, catalog: &Catalog, command: Command) -> Result<String, Rejected> {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        apply_command(state, catalog, command, 0, &mut rng)
    }

    #[test]
    fn test_start_hunt_replaces_training() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Hunter".to_string(), 0);
        run(&mut state, &catalog, Command::StartTraining { skill: SkillType::Sword }).unwrap();
        run(
            &mut state,
            &catalog,
            Command::StartHunt {
                monster_id: "rat".to_string(),
                is_boss: false,
                group_size: 3,
            },
        )
        .unwrap();
        let hunt = state.hunt().unwrap();
        assert_eq!(hunt.group_size, 3);
        assert_eq!(hunt.monster_hp, 60);
        assert_eq!(state.training_skill(), None);
    }

    #[test]
    fn test_start_hunt_rejections() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Hunter".to_string(), 0);
        let hunt = |id: &str, is_boss: bool, group_size: u32| Command::StartHunt {
            monster_id: id.to_string(),
            is_boss,
            group_size,
        };
        assert_eq!(
            run(&mut state, &catalog, hunt("unicorn", false, 1)),
            Err(Rejected::UnknownMonster("unicorn".to_string()))
        );
        assert_eq!(
            run(&mut state, &catalog, hunt("rat", false, 9)),
            Err(Rejected::InvalidGroupSize { max: 8 })
        );
        assert_eq!(
            run(&mut state, &catalog, hunt("munster", true, 2)),
            Err(Rejected::InvalidGroupSize { max: 1 })
        );
        state.boss_cooldowns.insert("munster".to_string(), 5_000);
        assert_eq!(
            run(&mut state, &catalog, hunt("munster", true, 1)),
            Err(Rejected::BossOnCooldown { remaining_ms: 5_000 })
        );
        assert_eq!(state.activity, Activity::Idle);
    }

    #[test]
    fn test_buy_and_sell() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Trader".to_string(), 0);
        state.gold = 100;
        assert_eq!(
            run(
                &mut state,
                &catalog,
                Command::BuyItem {
                    item_id: "health_potion".to_string(),
                    quantity: 3
                }
            ),
            Err(Rejected::InsufficientGold {
                needed: 150,
                available: 100
            })
        );
        run(
            &mut state,
            &catalog,
            Command::BuyItem {
                item_id: "health_potion".to_string(),
                quantity: 2,
            },
        )
        .unwrap();
        assert_eq!(state.gold, 0);
        assert_eq!(state.inventory.count("health_potion"), 2);

        assert_eq!(
            run(
                &mut state,
                &catalog,
                Command::BuyItem {
                    item_id: "war_hammer".to_string(),
                    quantity: 1
                }
            ),
            Err(Rejected::NotForSale("War Hammer".to_string()))
        );

        state.inventory.add("orc_tooth", 2);
        run(
            &mut state,
            &catalog,
            Command::SellItem {
                item_id: "orc_tooth".to_string(),
                quantity: 2,
            },
        )
        .unwrap();
        assert_eq!(state.gold, 300);
        assert_eq!(state.inventory.count("orc_tooth"), 0);
    }

    #[test]
    fn test_equip_two_handed_clears_off_hand() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Warrior".to_string(), 0);
        state.level = 20;
        state.inventory.add("wooden_shield", 1);
        state.inventory.add("two_handed_sword", 1);

        run(&mut state, &catalog, Command::Equip { item_id: "wooden_shield".to_string() }).unwrap();
        run(&mut state, &catalog, Command::Equip { item_id: "two_handed_sword".to_string() }).unwrap();
        assert!(state.equipment.get(EquipmentSlot::HandLeft).is_none());
        assert_eq!(state.inventory.count("wooden_shield"), 1);

        run(&mut state, &catalog, Command::Equip { item_id: "wooden_shield".to_string() }).unwrap();
        assert!(state.equipment.get(EquipmentSlot::HandRight).is_none());
        assert_eq!(state.inventory.count("two_handed_sword"), 1);
    }

    #[test]
    fn test_equip_gates() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Novice".to_string(), 0);
        let equip = |id: &str| Command::Equip { item_id: id.to_string() };

        assert_eq!(
            run(&mut state, &catalog, equip("sword")),
            Err(Rejected::MissingItem("sword".to_string()))
        );
        state.inventory.add("barbarian_axe", 1);
        assert_eq!(
            run(&mut state, &catalog, equip("barbarian_axe")),
            Err(Rejected::LevelTooLow { required: 18 })
        );
        state.inventory.add("wand_of_vortex", 1);
        state.level = 10;
        assert_eq!(run(&mut state, &catalog, equip("wand_of_vortex")), Err(Rejected::WrongVocation));
        state.inventory.add("meat", 1);
        assert_eq!(
            run(&mut state, &catalog, equip("meat")),
            Err(Rejected::NotEquippable("Meat".to_string()))
        );
    }

    #[test]
    fn test_equip_ammo_merges_stack() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Archer".to_string(), 0);
        state.inventory.add("arrow", 30);
        run(&mut state, &catalog, Command::Equip { item_id: "arrow".to_string() }).unwrap();
        state.inventory.add("arrow", 20);
        run(&mut state, &catalog, Command::Equip { item_id: "arrow".to_string() }).unwrap();
        let ammo = state.equipment.get(EquipmentSlot::Ammo).unwrap();
        assert_eq!(ammo.count, Some(50));
        assert_eq!(state.inventory.count("arrow"), 0);

        run(&mut state, &catalog, Command::Unequip { slot: EquipmentSlot::Ammo }).unwrap();
        assert_eq!(state.inventory.count("arrow"), 50);
        assert_eq!(
            run(&mut state, &catalog, Command::Unequip { slot: EquipmentSlot::Ammo }),
            Err(Rejected::SlotEmpty)
        );
    }

    #[test]
    fn test_bank_and_depot() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Saver".to_string(), 0);
        state.gold = 500;
        run(&mut state, &catalog, Command::DepositGold { amount: 400 }).unwrap();
        assert_eq!((state.gold, state.bank_gold), (100, 400));
        assert_eq!(
            run(&mut state, &catalog, Command::WithdrawGold { amount: 401 }),
            Err(Rejected::InsufficientBankGold {
                needed: 401,
                available: 400
            })
        );

        state.inventory.add("cheese", 4);
        run(
            &mut state,
            &catalog,
            Command::DepositItem {
                item_id: "cheese".to_string(),
                quantity: 3,
            },
        )
        .unwrap();
        assert_eq!(state.inventory.count("cheese"), 1);
        assert_eq!(state.depot.count("cheese"), 3);
        assert_eq!(
            run(
                &mut state,
                &catalog,
                Command::WithdrawItem {
                    item_id: "cheese".to_string(),
                    quantity: 4
                }
            ),
            Err(Rejected::MissingItem("cheese".to_string()))
        );
    }

    #[test]
    fn test_gold_transfers_saturate() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Hoarder".to_string(), 0);
        state.gold = 10;
        state.bank_gold = u64::MAX;
        run(&mut state, &catalog, Command::DepositGold { amount: 10 }).unwrap();
        assert_eq!((state.gold, state.bank_gold), (0, u64::MAX));

        state.gold = u64::MAX;
        run(&mut state, &catalog, Command::WithdrawGold { amount: 5 }).unwrap();
        assert_eq!((state.gold, state.bank_gold), (u64::MAX, u64::MAX - 5));
    }

    #[test]
    fn test_buy_spell_and_blessing() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Acolyte".to_string(), 0);
        state.level = 8;
        state.gold = 5_000;
        let learn = |id: &str| Command::BuySpell { spell_id: id.to_string() };

        run(&mut state, &catalog, learn("light_healing")).unwrap();
        assert!(state.purchased_spells.contains("light_healing"));
        assert_eq!(
            run(&mut state, &catalog, learn("light_healing")),
            Err(Rejected::AlreadyLearned("Light Healing".to_string()))
        );
        assert_eq!(run(&mut state, &catalog, learn("energy_strike")), Err(Rejected::WrongVocation));

        run(&mut state, &catalog, Command::BuyBlessing).unwrap();
        assert!(state.has_blessing);
        assert_eq!(state.gold, 5_000 - 170 - 3_600);
        assert_eq!(run(&mut state, &catalog, Command::BuyBlessing), Err(Rejected::AlreadyBlessed));
    }

    #[test]
    fn test_choose_vocation_once() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Recruit".to_string(), 0);
        let choose = |vocation| Command::ChooseVocation { vocation };
        assert_eq!(
            run(&mut state, &catalog, choose(Vocation::Knight)),
            Err(Rejected::LevelTooLow { required: 8 })
        );
        state.level = 8;
        assert_eq!(run(&mut state, &catalog, choose(Vocation::None)), Err(Rejected::InvalidVocation));
        run(&mut state, &catalog, choose(Vocation::Knight)).unwrap();
        assert_eq!(state.vocation, Vocation::Knight);
        assert_eq!(state.max_hp, 150 + 7 * 15);
        assert_eq!(
            run(&mut state, &catalog, choose(Vocation::Druid)),
            Err(Rejected::VocationAlreadyChosen)
        );
    }

    #[test]
    fn test_use_potion() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Thirsty".to_string(), 0);
        state.hp = 10;
        let drink = |id: &str| Command::UsePotion { item_id: id.to_string() };
        assert_eq!(
            run(&mut state, &catalog, drink("health_potion")),
            Err(Rejected::MissingItem("health_potion".to_string()))
        );
        state.inventory.add("health_potion", 1);
        run(&mut state, &catalog, drink("health_potion")).unwrap();
        assert_eq!(state.hp, 85);
        assert_eq!(state.inventory.count("health_potion"), 0);

        state.inventory.add("strong_health_potion", 1);
        assert_eq!(
            run(&mut state, &catalog, drink("strong_health_potion")),
            Err(Rejected::LevelTooLow { required: 50 })
        );
        assert_eq!(
            run(&mut state, &catalog, drink("meat")),
            Err(Rejected::NotUsable("Meat".to_string()))
        );
    }

    #[test]
    fn test_toggle_skipped_loot() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Picky".to_string(), 0);
        let toggle = |id: &str| Command::ToggleSkippedLoot { item_id: id.to_string() };
        run(&mut state, &catalog, toggle("bone")).unwrap();
        assert!(state.skipped_loot.contains("bone"));
        run(&mut state, &catalog, toggle("bone")).unwrap();
        assert!(!state.skipped_loot.contains("bone"));
        assert_eq!(
            run(&mut state, &catalog, toggle("pebble")),
            Err(Rejected::UnknownItem("pebble".to_string()))
        );
    }

    #[test]
    fn test_update_settings_clamps_thresholds() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Tinkerer".to_string(), 0);
        let settings = AutomationSettings {
            auto_health_potion: true,
            health_potion_id: Some("health_potion".to_string()),
            health_potion_threshold: 250,
            ..AutomationSettings::default()
        };
        run(&mut state, &catalog, Command::UpdateSettings { settings }).unwrap();
        assert!(state.settings.auto_health_potion);
        assert_eq!(state.settings.health_potion_threshold, 100);
    }

    #[test]
    fn test_rejected_messages_are_readable() {
        let err = Rejected::InsufficientGold {
            needed: 10,
            available: 3,
        };
        assert_eq!(err.to_string(), "not enough gold: 10 needed, 3 available");
    }
}
