use crate::catalog::{Catalog, Monster};
use crate::core::game_state::PlayerState;
use rand::Rng;
use std::collections::BTreeMap;

/// Rolls a monster's loot table once.
///
/// Every entry is an independent trial: a kill can drop several items or
/// nothing at all. `loot_bonus_percent` scales each entry's chance.
pub fn calculate_loot_drop<R: Rng>(
    monster: &Monster,
    loot_bonus_percent: f64,
    rng: &mut R,
) -> BTreeMap<String, u32> {
    let mut drops = BTreeMap::new();
    let bonus = 1.0 + loot_bonus_percent / 100.0;

    for entry in &monster.loot {
        let roll: f64 = rng.gen();
        if roll <= entry.chance * bonus {
            let amount = (rng.gen::<f64>() * entry.max_amount.max(1) as f64).floor() as u32 + 1;
            *drops.entry(entry.item_id.clone()).or_insert(0) += amount;
        }
    }

    drops
}

/// Rolls loot once per lured unit and drops anything the player skips.
pub fn roll_group_loot<R: Rng>(
    state: &PlayerState,
    catalog: &Catalog,
    monster: &Monster,
    group_size: u32,
    rng: &mut R,
) -> BTreeMap<String, u32> {
    let bonus = equipment_loot_bonus(state, catalog);
    let mut merged = BTreeMap::new();
    for _ in 0..group_size.max(1) {
        for (item_id, qty) in calculate_loot_drop(monster, bonus, rng) {
            *merged.entry(item_id).or_insert(0) += qty;
        }
    }
    merged.retain(|item_id, _| !state.skipped_loot.contains(item_id));
    merged
}

/// Sum of loot bonuses granted by equipped items.
pub fn equipment_loot_bonus(state: &PlayerState, catalog: &Catalog) -> f64 {
    state
        .equipment
        .iter_equipped()
        .filter_map(|equipped| catalog.find_item(&equipped.item_id))
        .map(|item| item.loot_bonus_percent as f64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LootEntry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn monster_with_loot(loot: Vec<LootEntry>) -> Monster {
        let mut monster = Monster::new("test", "Test Dummy", 1, 10, (0, 1), (0, 0), 1);
        monster.loot = loot;
        monster
    }

    #[test]
    fn test_certain_drop_always_drops() {
        let monster = monster_with_loot(vec![LootEntry::new("meat", 1.0, 3)]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let drops = calculate_loot_drop(&monster, 0.0, &mut rng);
            let qty = drops["meat"];
            assert!((1..=3).contains(&qty), "quantity {} out of range", qty);
        }
    }

    #[test]
    fn test_entries_roll_independently() {
        let monster = monster_with_loot(vec![
            LootEntry::new("a", 0.5, 1),
            LootEntry::new("b", 0.5, 1),
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut saw_both = false;
        let mut saw_none = false;
        for _ in 0..500 {
            let drops = calculate_loot_drop(&monster, 0.0, &mut rng);
            saw_both |= drops.len() == 2;
            saw_none |= drops.is_empty();
        }
        assert!(saw_both && saw_none);
    }

    #[test]
    fn test_seeded_rolls_are_reproducible() {
        let monster = monster_with_loot(vec![
            LootEntry::new("a", 0.3, 5),
            LootEntry::new("b", 0.1, 2),
            LootEntry::new("c", 0.05, 1),
        ]);
        let mut rng_a = ChaCha8Rng::seed_from_u64(99);
        let mut rng_b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..50 {
            assert_eq!(
                calculate_loot_drop(&monster, 0.0, &mut rng_a),
                calculate_loot_drop(&monster, 0.0, &mut rng_b)
            );
        }
    }

    #[test]
    fn test_loot_bonus_raises_drop_rate() {
        let monster = monster_with_loot(vec![LootEntry::new("gem", 0.1, 1)]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let trials = 5000;
        let base = (0..trials)
            .filter(|_| !calculate_loot_drop(&monster, 0.0, &mut rng).is_empty())
            .count();
        let boosted = (0..trials)
            .filter(|_| !calculate_loot_drop(&monster, 100.0, &mut rng).is_empty())
            .count();
        assert!(boosted > base, "bonus {} vs base {}", boosted, base);
    }

    #[test]
    fn test_group_loot_filters_skipped_items() {
        let catalog = Catalog::default_content();
        let monster = monster_with_loot(vec![
            LootEntry::new("meat", 1.0, 1),
            LootEntry::new("cheese", 1.0, 1),
        ]);
        let mut state = PlayerState::new("Looter".to_string(), 0);
        state.skipped_loot.insert("cheese".to_string());
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        let drops = roll_group_loot(&state, &catalog, &monster, 3, &mut rng);
        assert_eq!(drops.get("meat"), Some(&3));
        assert!(!drops.contains_key("cheese"));
    }
}
