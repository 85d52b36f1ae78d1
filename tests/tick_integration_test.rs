//! Integration tests for game_tick() in core::tick.
//!
//! These tests drive whole ticks against small hand-built catalogs and
//! check the boundary behavior of combat, death and kill rewards.
//!
//! Uses seeded ChaCha8Rng for deterministic behavior.

use idlehunt::catalog::{Catalog, CatalogData, Monster};
use idlehunt::core::game_logic::handle_player_death;
use idlehunt::core::game_state::{Activity, Hunt, PlayerState};
use idlehunt::core::tick::{game_tick, TickEvent};
use idlehunt::rewards::{kill_gold, kill_xp};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn arena(monster: Monster) -> Catalog {
    Catalog::new(CatalogData {
        monsters: vec![monster],
        ..CatalogData::default()
    })
}

fn hunting(state: &mut PlayerState, monster_id: &str, group_size: u32) {
    state.activity = Activity::Hunting(Hunt {
        monster_id: monster_id.to_string(),
        is_boss: false,
        group_size,
        monster_hp: 0,
    });
}

/// A wall that always hits for exactly 10 and never falls.
fn wall() -> Monster {
    Monster::new("wall", "Wall", 1, 1_000_000, (10, 10), (0, 0), 0)
}

// =============================================================================
// 1. Death boundary
// =============================================================================

#[test]
fn test_hit_for_exactly_remaining_hp_kills() {
    let catalog = arena(wall());
    let mut state = PlayerState::new("Fragile".to_string(), 0);
    hunting(&mut state, "wall", 1);
    // Passive regeneration adds 1 before the counter attack lands.
    state.hp = 9;
    state.current_xp = 50;

    let (next, result) = game_tick(&state, &catalog, 1_000, &mut test_rng());
    assert!(result.died);
    assert!(matches!(result.events.last(), Some(TickEvent::PlayerDied { .. })));
    assert_eq!(next.activity, Activity::Idle);
    assert_eq!(next.hp, next.max_hp);
    assert_eq!(next.current_xp, 45);
}

#[test]
fn test_one_hp_left_survives() {
    let catalog = arena(wall());
    let mut state = PlayerState::new("Tough".to_string(), 0);
    hunting(&mut state, "wall", 1);
    state.hp = 10;

    let (next, result) = game_tick(&state, &catalog, 1_000, &mut test_rng());
    assert!(!result.died);
    assert_eq!(next.hp, 1);
    assert!(next.is_hunting());
    assert!(result
        .events
        .iter()
        .any(|e| matches!(e, TickEvent::MonsterAttack { damage: 10, .. })));
}

#[test]
fn test_death_skips_kill_rewards() {
    // Survives any level 1 hit and always lands a lethal counter attack.
    let catalog = arena(Monster::new("crusher", "Crusher", 1, 1_000_000, (500, 500), (50, 50), 10));
    let mut state = PlayerState::new("Doomed".to_string(), 0);
    hunting(&mut state, "crusher", 1);
    state.hp = 1;
    state.current_xp = 40;
    let gold = state.gold;

    let (next, result) = game_tick(&state, &catalog, 1_000, &mut test_rng());
    assert!(result.died);
    assert!(matches!(result.events.last(), Some(TickEvent::PlayerDied { .. })));
    assert!(!result.events.iter().any(|e| matches!(
        e,
        TickEvent::MonsterKilled { .. }
            | TickEvent::LootDropped { .. }
            | TickEvent::LeveledUp { .. }
            | TickEvent::TaskCompleted { .. }
            | TickEvent::QuestReady { .. }
    )));
    assert!(next.gold <= gold);
    assert!(next.current_xp <= state.current_xp);
    assert_eq!(next.activity, Activity::Idle);
}

// =============================================================================
// 2. Death penalties
// =============================================================================

fn veteran() -> PlayerState {
    let mut state = PlayerState::new("Veteran".to_string(), 0);
    state.level = 11;
    state.current_xp = 1_000;
    state.gold = 1_000;
    state.skills.sword.progress = 50.0;
    state
}

#[test]
fn test_death_without_blessing() {
    let catalog = Catalog::default_content();
    let mut state = veteran();
    let report = handle_player_death(&mut state, &catalog, 0, &mut test_rng());

    assert_eq!(report.lost_xp, 100);
    assert!((100..=250).contains(&report.lost_gold));
    assert_eq!(state.gold, 1_000 - report.lost_gold);
    assert_eq!(report.skill_losses.len(), 1);
    assert!((state.skills.sword.progress - 40.0).abs() < 1e-9);
    assert_eq!(state.skills.sword.level, 10);
    assert!(report.demoted_skills.is_empty());
}

#[test]
fn test_death_with_blessing() {
    let catalog = Catalog::default_content();
    let mut state = veteran();
    state.has_blessing = true;
    let report = handle_player_death(&mut state, &catalog, 0, &mut test_rng());

    assert!(report.blessed);
    assert_eq!(report.lost_xp, 5);
    assert!((5..=12).contains(&report.lost_gold));
    assert!((state.skills.sword.progress - 49.5).abs() < 1e-9);
    assert!(!state.has_blessing);
}

// =============================================================================
// 3. Kill rewards
// =============================================================================

fn bag() -> Monster {
    Monster::new("bag", "Training Bag", 5, 1, (0, 0), (10, 20), 100)
}

#[test]
fn test_group_kill_xp_formula() {
    assert_eq!(kill_xp(&bag(), 5, 3, 100.0), 6_750);
    assert_eq!(kill_xp(&bag(), 5, 3, 0.0), 4_500);
    let mut rng = test_rng();
    for _ in 0..100 {
        assert!((30..=60).contains(&kill_gold(&bag(), 3, &mut rng)));
    }
}

#[test]
fn test_group_kill_through_ticks() {
    let catalog = arena(bag());
    let mut state = PlayerState::new("Lurer".to_string(), 0);
    state.level = 5;
    state.skills.fist.level = 40;
    hunting(&mut state, "bag", 3);
    let gold_before = state.gold;

    let mut rng = test_rng();
    let mut killed = None;
    for tick in 1..=30 {
        let (next, result) = game_tick(&state, &catalog, tick * 666, &mut rng);
        state = next;
        killed = result.events.into_iter().find_map(|e| match e {
            TickEvent::MonsterKilled {
                xp_gained,
                gold_gained,
                group_size,
                ..
            } => Some((xp_gained, gold_gained, group_size)),
            _ => None,
        });
        if killed.is_some() {
            break;
        }
    }

    let (xp, gold, group) = killed.expect("group should fall within 30 ticks");
    assert_eq!(xp, 6_750);
    assert_eq!(group, 3);
    assert!((30..=60).contains(&gold));
    assert_eq!(state.gold, gold_before + gold);
    assert!(state.level > 5);
    // A fresh group is lured straight away.
    assert_eq!(state.hunt().unwrap().monster_hp, 3);
}

#[test]
fn test_stamina_drains_only_while_hunting() {
    let catalog = arena(wall());
    let mut state = PlayerState::new("Tired".to_string(), 0);
    state.stamina = 100.0;
    hunting(&mut state, "wall", 1);
    let (hunted, _) = game_tick(&state, &catalog, 1_000, &mut test_rng());
    assert!(hunted.stamina < 100.0);

    state.activity = Activity::Idle;
    let (rested, _) = game_tick(&state, &catalog, 1_000, &mut test_rng());
    assert!(rested.stamina > 100.0);
}
