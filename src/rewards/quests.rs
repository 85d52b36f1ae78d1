use crate::catalog::Catalog;
use crate::commands::Rejected;
use crate::core::game_logic::grant_xp;
use crate::core::game_state::PlayerState;

/// Payout of a claimed quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestReward {
    pub quest_name: String,
    pub xp: u64,
    pub gold: u64,
    pub item: Option<(String, u32)>,
    pub levels_gained: u32,
}

/// Counts kills toward every unclaimed quest tracking `monster_id`.
/// Returns the names of quests whose requirement was reached by this call.
pub fn record_quest_kills(
    state: &mut PlayerState,
    catalog: &Catalog,
    monster_id: &str,
    kills: u32,
) -> Vec<String> {
    let mut ready = Vec::new();
    if kills == 0 {
        return ready;
    }
    for quest in catalog.quests().iter().filter(|q| q.monster_id == monster_id) {
        let progress = state.quests.entry(quest.id.clone()).or_default();
        if progress.completed {
            continue;
        }
        let before = progress.kills;
        progress.kills = progress.kills.saturating_add(kills).min(quest.kills_required);
        if before < quest.kills_required && progress.kills >= quest.kills_required {
            ready.push(quest.name.clone());
        }
    }
    ready
}

/// Grants a quest's rewards once its kill requirement is met.
pub fn claim_quest(
    state: &mut PlayerState,
    catalog: &Catalog,
    quest_id: &str,
) -> Result<QuestReward, Rejected> {
    let quest = catalog
        .find_quest(quest_id)
        .ok_or_else(|| Rejected::UnknownQuest(quest_id.to_string()))?;
    let progress = state.quests.get(quest_id).copied().unwrap_or_default();
    if progress.completed {
        return Err(Rejected::QuestAlreadyClaimed);
    }
    if progress.kills < quest.kills_required {
        return Err(Rejected::QuestIncomplete {
            kills: progress.kills,
            required: quest.kills_required,
        });
    }

    if let Some(entry) = state.quests.get_mut(quest_id) {
        entry.completed = true;
    }
    state.gold = state.gold.saturating_add(quest.reward_gold);
    if let Some((item_id, count)) = &quest.reward_item {
        if catalog.find_item(item_id).is_some() {
            state.inventory.add(item_id, *count);
        }
    }
    let levels_gained = grant_xp(state, quest.reward_xp);

    Ok(QuestReward {
        quest_name: quest.name.clone(),
        xp: quest.reward_xp,
        gold: quest.reward_gold,
        item: quest.reward_item.clone(),
        levels_gained,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quest_kills_only_count_matching_monster() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Quester".to_string(), 0);
        record_quest_kills(&mut state, &catalog, "wolf", 10);
        assert!(state.quests.get("rat_plague").is_none());

        record_quest_kills(&mut state, &catalog, "rat", 3);
        assert_eq!(state.quests["rat_plague"].kills, 3);
    }

    #[test]
    fn test_quest_ready_reported_once() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Quester".to_string(), 0);
        assert!(record_quest_kills(&mut state, &catalog, "rat", 49).is_empty());
        assert_eq!(record_quest_kills(&mut state, &catalog, "rat", 5), vec!["Rat Plague".to_string()]);
        assert!(record_quest_kills(&mut state, &catalog, "rat", 5).is_empty());
        assert_eq!(state.quests["rat_plague"].kills, 50);
    }

    #[test]
    fn test_claim_quest_once() {
        let catalog = Catalog::default_content();
        let mut state = PlayerState::new("Quester".to_string(), 0);
        assert!(matches!(
            claim_quest(&mut state, &catalog, "rat_plague"),
            Err(Rejected::QuestIncomplete { kills: 0, required: 50 })
        ));
        assert_eq!(
            claim_quest(&mut state, &catalog, "nope"),
            Err(Rejected::UnknownQuest("nope".to_string()))
        );

        record_quest_kills(&mut state, &catalog, "rat", 50);
        let gold_before = state.gold;
        let reward = claim_quest(&mut state, &catalog, "rat_plague").unwrap();
        assert_eq!(reward.gold, 100);
        assert_eq!(state.gold, gold_before + 100);
        assert_eq!(state.inventory.count("leather_boots"), 1);
        assert!(state.level > 1);
        assert_eq!(
            claim_quest(&mut state, &catalog, "rat_plague"),
            Err(Rejected::QuestAlreadyClaimed)
        );

        // Completed quests stop tracking.
        record_quest_kills(&mut state, &catalog, "rat", 10);
        assert_eq!(state.quests["rat_plague"].kills, 50);
    }
}
