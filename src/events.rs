//! Player-facing event sink: the capped message log and short-lived hit
//! effects. Both are written by the engine and never read back by the core.

use crate::core::constants::{EVENT_LOG_CAPACITY, HIT_EVENT_TTL_MS};
use crate::core::tick::{TickEvent, TickResult};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Combat,
    Loot,
    Danger,
    Gain,
    Magic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp_ms: i64,
    pub kind: LogKind,
    pub message: String,
}

/// Append-only log that keeps the newest [`EVENT_LOG_CAPACITY`] entries.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, timestamp_ms: i64, kind: LogKind, message: impl Into<String>) {
        if self.entries.len() == EVENT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            timestamp_ms,
            kind,
            message: message.into(),
        });
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Player,
    Monster,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitKind {
    Damage(u32),
    Heal(u32),
    Miss,
    Speech(String),
}

/// A floating number or speech bubble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitEvent {
    pub id: Uuid,
    pub target: HitTarget,
    pub kind: HitKind,
    pub created_ms: i64,
}

impl HitEvent {
    pub fn new(target: HitTarget, kind: HitKind, created_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            kind,
            created_ms,
        }
    }

    pub fn is_active(&self, now_ms: i64) -> bool {
        now_ms - self.created_ms < HIT_EVENT_TTL_MS
    }
}

/// Live hit effects. Expired ones are dropped on [`HitQueue::prune`].
#[derive(Debug, Clone, Default)]
pub struct HitQueue {
    hits: Vec<HitEvent>,
}

impl HitQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hit: HitEvent) {
        self.hits.push(hit);
    }

    pub fn prune(&mut self, now_ms: i64) {
        self.hits.retain(|hit| hit.is_active(now_ms));
    }

    pub fn active(&self) -> &[HitEvent] {
        &self.hits
    }
}

/// Log category for a tick event.
pub fn log_kind(event: &TickEvent) -> LogKind {
    match event {
        TickEvent::PotionUsed { .. } | TickEvent::SkillAdvanced { .. } => LogKind::Gain,
        TickEvent::SpellHealed { .. } | TickEvent::AbilityCast { .. } => LogKind::Magic,
        TickEvent::PlayerAttack { .. }
        | TickEvent::MonsterAttack { .. }
        | TickEvent::MonsterMissed { .. } => LogKind::Combat,
        TickEvent::AmmoDepleted { .. }
        | TickEvent::WeaponBroke { .. }
        | TickEvent::PlayerDied { .. } => LogKind::Danger,
        TickEvent::MonsterKilled { .. } | TickEvent::LootDropped { .. } => LogKind::Loot,
        TickEvent::TaskCompleted { .. }
        | TickEvent::QuestReady { .. }
        | TickEvent::BossDefeated { .. }
        | TickEvent::LeveledUp { .. } => LogKind::Gain,
        TickEvent::HuntStopped { .. } => LogKind::Info,
    }
}

/// Player-facing text for a tick event.
pub fn log_message(event: &TickEvent) -> String {
    match event {
        TickEvent::PotionUsed { message, .. }
        | TickEvent::SpellHealed { message, .. }
        | TickEvent::SkillAdvanced { message, .. }
        | TickEvent::PlayerAttack { message, .. }
        | TickEvent::AbilityCast { message, .. }
        | TickEvent::AmmoDepleted { message }
        | TickEvent::WeaponBroke { message, .. }
        | TickEvent::MonsterAttack { message, .. }
        | TickEvent::MonsterMissed { message, .. }
        | TickEvent::PlayerDied { message, .. }
        | TickEvent::MonsterKilled { message, .. }
        | TickEvent::LootDropped { message, .. }
        | TickEvent::TaskCompleted { message, .. }
        | TickEvent::QuestReady { message, .. }
        | TickEvent::BossDefeated { message, .. }
        | TickEvent::HuntStopped { message } => message.clone(),
        TickEvent::LeveledUp { new_level } => {
            format!("\u{2b50} You advanced to level {}!", new_level)
        }
    }
}

/// Hit effect for a tick event, if it has one.
pub fn hit_for(event: &TickEvent, now_ms: i64) -> Option<HitEvent> {
    let (target, kind) = match event {
        TickEvent::PlayerAttack { damage, .. } => (HitTarget::Monster, HitKind::Damage(*damage)),
        TickEvent::AbilityCast { name, .. } => (HitTarget::Player, HitKind::Speech(name.clone())),
        TickEvent::MonsterAttack { damage, .. } => (HitTarget::Player, HitKind::Damage(*damage)),
        TickEvent::MonsterMissed { .. } => (HitTarget::Player, HitKind::Miss),
        TickEvent::SpellHealed { amount, .. } => (HitTarget::Player, HitKind::Heal(*amount)),
        TickEvent::PotionUsed { hp, .. } if *hp > 0 => (HitTarget::Player, HitKind::Heal(*hp)),
        _ => return None,
    };
    Some(HitEvent::new(target, kind, now_ms))
}

/// Feeds a tick's events into the log and the hit queue.
///
/// Plain attack and miss events only produce hit effects; logging every
/// swing would push everything else out of a 40 entry log.
pub fn record_tick(log: &mut EventLog, hits: &mut HitQueue, result: &TickResult, now_ms: i64) {
    hits.prune(now_ms);
    for event in &result.events {
        if let Some(hit) = hit_for(event, now_ms) {
            hits.push(hit);
        }
        if matches!(
            event,
            TickEvent::PlayerAttack { .. } | TickEvent::MonsterMissed { .. }
        ) {
            continue;
        }
        log.push(now_ms, log_kind(event), log_message(event));
    }
}
