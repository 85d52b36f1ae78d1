//! Persistence gateway.
//!
//! Accounts are stored as pretty JSON, one file per account, wrapped in a
//! versioned envelope. Files written before the envelope existed are read as
//! legacy states and migrated. Backups use a checksummed binary snapshot.

use super::skills::SkillType;
use crate::core::constants::{CHARACTER_NAME_MAX_LENGTH, SAVE_FILE_VERSION, SAVE_VERSION_MAGIC};
use crate::core::game_state::{Activity, Hunt, PlayerState};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid save file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid snapshot: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("no saved character for account '{0}'")]
    NotFound(String),

    #[error("checksum verification failed")]
    Checksum,

    #[error("invalid snapshot version: expected 0x{expected:016X}, got 0x{found:016X}")]
    BadMagic { expected: u64, found: u64 },

    #[error("invalid account name: {0}")]
    InvalidName(String),
}

/// Load/save by account name.
///
/// Implementations must be cheap to move into the save worker thread.
pub trait PlayerStore: Send {
    fn load(&self, account: &str) -> Result<PlayerState, StoreError>;
    fn save(&self, account: &str, state: &PlayerState) -> Result<(), StoreError>;
    fn exists(&self, account: &str) -> bool;
}

#[derive(Serialize)]
struct SaveEnvelope<'a> {
    version: u32,
    player: &'a PlayerState,
}

#[derive(Deserialize)]
struct StoredEnvelope {
    version: u32,
    player: PlayerState,
}

/// Activity fields as they were stored before activity became a tagged value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LegacyActivity {
    active_hunt_id: Option<String>,
    active_hunt_count: Option<u32>,
    active_hunt_is_boss: bool,
    active_training_skill: Option<String>,
}

impl LegacyActivity {
    /// A hunt wins if both were somehow set.
    fn into_activity(self) -> Activity {
        if let Some(monster_id) = self.active_hunt_id.filter(|id| !id.is_empty()) {
            return Activity::Hunting(Hunt {
                monster_id,
                is_boss: self.active_hunt_is_boss,
                group_size: self.active_hunt_count.unwrap_or(1).max(1),
                monster_hp: 0,
            });
        }
        match self.active_training_skill.as_deref().and_then(SkillType::parse) {
            Some(skill) => Activity::Training { skill },
            None => Activity::Idle,
        }
    }
}

/// Serializes a state into the current on-disk JSON format.
pub fn encode_state(state: &PlayerState) -> Result<String, StoreError> {
    let envelope = SaveEnvelope {
        version: SAVE_FILE_VERSION,
        player: state,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Parses either the current envelope or a legacy bare state.
///
/// Missing optional fields fall back to their defaults; only malformed JSON
/// is an error.
pub fn decode_state(json: &str) -> Result<PlayerState, StoreError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let is_envelope = value.get("version").is_some() && value.get("player").is_some();

    if is_envelope {
        let stored: StoredEnvelope = serde_json::from_value(value)?;
        if stored.version > SAVE_FILE_VERSION {
            log::warn!(
                "save file version {} is newer than supported version {}",
                stored.version,
                SAVE_FILE_VERSION
            );
        }
        return Ok(stored.player);
    }

    let legacy: LegacyActivity = serde_json::from_value(value.clone())?;
    let mut state: PlayerState = serde_json::from_value(value)?;
    state.activity = legacy.into_activity();
    log::info!("migrated legacy save for '{}'", state.name);
    Ok(state)
}

/// Account names map to lowercase file stems made of letters, digits,
/// `_` and `-`.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidName("name cannot be empty".to_string()));
    }
    if trimmed.chars().count() > CHARACTER_NAME_MAX_LENGTH {
        return Err(StoreError::InvalidName(format!(
            "name must be {} characters or less",
            CHARACTER_NAME_MAX_LENGTH
        )));
    }
    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');
    if !valid_chars {
        return Err(StoreError::InvalidName(
            "name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        ));
    }
    Ok(())
}

/// One JSON file per account in a directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Store under the platform data directory.
    pub fn new() -> Result<Self, StoreError> {
        Self::with_dir(default_save_dir()?)
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, account: &str) -> Result<PathBuf, StoreError> {
        let stem = sanitize_name(account);
        if stem.is_empty() {
            return Err(StoreError::InvalidName(account.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", stem)))
    }
}

/// Platform data directory for save files.
pub fn default_save_dir() -> Result<PathBuf, StoreError> {
    let project_dirs = ProjectDirs::from("", "", "idlehunt").ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine data directory",
        )
    })?;
    Ok(project_dirs.data_dir().join("saves"))
}

impl PlayerStore for JsonStore {
    fn load(&self, account: &str) -> Result<PlayerState, StoreError> {
        let path = self.path_for(account)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(account.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        decode_state(&json)
    }

    fn save(&self, account: &str, state: &PlayerState) -> Result<(), StoreError> {
        let path = self.path_for(account)?;
        fs::write(path, encode_state(state)?)?;
        Ok(())
    }

    fn exists(&self, account: &str) -> bool {
        self.path_for(account).map(|p| p.exists()).unwrap_or(false)
    }
}

/// In-memory store. Clones share the same map, so a test can hand one clone
/// to the engine and inspect another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw JSON as if it had been written by an older build.
    pub fn insert_raw(&self, account: &str, json: &str) {
        if let Ok(mut accounts) = self.accounts.lock() {
            accounts.insert(sanitize_name(account), json.to_string());
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.accounts
            .lock()
            .map_err(|_| StoreError::Io(io::Error::new(io::ErrorKind::Other, "store lock poisoned")))
    }
}

impl PlayerStore for MemoryStore {
    fn load(&self, account: &str) -> Result<PlayerState, StoreError> {
        let json = self
            .lock()?
            .get(&sanitize_name(account))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(account.to_string()))?;
        decode_state(&json)
    }

    fn save(&self, account: &str, state: &PlayerState) -> Result<(), StoreError> {
        let json = encode_state(state)?;
        self.lock()?.insert(sanitize_name(account), json);
        Ok(())
    }

    fn exists(&self, account: &str) -> bool {
        self.lock()
            .map(|accounts| accounts.contains_key(&sanitize_name(account)))
            .unwrap_or(false)
    }
}

/// Binary snapshot with integrity check.
///
/// Format:
/// - Version magic (8 bytes)
/// - Data length (4 bytes)
/// - Bincode-serialized state (variable length)
/// - SHA256 checksum over everything before it (32 bytes)
pub fn export_snapshot(state: &PlayerState) -> Result<Vec<u8>, StoreError> {
    let data = bincode::serialize(state)?;
    let data_len = data.len() as u32;

    let mut hasher = Sha256::new();
    hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
    hasher.update(data_len.to_le_bytes());
    hasher.update(&data);
    let checksum = hasher.finalize();

    let mut out = Vec::with_capacity(8 + 4 + data.len() + 32);
    out.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend_from_slice(&data);
    out.extend_from_slice(&checksum);
    Ok(out)
}

/// Verifies and decodes a snapshot produced by [`export_snapshot`].
pub fn import_snapshot(bytes: &[u8]) -> Result<PlayerState, StoreError> {
    let truncated = || {
        StoreError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "snapshot is truncated",
        ))
    };

    if bytes.len() < 8 + 4 + 32 {
        return Err(truncated());
    }
    let (version_bytes, rest) = bytes.split_at(8);
    let mut magic = [0u8; 8];
    magic.copy_from_slice(version_bytes);
    let version = u64::from_le_bytes(magic);
    if version != SAVE_VERSION_MAGIC {
        return Err(StoreError::BadMagic {
            expected: SAVE_VERSION_MAGIC,
            found: version,
        });
    }

    let (length_bytes, rest) = rest.split_at(4);
    let mut length = [0u8; 4];
    length.copy_from_slice(length_bytes);
    let data_len = u32::from_le_bytes(length) as usize;
    if rest.len() != data_len + 32 {
        return Err(truncated());
    }
    let (data, stored_checksum) = rest.split_at(data_len);

    let mut hasher = Sha256::new();
    hasher.update(version_bytes);
    hasher.update(length_bytes);
    hasher.update(data);
    if hasher.finalize().as_slice() != stored_checksum {
        return Err(StoreError::Checksum);
    }

    Ok(bincode::deserialize(data)?)
}

pub fn write_backup(path: &Path, state: &PlayerState) -> Result<(), StoreError> {
    fs::write(path, export_snapshot(state)?)?;
    Ok(())
}

pub fn read_backup(path: &Path) -> Result<PlayerState, StoreError> {
    import_snapshot(&fs::read(path)?)
}
