//! localStorage persistence for the progression record and user settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Character, Player, Progress, Progression, UpgradeCosts};
use crate::util::clog;

pub const SAVE_KEY: &str = "sq_save";
pub const SETTING_FAST_MODE_KEY: &str = "sq_setting_fast_mode";
pub const SETTING_SHOW_LOG_KEY: &str = "sq_setting_show_log";
const ALL_KEYS: [&str; 3] = [SAVE_KEY, SETTING_FAST_MODE_KEY, SETTING_SHOW_LOG_KEY];

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to serialize save data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write key {key}")]
    Write { key: String },
}

/// Minimal string key/value backend.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistError>;
    fn remove(&self, key: &str) -> Result<(), PersistError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub attack: i64,
    pub defense: i64,
    pub max_health: i64,
    pub gold: u64,
}

/// What survives a reload. Current health and stage do not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub player: SavedPlayer,
    pub upgrades: UpgradeCosts,
    pub max_stage: u32,
}

impl SaveData {
    pub fn from_progression(p: &Progression) -> Self {
        let stats = &p.player.stats;
        Self {
            player: SavedPlayer {
                attack: stats.attack,
                defense: stats.defense,
                max_health: stats.max_health,
                gold: p.player.gold,
            },
            upgrades: p.upgrades,
            max_stage: p.progress.max_stage,
        }
    }

    /// None when the record breaks an invariant.
    pub fn into_progression(self) -> Option<Progression> {
        let sp = self.player;
        if sp.max_health <= 0
            || sp.attack < 0
            || sp.defense < 0
            || self.max_stage < 1
            || !self.upgrades.is_valid()
        {
            return None;
        }
        Some(Progression {
            player: Player {
                stats: Character::new(sp.attack, sp.defense, sp.max_health),
                gold: sp.gold,
            },
            progress: Progress { stage: 1, max_stage: self.max_stage },
            upgrades: self.upgrades,
        })
    }
}

/// Stored progression, or None on first run and corrupted data.
pub fn load_progression(store: &impl KeyValueStore) -> Option<Progression> {
    let raw = store.get(SAVE_KEY)?;
    match serde_json::from_str::<SaveData>(&raw) {
        Ok(data) => {
            let restored = data.into_progression();
            if restored.is_none() {
                clog("[storage] save record rejected, using defaults");
            }
            restored
        }
        Err(e) => {
            clog(&format!("[storage] unreadable save: {}", e));
            None
        }
    }
}

pub fn save_progression(store: &impl KeyValueStore, p: &Progression) -> Result<(), PersistError> {
    let raw = serde_json::to_string(&SaveData::from_progression(p))?;
    store.set(SAVE_KEY, &raw)
}

pub fn load_flag(store: &impl KeyValueStore, key: &str, default: bool) -> bool {
    match store.get(key).as_deref() {
        Some("1") | Some("true") => true,
        Some("0") | Some("false") => false,
        _ => default,
    }
}

pub fn save_flag(store: &impl KeyValueStore, key: &str, value: bool) -> Result<(), PersistError> {
    store.set(key, if value { "1" } else { "0" })
}

/// Removes the save and every setting.
pub fn clear_all(store: &impl KeyValueStore) -> Result<(), PersistError> {
    for key in ALL_KEYS {
        store.remove(key)?;
    }
    Ok(())
}

/// Browser localStorage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalStore;

impl LocalStore {
    fn storage(&self) -> Result<web_sys::Storage, PersistError> {
        let win = web_sys::window().ok_or(PersistError::Unavailable)?;
        match win.local_storage() {
            Ok(Some(store)) => Ok(store),
            _ => Err(PersistError::Unavailable),
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|_| PersistError::Write { key: key.to_string() })
    }

    fn remove(&self, key: &str) -> Result<(), PersistError> {
        self.storage()?
            .remove_item(key)
            .map_err(|_| PersistError::Write { key: key.to_string() })
    }
}
