// User settings persisted next to the save record.
use crate::storage::{
    load_flag, save_flag, KeyValueStore, PersistError, SETTING_FAST_MODE_KEY, SETTING_SHOW_LOG_KEY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Resolve spins at once, without reel, walk or battle animations.
    pub fast_mode: bool,
    pub show_log: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { fast_mode: false, show_log: true }
    }
}

impl Settings {
    pub fn load(store: &impl KeyValueStore) -> Self {
        let d = Self::default();
        Self {
            fast_mode: load_flag(store, SETTING_FAST_MODE_KEY, d.fast_mode),
            show_log: load_flag(store, SETTING_SHOW_LOG_KEY, d.show_log),
        }
    }

    pub fn save(&self, store: &impl KeyValueStore) -> Result<(), PersistError> {
        save_flag(store, SETTING_FAST_MODE_KEY, self.fast_mode)?;
        save_flag(store, SETTING_SHOW_LOG_KEY, self.show_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStore;

    #[test]
    fn settings_round_trip_through_store() {
        let store = MemoryStore::default();
        assert_eq!(Settings::load(&store), Settings::default());
        let s = Settings { fast_mode: true, show_log: false };
        s.save(&store).unwrap();
        assert_eq!(Settings::load(&store), s);
    }
}
