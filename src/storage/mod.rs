//! Local key-value store backing all durable state.
//!
//! One JSON document holds every key; each write overwrites the value of a
//! single key and rewrites the file. There is no merge or versioning, so the
//! last writer wins (matching the original single-page behavior this tool
//! replaces). Writes happen on the tokio runtime; the UI thread never blocks
//! on the filesystem.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::settings::Settings;
use crate::ideas::Idea;

pub const KEY_BIRTHDAY: &str = "birthday";
pub const KEY_SETTINGS: &str = "settings";
pub const KEY_IDEAS: &str = "ideas";
pub const KEY_IDEAS_VISIBLE: &str = "ideasVisible";
pub const KEY_SHOW_BIRTHDAY_INPUT: &str = "showBirthdayInput";

const STORE_FILE_NAME: &str = "momentum.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON-backed key-value store.
pub struct LocalStore {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl LocalStore {
    fn default_path() -> PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| PathBuf::from("."))
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join(STORE_FILE_NAME)
    }

    /// Open the store at its default location next to the executable.
    pub fn load() -> Result<Self, StoreError> {
        Self::open(Self::default_path())
    }

    /// Open a store at an explicit path. A missing file is a fresh store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            match serde_json::from_str::<HashMap<String, Value>>(&content) {
                Ok(entries) => {
                    tracing::info!("Loaded {} entries from {:?}", entries.len(), path);
                    entries
                }
                Err(e) => {
                    // Corrupt store loses customization, never startup.
                    tracing::warn!("Store file {:?} is corrupt, starting fresh: {e}", path);
                    HashMap::new()
                }
            }
        } else {
            tracing::info!("No store file at {:?}, starting fresh", path);
            HashMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Discarding malformed value for key {key:?}: {e}");
                None
            }
        }
    }

    /// Overwrite one key and persist the whole document.
    pub async fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        self.set_raw(key.to_string(), serde_json::to_value(value)?)
            .await
    }

    pub async fn set_raw(&mut self, key: String, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key, value);
        self.flush().await
    }

    async fn flush(&self) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.entries)?;
        tokio::fs::write(&self.path, content).await?;
        tracing::debug!("Saved {} entries to {:?}", self.entries.len(), self.path);
        Ok(())
    }

    /// Typed view of everything the app needs at startup.
    pub fn snapshot(&self) -> Snapshot {
        let birthday = self
            .get::<String>(KEY_BIRTHDAY)
            .filter(|s| !s.is_empty())
            .and_then(|s| match s.parse::<NaiveDate>() {
                Ok(date) => Some(date),
                Err(e) => {
                    tracing::warn!("Stored birthday {s:?} is not an ISO date: {e}");
                    None
                }
            });
        let settings = self.get::<Settings>(KEY_SETTINGS).map(|mut s| {
            s.sanitize();
            s
        });
        Snapshot {
            birthday,
            settings,
            ideas: self.get::<Vec<Idea>>(KEY_IDEAS).unwrap_or_default(),
            ideas_visible: self.get::<bool>(KEY_IDEAS_VISIBLE).unwrap_or(true),
            show_birthday_input: self.get::<bool>(KEY_SHOW_BIRTHDAY_INPUT).unwrap_or(false),
        }
    }
}

/// Startup snapshot of all persisted keys, with per-key defaults applied.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub birthday: Option<NaiveDate>,
    pub settings: Option<Settings>,
    pub ideas: Vec<Idea>,
    pub ideas_visible: bool,
    pub show_birthday_input: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.json")).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (_dir, mut store) = temp_store();
        store.set(KEY_BIRTHDAY, &"1990-03-14").await.unwrap();
        assert_eq!(
            store.get::<String>(KEY_BIRTHDAY).as_deref(),
            Some("1990-03-14")
        );
    }

    #[tokio::test]
    async fn test_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = LocalStore::open(&path).unwrap();
        store.set(KEY_IDEAS_VISIBLE, &false).await.unwrap();
        store.set(KEY_SETTINGS, &Settings::default()).await.unwrap();

        let reloaded = LocalStore::open(&path).unwrap();
        assert_eq!(reloaded.get::<bool>(KEY_IDEAS_VISIBLE), Some(false));
        assert_eq!(
            reloaded.get::<Settings>(KEY_SETTINGS),
            Some(Settings::default())
        );
    }

    #[test]
    fn test_missing_file_is_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("absent.json")).unwrap();
        let snapshot = store.snapshot();
        assert!(snapshot.birthday.is_none());
        assert!(snapshot.settings.is_none());
        assert!(snapshot.ideas.is_empty());
        assert!(snapshot.ideas_visible, "ideas panel defaults to visible");
        assert!(!snapshot.show_birthday_input);
    }

    #[tokio::test]
    async fn test_snapshot_parses_birthday() {
        let (_dir, mut store) = temp_store();
        store.set(KEY_BIRTHDAY, &"2001-12-31").await.unwrap();
        assert_eq!(
            store.snapshot().birthday,
            NaiveDate::from_ymd_opt(2001, 12, 31)
        );
    }

    #[tokio::test]
    async fn test_snapshot_ignores_malformed_birthday() {
        let (_dir, mut store) = temp_store();
        store.set(KEY_BIRTHDAY, &"not-a-date").await.unwrap();
        assert!(store.snapshot().birthday.is_none());

        store.set(KEY_BIRTHDAY, &"").await.unwrap();
        assert!(store.snapshot().birthday.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_clamps_settings_digits() {
        let (_dir, mut store) = temp_store();
        store
            .set_raw(
                KEY_SETTINGS.to_string(),
                serde_json::json!({ "decimalDigits": 99 }),
            )
            .await
            .unwrap();
        let settings = store.snapshot().settings.unwrap();
        assert_eq!(settings.decimal_digits, 12);
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = LocalStore::open(&path).unwrap();
        assert!(store.get::<bool>(KEY_IDEAS_VISIBLE).is_none());
    }

}
