//! Persisted user preferences
//!
//! Two keys survive between runs: the last selected duration and the theme.
//! Anything missing or malformed is treated as "no preference".

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use tracing::{debug, info, warn};

use crate::{error::TimerError, state::DurationSelection};

/// Key holding the duration as `MM:SS`
pub const TIME_KEY: &str = "timerValue";
/// Key holding the theme as `true` / `false`
pub const THEME_KEY: &str = "darkMode";

/// String key-value store backing the preferences
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), TimerError>;
}

/// Preferences read once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub selection: DurationSelection,
    pub dark_mode: bool,
}

impl Preferences {
    /// Load preferences, falling back to 20:00 and the light theme
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let selection = match store.get(TIME_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored duration: {}", e);
                DurationSelection::default()
            }),
            None => {
                debug!("No stored duration, using default");
                DurationSelection::default()
            }
        };

        let dark_mode = store.get(THEME_KEY).is_some_and(|raw| raw.trim() == "true");

        Self { selection, dark_mode }
    }
}

/// Write the duration preference
pub fn store_selection(store: &mut dyn PreferenceStore, selection: DurationSelection) {
    if let Err(e) = store.set(TIME_KEY, &selection.to_string()) {
        warn!("Failed to persist duration {}: {}", selection, e);
    }
}

/// Write the theme preference
pub fn store_dark_mode(store: &mut dyn PreferenceStore, dark_mode: bool) {
    if let Err(e) = store.set(THEME_KEY, if dark_mode { "true" } else { "false" }) {
        warn!("Failed to persist theme preference: {}", e);
    }
}

/// Preferences kept as a flat JSON object in a file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Preference file {} is malformed, ignoring: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No preference file at {}, starting fresh", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                warn!("Failed to read preference file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), TimerError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TimerError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()?;
        debug!("Stored preference {}={}", key, value);
        Ok(())
    }
}

/// In-memory store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            values: Arc::new(Mutex::new(values)),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TimerError> {
        self.values
            .lock()
            .map_err(|_| TimerError::StorePoisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_when_empty() {
        let prefs = Preferences::load(&MemoryStore::new());
        assert_eq!(prefs.selection, DurationSelection::default());
        assert!(!prefs.dark_mode);
    }

    #[test]
    fn restores_stored_values() {
        let store = MemoryStore::with_values([(TIME_KEY, "5:30"), (THEME_KEY, "true")]);
        let prefs = Preferences::load(&store);
        assert_eq!(prefs.selection, DurationSelection::new(5, 30).unwrap());
        assert!(prefs.dark_mode);
    }

    #[test]
    fn malformed_values_fall_back() {
        let store = MemoryStore::with_values([(TIME_KEY, "soon"), (THEME_KEY, "yes")]);
        let prefs = Preferences::load(&store);
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn json_store_persists_across_opens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let mut store = JsonFileStore::open(&path);
        store_selection(&mut store, DurationSelection::new(1, 2).unwrap());
        store_dark_mode(&mut store, true);

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(TIME_KEY).as_deref(), Some("01:02"));
        assert_eq!(reopened.get(THEME_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn json_store_survives_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::open(&path);
        assert_eq!(store.get(TIME_KEY), None);
        assert_eq!(Preferences::load(&store), Preferences::default());
    }
}
