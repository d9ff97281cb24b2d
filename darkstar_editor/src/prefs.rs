//! Persisted editor preferences

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use darkstar::Generation;
use serde::{Deserialize, Serialize};

use crate::EditorError;

/// Settings that survive between sessions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// True if the connected synth is an XP2
    pub xp2: bool,
}

impl Preferences {
    /// The hardware generation these preferences select
    pub fn generation(&self) -> Generation {
        Generation::from_xp2(self.xp2)
    }
}

/// Somewhere preferences can be loaded from and saved to
pub trait PreferenceStore {
    /// Read the stored preferences
    fn load(&self) -> Result<Preferences, EditorError>;
    /// Replace the stored preferences
    fn save(&mut self, prefs: &Preferences) -> Result<(), EditorError>;
}

/// Preferences stored as a JSON file
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// The file name used inside the configuration directory
    pub const FILE_NAME: &'static str = "prefs.json";
    /// Use the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    /// The per-user store, `<config dir>/darkstar/prefs.json`.  `None` if the
    /// platform has no configuration directory.
    pub fn user() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("darkstar").join(Self::FILE_NAME)))
    }
    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self) -> Result<Preferences, EditorError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            // nothing saved yet
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(e.into()),
        }
    }
    fn save(&mut self, prefs: &Preferences) -> Result<(), EditorError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(prefs)?)?;
        log::info!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

/// Preferences held in memory only
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    /// The current preferences
    pub prefs: Preferences,
    /// How many times [PreferenceStore::save] has been called
    pub saves: usize,
}

impl MemoryStore {
    /// A store holding `prefs`
    pub fn new(prefs: Preferences) -> Self {
        Self { prefs, saves: 0 }
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self) -> Result<Preferences, EditorError> {
        Ok(self.prefs)
    }
    fn save(&mut self, prefs: &Preferences) -> Result<(), EditorError> {
        self.prefs = *prefs;
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("darkstar-prefs-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_file_is_default() {
        let store = JsonFileStore::new(temp_path("missing.json"));
        assert_eq!(store.load().unwrap(), Preferences::default());
        assert_eq!(store.load().unwrap().generation(), Generation::Base);
    }
    #[test]
    fn file_round_trip() {
        let path = temp_path("nested/prefs.json");
        let mut store = JsonFileStore::new(&path);
        store.save(&Preferences { xp2: true }).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"xp2\": true"));
        assert_eq!(JsonFileStore::new(&path).load().unwrap().generation(), Generation::Xp2);
        fs::remove_file(&path).unwrap();
    }
    #[test]
    fn garbage_is_an_error() {
        let path = temp_path("garbage.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            JsonFileStore::new(&path).load(),
            Err(EditorError::Json(_))
        ));
        fs::remove_file(&path).unwrap();
    }
    #[test]
    fn unknown_fields_are_ignored() {
        let prefs: Preferences = serde_json::from_str(r#"{"colour": "red"}"#).unwrap();
        assert_eq!(prefs, Preferences::default());
    }
    #[test]
    fn memory_store_counts_saves() {
        let mut store = MemoryStore::default();
        store.save(&Preferences { xp2: true }).unwrap();
        assert_eq!(store.saves, 1);
        assert!(store.load().unwrap().xp2);
    }
}
