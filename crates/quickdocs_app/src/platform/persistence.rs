use std::collections::BTreeMap;
use std::path::PathBuf;

use quickdocs_core::{BackendAddress, Config, ConfigError, SETTINGS_KEY};
use quickdocs_engine::{AtomicFile, PersistError};
use quickdocs_logging::{qd_info, qd_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to serialize settings: {0}")]
    Serialize(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Durable string key-value store.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedSettings {
    values: BTreeMap<String, String>,
}

/// Key-value store kept in a RON file and rewritten atomically on each set.
pub struct SettingsFile {
    file: AtomicFile,
    settings: PersistedSettings,
}

impl SettingsFile {
    /// Opens the store; an unreadable or corrupt file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file = AtomicFile::new(path);
        let settings = match file.read() {
            Ok(Some(text)) => match ron::from_str::<PersistedSettings>(&text) {
                Ok(settings) => {
                    qd_info!("Loaded settings from {:?}", file.path());
                    settings
                }
                Err(err) => {
                    qd_warn!("Failed to parse settings from {:?}: {}", file.path(), err);
                    PersistedSettings::default()
                }
            },
            Ok(None) => PersistedSettings::default(),
            Err(err) => {
                qd_warn!("Failed to read settings from {:?}: {}", file.path(), err);
                PersistedSettings::default()
            }
        };
        Self { file, settings }
    }
}

impl KeyValueStore for SettingsFile {
    fn get(&self, key: &str) -> Option<String> {
        self.settings.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let mut next = self.settings.clone();
        next.values.insert(key.to_string(), value.to_string());

        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&next, pretty)
            .map_err(|err| SettingsError::Serialize(err.to_string()))?;
        self.file.write(&content)?;
        self.settings = next;
        Ok(())
    }
}

/// Backend address configuration backed by a key-value store.
pub struct ConfigStore {
    store: Box<dyn KeyValueStore>,
    config: Config,
}

impl ConfigStore {
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let config = Config::from_persisted(store.get(SETTINGS_KEY).as_deref());
        Self { store, config }
    }

    pub fn get(&self) -> Config {
        self.config.clone()
    }

    /// Validates and persists a new address. On error the previous address
    /// stays in effect.
    pub fn set(&mut self, address: &str) -> Result<(), ConfigError> {
        let address = BackendAddress::parse(address)?;
        self.store
            .set(SETTINGS_KEY, address.as_str())
            .map_err(|err| ConfigError::Persist(err.to_string()))?;
        self.config.backend_address = address;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use quickdocs_core::DEFAULT_BACKEND_ADDRESS;
    use tempfile::TempDir;

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub(crate) values: BTreeMap<String, String>,
        pub(crate) fail_writes: bool,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
            if self.fail_writes {
                return Err(SettingsError::Serialize("disk full".to_string()));
            }
            self.values.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn unset_store_uses_default_address() {
        let store = ConfigStore::load(Box::<MemoryStore>::default());
        assert_eq!(store.get().backend_address.as_str(), DEFAULT_BACKEND_ADDRESS);
    }

    #[test]
    fn set_rejects_empty_and_keeps_previous() {
        let mut store = ConfigStore::load(Box::<MemoryStore>::default());
        store.set("http://rag.local:8000").unwrap();

        let err = store.set("   ").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress(_)));
        assert_eq!(store.get().backend_address.as_str(), "http://rag.local:8000");
    }

    #[test]
    fn failed_write_keeps_previous_address() {
        let mut store = ConfigStore::load(Box::new(MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        }));

        let err = store.set("http://rag.local:8000").unwrap_err();
        assert!(matches!(err, ConfigError::Persist(_)));
        assert_eq!(store.get().backend_address.as_str(), DEFAULT_BACKEND_ADDRESS);
    }

    #[test]
    fn address_survives_restart() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".quickdocs_settings.ron");

        let mut store = ConfigStore::load(Box::new(SettingsFile::open(&path)));
        store.set("https://abc.ngrok-free.app/").unwrap();

        let reopened = ConfigStore::load(Box::new(SettingsFile::open(&path)));
        assert_eq!(
            reopened.get().backend_address.as_str(),
            "https://abc.ngrok-free.app"
        );
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.ron");
        std::fs::write(&path, "this is not ron (").unwrap();

        let store = ConfigStore::load(Box::new(SettingsFile::open(&path)));
        assert_eq!(store.get().backend_address.as_str(), DEFAULT_BACKEND_ADDRESS);
    }
}
