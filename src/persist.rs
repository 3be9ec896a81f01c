//! Persistence of [`ConfigurationState`] in a string-keyed store.
//!
//! The whole state is written as one TOML record under a fixed key:
//!
//! ```toml
//! version = 1
//! showRingTop = true
//! showRingBottom = true
//!
//! [colors]
//! global = "#ffffff"
//! pommel = "#cccccc"
//! ringBottom = "#ff0000"
//! body = "#cccccc"
//! ringTop = "#ff0000"
//! emitter = "#cccccc"
//! ```
//!
//! Reading goes through a migration pass on the raw [`toml::Value`] before
//! decoding: missing fields are backfilled from the default preset, prototype
//! field names are mapped to current ones, and records from a newer schema are
//! rejected.  [`load`] never fails; anything unreadable yields `None` and the
//! caller starts from the defaults.

use crate::constants::{DEFAULT_SHOW_RINGS, SCHEMA_VERSION};
use crate::error::{ConfiguratorError, ConfiguratorResult};
use crate::part::ColorSlot;
use crate::state::{ColorTable, ConfigurationState};
use bevy::log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

// ── Stores ────────────────────────────────────────────────────────────────────

/// Durable string-keyed storage.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when nothing is stored under `key`.
    fn get(&self, key: &str) -> ConfiguratorResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> ConfiguratorResult<()>;
}

/// Stores each key as `<dir>/<key>.toml`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.toml"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ConfiguratorResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfiguratorError::Storage {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> ConfiguratorResult<()> {
        let storage_err = |source| ConfiguratorError::Storage {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(storage_err)?;
        fs::write(self.path_for(key), value).map_err(storage_err)
    }
}

/// In-process store.  Clones share the same entries, so a test can keep a
/// handle while the configurator owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ConfiguratorResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ConfiguratorResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── Record ────────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
struct PersistedRecord {
    version: u32,
    show_ring_top: bool,
    show_ring_bottom: bool,
    colors: ColorTable,
}

impl From<&ConfigurationState> for PersistedRecord {
    fn from(config: &ConfigurationState) -> Self {
        Self {
            version: SCHEMA_VERSION,
            show_ring_top: config.show_ring_top,
            show_ring_bottom: config.show_ring_bottom,
            colors: config.colors.clone(),
        }
    }
}

impl From<PersistedRecord> for ConfigurationState {
    fn from(record: PersistedRecord) -> Self {
        Self {
            show_ring_top: record.show_ring_top,
            show_ring_bottom: record.show_ring_bottom,
            colors: record.colors,
        }
    }
}

pub fn encode(config: &ConfigurationState) -> ConfiguratorResult<String> {
    toml::to_string_pretty(&PersistedRecord::from(config))
        .map_err(|err| ConfiguratorError::Serialize(err.to_string()))
}

pub fn decode(contents: &str) -> ConfiguratorResult<ConfigurationState> {
    let mut value: toml::Value =
        toml::from_str(contents).map_err(|err| ConfiguratorError::Parse(err.to_string()))?;

    migrate_record_value(&mut value)?;

    value
        .try_into::<PersistedRecord>()
        .map(ConfigurationState::from)
        .map_err(|err| ConfiguratorError::Parse(err.to_string()))
}

/// Move `from` to `to` unless `to` is already set.
fn rename_key(table: &mut toml::Table, from: &str, to: &str) {
    if table.contains_key(to) {
        return;
    }
    if let Some(value) = table.remove(from) {
        table.insert(to.to_string(), value);
    }
}

fn migrate_record_value(value: &mut toml::Value) -> ConfiguratorResult<()> {
    let table = value
        .as_table_mut()
        .ok_or(ConfiguratorError::InvalidRoot)?;

    // Unversioned records predate the version field and are schema 1.
    if !table.contains_key("version") {
        table.insert(
            "version".to_string(),
            toml::Value::Integer(i64::from(SCHEMA_VERSION)),
        );
    }

    let version = table
        .get("version")
        .and_then(toml::Value::as_integer)
        .ok_or_else(|| ConfiguratorError::Parse("version is not an integer".to_string()))?;

    if version < 1 || version > i64::from(SCHEMA_VERSION) {
        return Err(ConfiguratorError::UnsupportedVersion {
            found: version,
            expected: SCHEMA_VERSION,
        });
    }

    // Prototype records numbered the rings from the pommel up.
    rename_key(table, "showRing1", "showRingBottom");
    rename_key(table, "showRing2", "showRingTop");

    for key in ["showRingTop", "showRingBottom"] {
        table
            .entry(key)
            .or_insert(toml::Value::Boolean(DEFAULT_SHOW_RINGS));
    }

    let colors = table
        .entry("colors")
        .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .ok_or_else(|| ConfiguratorError::Parse("colors must be a table".to_string()))?;

    rename_key(colors, "ring1", "ringBottom");
    rename_key(colors, "ring2", "ringTop");

    let defaults = ColorTable::default();
    for slot in ColorSlot::ALL {
        colors
            .entry(slot.key())
            .or_insert_with(|| toml::Value::String(defaults.get(slot).as_str().to_string()));
    }

    Ok(())
}

// ── Adapter ───────────────────────────────────────────────────────────────────

/// Write the full state under `key`.
pub fn save(
    store: &mut dyn KeyValueStore,
    key: &str,
    config: &ConfigurationState,
) -> ConfiguratorResult<()> {
    let serialized = encode(config)?;
    store.set(key, &serialized)
}

/// Read the state under `key`, reporting why it could not be read.
pub fn try_load(
    store: &dyn KeyValueStore,
    key: &str,
) -> ConfiguratorResult<Option<ConfigurationState>> {
    match store.get(key)? {
        Some(contents) => decode(&contents).map(Some),
        None => Ok(None),
    }
}

/// Read the state under `key`.  `None` if absent or unreadable.
pub fn load(store: &dyn KeyValueStore, key: &str) -> Option<ConfigurationState> {
    match try_load(store, key) {
        Ok(config) => config,
        Err(err) => {
            warn!("Ignoring stored configuration '{}': {}", key, err);
            None
        }
    }
}

/// [`load`], falling back to the built-in default configuration.
pub fn load_or_default(store: &dyn KeyValueStore, key: &str) -> ConfigurationState {
    load(store, key).unwrap_or_default()
}
