//! Persistence for saved dashboards.
//!
//! Storage is a plain string key-value abstraction ([`KeyValueStore`]) injected into
//! [`DashboardStore`], which owns the JSON encoding of [`SavedDashboard`]s. Nothing in
//! [`crate::analysis`] depends on this module.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};
use crate::query::ChartQuerySpec;

/// String key-value storage backend.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> DashboardResult<Option<String>>;

    fn set(&self, key: &str, value: String) -> DashboardResult<()>;

    /// Returns `true` if the key existed.
    fn remove(&self, key: &str) -> DashboardResult<bool>;

    /// All keys, sorted.
    fn keys(&self) -> DashboardResult<Vec<String>>;
}

fn lock<T>(m: &Mutex<T>) -> DashboardResult<MutexGuard<'_, T>> {
    m.lock().map_err(|_| DashboardError::Store {
        message: "store mutex poisoned".to_string(),
    })
}

/// In-memory store; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> DashboardResult<Option<String>> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> DashboardResult<()> {
        lock(&self.entries)?.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> DashboardResult<bool> {
        Ok(lock(&self.entries)?.remove(key).is_some())
    }

    fn keys(&self) -> DashboardResult<Vec<String>> {
        Ok(lock(&self.entries)?.keys().cloned().collect())
    }
}

/// Stores all entries as one JSON object in a file.
///
/// Every operation re-reads the file, so several stores may point at the same path. Writes go
/// to a sibling temp file first and are then renamed over the original.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// A missing file is treated as an empty store and created on the first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> DashboardResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> DashboardResult<()> {
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> DashboardResult<Option<String>> {
        let _guard = lock(&self.lock)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: String) -> DashboardResult<()> {
        let _guard = lock(&self.lock)?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> DashboardResult<bool> {
        let _guard = lock(&self.lock)?;
        let mut entries = self.read_all()?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.write_all(&entries)?;
        }
        Ok(existed)
    }

    fn keys(&self) -> DashboardResult<Vec<String>> {
        let _guard = lock(&self.lock)?;
        Ok(self.read_all()?.into_keys().collect())
    }
}

/// A named set of chart configurations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedDashboard {
    pub name: String,
    #[serde(default)]
    pub charts: Vec<ChartQuerySpec>,
}

impl SavedDashboard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            charts: Vec::new(),
        }
    }

    pub fn with_chart(mut self, chart: ChartQuerySpec) -> Self {
        self.charts.push(chart);
        self
    }
}

const KEY_PREFIX: &str = "dashboard:";

/// Saves and loads [`SavedDashboard`]s through a [`KeyValueStore`].
#[derive(Debug)]
pub struct DashboardStore<S> {
    backend: S,
}

impl<S: KeyValueStore> DashboardStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Insert or replace a dashboard by name.
    pub fn save(&self, dashboard: &SavedDashboard) -> DashboardResult<()> {
        let key = key_for(&dashboard.name)?;
        let json = serde_json::to_string(dashboard)?;
        self.backend.set(&key, json)?;
        tracing::debug!(
            target: "dashboard::store",
            name = %dashboard.name,
            charts = dashboard.charts.len(),
            "dashboard saved"
        );
        Ok(())
    }

    pub fn load(&self, name: &str) -> DashboardResult<Option<SavedDashboard>> {
        let key = key_for(name)?;
        match self.backend.get(&key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Names of all saved dashboards, sorted.
    pub fn list(&self) -> DashboardResult<Vec<String>> {
        Ok(self
            .backend
            .keys()?
            .into_iter()
            .filter_map(|k| k.strip_prefix(KEY_PREFIX).map(str::to_string))
            .collect())
    }

    /// Returns `true` if a dashboard was deleted.
    pub fn delete(&self, name: &str) -> DashboardResult<bool> {
        let removed = self.backend.remove(&key_for(name)?)?;
        tracing::debug!(target: "dashboard::store", name, removed, "dashboard deleted");
        Ok(removed)
    }
}

fn key_for(name: &str) -> DashboardResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DashboardError::Store {
            message: "dashboard name must not be empty".to_string(),
        });
    }
    Ok(format!("{KEY_PREFIX}{name}"))
}
