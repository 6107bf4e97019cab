//! File-backed key-value store for operator paths and session data.
//!
//! The document is a single JSON object at `<root>/config/config.json`.
//! One store is opened at startup and handed to every action through the
//! action context; each `set` rewrites the whole document before returning.

pub mod keys;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value store mirrored to a JSON document on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    detail: Map<String, Value>,
}

/// Values a fresh store starts with when no document exists yet.
fn default_detail() -> Map<String, Value> {
    let mut detail = Map::new();
    detail.insert(keys::ZDMJ_MAX.to_string(), Value::from(keys::DEFAULT_ZDMJ_MAX));
    detail.insert(keys::JZMD_MAX.to_string(), Value::from(keys::DEFAULT_JZMD_MAX));
    detail
}

impl ConfigStore {
    /// Opens the store backed by `path`.
    ///
    /// An existing document is taken verbatim (defaults are not merged in).
    /// A missing document yields the defaults; nothing is written until the
    /// first `set`. An unreadable or non-object document is an error so it is
    /// never silently overwritten.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        tracing::debug!("Opening config store at {}", path.display());

        if !path.exists() {
            tracing::info!("{} not found, starting with defaults", path.display());
            return Ok(Self {
                path,
                detail: default_detail(),
            });
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config document {}", path.display()))?;
        let document: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config document {}", path.display()))?;
        let Value::Object(detail) = document else {
            return Err(anyhow!(
                "Config document {} is not a JSON object",
                path.display()
            ));
        };

        tracing::info!("Config loaded from {} ({} keys)", path.display(), detail.len());
        Ok(Self { path, detail })
    }

    /// Opens the store at the default project location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::paths::get_config_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.detail.get(key)
    }

    /// Returns the stored value for `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.detail.get(key).cloned().unwrap_or(default)
    }

    /// Returns the value for `key` when it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.detail.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.detail.contains_key(key)
    }

    /// Stores `value` under `key` and rewrites the backing document.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.detail.insert(key.to_string(), value.into());
        self.flush()
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.detail
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.detail
            .serialize(&mut ser)
            .context("Failed to serialize config document")?;

        fs::write(&self.path, buf)
            .with_context(|| format!("Failed to write config document {}", self.path.display()))
    }
}

impl fmt::Display for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string_pretty(&self.detail).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
