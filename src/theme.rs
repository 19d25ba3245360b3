//! Light/dark theme preference.
//!
//! The only thing the site ever persists: one string (`"light"` or
//! `"dark"`) under a fixed key in a key-value store. In the browser that
//! store is `localStorage`; the CLI uses a small JSON file so the same
//! logic can be inspected from a terminal.
//!
//! ## Resolution order
//!
//! 1. A valid stored value
//! 2. The platform preference (`prefers-color-scheme: dark`)
//! 3. The configured default
//!
//! Unknown stored strings count as "nothing stored".

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Key the preference is stored under unless configured otherwise.
pub const STORAGE_KEY: &str = "theme";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

/// String key-value store the preference lives in.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store that forgets everything when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat JSON object on disk.
///
/// A missing file reads as empty; the file is created on first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        Ok(())
    }
}

/// Theme preference bound to a store and a key.
#[derive(Debug)]
pub struct ThemePreference<S> {
    store: S,
    key: String,
    fallback: Theme,
}

impl<S: PreferenceStore> ThemePreference<S> {
    pub fn new(store: S, key: impl Into<String>, fallback: Theme) -> Self {
        Self {
            store,
            key: key.into(),
            fallback,
        }
    }

    /// The stored theme, ignoring values that are not a known theme.
    pub fn stored(&self) -> Result<Option<Theme>, StoreError> {
        Ok(self
            .store
            .get(&self.key)?
            .and_then(|value| value.parse().ok()))
    }

    /// Theme to apply on page load.
    pub fn resolve(&self, system_prefers_dark: bool) -> Result<Theme, StoreError> {
        Ok(self.stored()?.unwrap_or(if system_prefers_dark {
            Theme::Dark
        } else {
            self.fallback
        }))
    }

    /// Flip from `current`, persist, and return the new theme.
    pub fn toggle(&mut self, current: Theme) -> Result<Theme, StoreError> {
        let next = current.toggled();
        self.store.set(&self.key, next.as_str())?;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
