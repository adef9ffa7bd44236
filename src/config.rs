use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PinError, Result};

/// When the note store writes its sequence back to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PersistPolicy {
    /// Save after every mutation.
    #[default]
    Eager,
    /// Save only when the store is closed.
    OnClose,
}

impl std::fmt::Display for PersistPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistPolicy::Eager => write!(f, "eager"),
            PersistPolicy::OnClose => write!(f, "on_close"),
        }
    }
}

impl std::str::FromStr for PersistPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "eager" => Ok(PersistPolicy::Eager),
            "on_close" | "onclose" | "lazy" => Ok(PersistPolicy::OnClose),
            _ => Err(format!("Invalid persist policy: {}", s)),
        }
    }
}

/// Project configuration, stored as `.pinitup/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage key holding the JSON-encoded note array
    pub storage_key: String,
    pub persist: PersistPolicy,
    /// How long the splash overlay stays up, in milliseconds
    pub splash_ms: u64,
    /// How long the create button reads "Created!", in milliseconds
    pub created_label_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: "sticky-notes".to_string(),
            persist: PersistPolicy::Eager,
            splash_ms: 1000,
            created_label_ms: 1500,
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| PinError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn splash_duration(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }

    pub fn created_label_duration(&self) -> Duration {
        Duration::from_millis(self.created_label_ms)
    }
}
