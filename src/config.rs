//! Ledger configuration, read from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::service::{DEFAULT_SCAN_END, DEFAULT_SCAN_START};
use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend kind
    #[serde(default = "default_backend")]
    pub backend: StoreBackend,

    /// State file used by the file backend
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_state_path(),
        }
    }
}

fn default_backend() -> StoreBackend { StoreBackend::File }
fn default_state_path() -> PathBuf { PathBuf::from("ledger-state.json") }

/// Bounds of the `queryAllAsset` range scan. Compared as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_scan_start")]
    pub start_key: String,

    #[serde(default = "default_scan_end")]
    pub end_key: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            start_key: default_scan_start(),
            end_key: default_scan_end(),
        }
    }
}

fn default_scan_start() -> String { DEFAULT_SCAN_START.to_string() }
fn default_scan_end() -> String { DEFAULT_SCAN_END.to_string() }

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String { "asset_ledger=info".to_string() }

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `path`, or returns defaults if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }
}
