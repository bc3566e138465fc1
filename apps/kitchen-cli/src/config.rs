//! # CLI Configuration
//!
//! Settings resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--data-dir`, `--json`)
//! 2. Environment variables (`KITCHEN_*`)
//! 3. Defaults (this file)

use directories::ProjectDirs;
use kitchen_store::{StorageConfig, DEFAULT_STORAGE_KEY};
use std::path::PathBuf;

/// Default log filter when neither `RUST_LOG` nor `KITCHEN_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,kitchen=debug";

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding the snapshot file.
    pub data_dir: PathBuf,

    /// Name of the snapshot inside `data_dir`.
    pub storage_key: String,

    /// `tracing_subscriber::EnvFilter` directives.
    pub log_filter: String,

    /// Print machine-readable JSON instead of text.
    pub json: bool,
}

impl Default for CliConfig {
    /// ## Default Values
    /// - Data dir: platform data directory for `cloud-kitchen-billing`
    ///   (`~/.local/share/cloud-kitchen-billing` on Linux), or
    ///   `./kitchen-data` when the platform has none
    /// - Storage key: `cloud_kitchen_billing_state_v1`
    /// - Log filter: `info,kitchen=debug`
    fn default() -> Self {
        CliConfig {
            data_dir: default_data_dir().unwrap_or_else(|| PathBuf::from("kitchen-data")),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            json: false,
        }
    }
}

impl CliConfig {
    /// Defaults overridden by the process environment.
    ///
    /// ## Environment Variables
    /// - `KITCHEN_DATA_DIR`: Override data directory
    /// - `KITCHEN_STORAGE_KEY`: Override storage key
    /// - `KITCHEN_LOG`: Override default log filter
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = CliConfig::default();

        if let Some(dir) = lookup("KITCHEN_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(key) = lookup("KITCHEN_STORAGE_KEY").filter(|v| !v.trim().is_empty()) {
            config.storage_key = key.trim().to_string();
        }

        if let Some(filter) = lookup("KITCHEN_LOG").filter(|v| !v.trim().is_empty()) {
            config.log_filter = filter;
        }

        config
    }

    /// Applies command-line flags on top.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, json: bool) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self.json |= json;
        self
    }

    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig::new(self.data_dir.clone()).key(self.storage_key.clone())
    }
}

/// Platform-specific data directory.
///
/// - **macOS**: `~/Library/Application Support/cloud-kitchen-billing`
/// - **Windows**: `%APPDATA%\cloud-kitchen-billing\data`
/// - **Linux**: `~/.local/share/cloud-kitchen-billing`
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cloud-kitchen-billing").map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[]));
        assert_eq!(config.storage_key, "cloud_kitchen_billing_state_v1");
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(!config.json);
    }

    #[test]
    fn test_env_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            ("KITCHEN_DATA_DIR", "/srv/kitchen"),
            ("KITCHEN_STORAGE_KEY", " branch_2 "),
            ("KITCHEN_LOG", "warn"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/kitchen"));
        assert_eq!(config.storage_key, "branch_2");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config = CliConfig::from_lookup(lookup(&[("KITCHEN_STORAGE_KEY", "  ")]));
        assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_flags_win_over_env() {
        let config = CliConfig::from_lookup(lookup(&[("KITCHEN_DATA_DIR", "/from/env")]))
            .with_overrides(Some(PathBuf::from("/from/flag")), true);
        assert_eq!(config.data_dir, PathBuf::from("/from/flag"));
        assert!(config.json);

        let storage = config.storage_config();
        assert_eq!(storage.data_dir, Some(PathBuf::from("/from/flag")));
        assert_eq!(storage.storage_key, DEFAULT_STORAGE_KEY);
    }
}
