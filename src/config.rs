//! Loader configuration.
//!
//! Settings are read from a JSON file, by default
//! `<config dir>/dylib-resolver/config.json`, or from the path in
//! `DYLIB_RESOLVER_CONFIG`. Every field is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::constants::{CONFIG_PATH_VAR, SLOW_SCAN_MS, UNIX_PATH_VARS};
use crate::error::LoaderResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Root ld.so.conf. `None` means `<sysroot>/etc/ld.so.conf`.
    pub ld_so_conf: Option<PathBuf>,
    /// Directories registered before any call to `add_search_directories`
    pub search_dirs: Vec<PathBuf>,
    /// Path-list variables seeding the Unix-like catalog, highest priority first
    pub path_vars: Vec<String>,
    /// Index builds slower than this many milliseconds are logged
    pub slow_scan_ms: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            ld_so_conf: None,
            search_dirs: Vec::new(),
            path_vars: UNIX_PATH_VARS.iter().map(|v| v.to_string()).collect(),
            slow_scan_ms: SLOW_SCAN_MS,
        }
    }
}

impl LoaderConfig {
    pub fn from_file(path: impl AsRef<Path>) -> LoaderResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> LoaderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read the default config file, falling back to defaults when it is
    /// missing or invalid.
    pub fn load_default() -> Self {
        let Some(path) = default_config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), "Ignoring loader config: {}", e);
                Self::default()
            }
        }
    }
}

/// Location of the loader config file.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_VAR) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("dylib-resolver").join("config.json"))
}
