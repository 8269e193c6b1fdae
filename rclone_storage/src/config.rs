use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::common::constants::{
    DEFAULT_RCLONE_BINARY, DEFAULT_ROOT, ENV_CONFIG_PATH, ENV_REMOTE, ENV_REMOTE_ROOT,
};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No remote name was configured. This is fatal for every storage.
    #[error("You must configure an rclone remote (settings key 'remote' or RCLONE_REMOTE)")]
    MissingRemote,

    #[error("Failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for one [`crate::RcloneStorage`].
///
/// Populated once at startup, then handed to the storage's constructor.
/// The JSON form uses camelCase keys, e.g.
/// `{"remote": "gdrive", "root": "/media", "configPath": "/etc/rclone.conf"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// Name of the rclone remote. Required.
    pub remote: Option<String>,
    /// Jail prefix every name is resolved under.
    pub root: String,
    /// Explicit rclone config file; rclone's default when `None`.
    pub config_path: Option<PathBuf>,
    /// rclone executable to run.
    pub binary: String,
    /// Kill rclone invocations running longer than this many seconds.
    pub timeout_secs: Option<u64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            remote: None,
            root: DEFAULT_ROOT.to_string(),
            config_path: None,
            binary: DEFAULT_RCLONE_BINARY.to_string(),
            timeout_secs: None,
        }
    }
}

impl StorageConfig {
    pub fn new(remote: impl Into<String>) -> Self {
        Self {
            remote: Some(remote.into()),
            ..Self::default()
        }
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_config_path(mut self, config_path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(config_path.into());
        self
    }

    /// Reads a JSON settings file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overrides fields from `RCLONE_REMOTE`, `RCLONE_REMOTE_ROOT` and `RCLONE_CONFIG_PATH`.
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| env::var(key).ok())
    }

    fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        if let Some(remote) = var(ENV_REMOTE) {
            self.remote = Some(remote);
        }
        if let Some(root) = var(ENV_REMOTE_ROOT) {
            self.root = root;
        }
        if let Some(config_path) = var(ENV_CONFIG_PATH) {
            self.config_path = Some(PathBuf::from(config_path));
        }
        self
    }

    /// The configured remote name.
    ///
    /// # Errors
    /// `MissingRemote` when no non-empty remote is set.
    pub fn require_remote(&self) -> Result<&str, ConfigError> {
        self.remote
            .as_deref()
            .filter(|remote| !remote.is_empty())
            .ok_or(ConfigError::MissingRemote)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
