use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use crate::utils::time::{parse_mod_time, TimestampError};

/// One object as reported by `rclone lsjson`.
///
/// Only ever produced by parsing a listing; unknown keys such as `Hashes`
/// or `Tier` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteEntry {
    /// Path relative to the listed directory.
    #[serde(default)]
    pub path: String,
    /// Leaf name.
    pub name: String,
    /// Size in bytes, `-1` for anything that is not a regular file.
    #[serde(default = "non_file_size")]
    pub size: i64,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Modification time as printed by rclone, e.g. "2021-01-21T05:52:50Z".
    #[serde(default)]
    pub mod_time: String,
    #[serde(default)]
    pub is_dir: bool,
    #[serde(rename = "ID", default)]
    pub id: Option<String>,
}

fn non_file_size() -> i64 {
    -1
}

impl RemoteEntry {
    /// Whether `leaf` names this entry, by either its name or its reported path.
    pub fn matches(&self, leaf: &str) -> bool {
        self.name == leaf || self.path == leaf
    }

    pub fn modified(&self) -> Result<DateTime<FixedOffset>, TimestampError> {
        parse_mod_time(&self.mod_time)
    }
}
