// Usage statistics: `/rest/stats/*`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Keyed by device ID.
pub type DeviceStatistics = BTreeMap<String, DeviceStats>;

/// Keyed by folder ID.
pub type FolderStatistics = BTreeMap<String, FolderStats>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceStats {
    pub last_seen: String,
    pub last_connection_duration_s: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FolderStats {
    pub last_scan: String,
    pub last_file: LastFile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastFile {
    pub filename: String,
    pub at: String,
    pub deleted: bool,
}
