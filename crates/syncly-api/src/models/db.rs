// Database views: `/rest/db/*`.

use serde::{Deserialize, Serialize};

use super::{Extra, null_as_default};

/// Folder summary from `GET /rest/db/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DbStatus {
    pub global_bytes: i64,
    pub global_deleted: i64,
    pub global_directories: i64,
    pub global_files: i64,
    pub global_symlinks: i64,
    pub global_total_items: i64,
    pub ignore_patterns: bool,
    pub in_sync_bytes: i64,
    pub in_sync_files: i64,
    pub invalid: String,
    pub local_bytes: i64,
    pub local_deleted: i64,
    pub local_directories: i64,
    pub local_files: i64,
    pub local_symlinks: i64,
    pub local_total_items: i64,
    pub need_bytes: i64,
    pub need_deletes: i64,
    pub need_directories: i64,
    pub need_files: i64,
    pub need_symlinks: i64,
    pub need_total_items: i64,
    pub pull_errors: i64,
    pub receive_only_changed_bytes: i64,
    pub receive_only_changed_deletes: i64,
    pub receive_only_changed_directories: i64,
    pub receive_only_changed_files: i64,
    pub receive_only_changed_symlinks: i64,
    pub receive_only_total_items: i64,
    pub sequence: i64,
    /// `idle`, `scanning`, `syncing`, `error`, ...
    pub state: String,
    pub state_changed: String,
    pub version: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GET /rest/db/completion`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DbCompletion {
    /// Percentage, 0 to 100.
    pub completion: f64,
    pub global_bytes: i64,
    pub need_bytes: i64,
    pub global_items: i64,
    pub need_items: i64,
    pub need_deletes: i64,
    pub remote_state: String,
    pub sequence: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

/// `GET /rest/db/file`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbFile {
    #[serde(deserialize_with = "null_as_default")]
    pub availability: Vec<Availability>,
    pub global: serde_json::Value,
    pub local: serde_json::Value,
    pub mtime: serde_json::Value,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Availability {
    pub id: String,
    pub from_temporary: bool,
}

/// `GET`/`POST /rest/db/ignores`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbIgnores {
    #[serde(deserialize_with = "null_as_default")]
    pub ignore: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub expanded: Vec<String>,
}

/// `GET /rest/db/need` and `POST /rest/db/prio`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedFiles {
    #[serde(deserialize_with = "null_as_default")]
    pub progress: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub queued: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub rest: Vec<serde_json::Value>,
    pub page: u32,
    pub perpage: u32,
}

/// Paged file list from `localchanged` and `remoteneed`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePage {
    #[serde(deserialize_with = "null_as_default")]
    pub files: Vec<serde_json::Value>,
    pub page: u32,
    pub perpage: u32,
    #[serde(flatten)]
    pub extra: Extra,
}
