// Per-folder diagnostics and file versions: `/rest/folder/*`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderErrors {
    pub folder: String,
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<FileError>,
    pub page: u32,
    pub perpage: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileError {
    pub path: String,
    pub error: String,
}

/// Archived versions keyed by file path.
pub type FolderVersions = BTreeMap<String, Vec<FileVersion>>;

/// Per-file restore failures; empty when every restore succeeded.
pub type RestoreErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileVersion {
    pub version_time: String,
    pub mod_time: String,
    pub size: u64,
}
