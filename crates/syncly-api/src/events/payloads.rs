// Typed `data` payloads, one per event kind.
//
// All structs default missing fields, so only a type mismatch makes a
// payload fall back to `EventData::Unknown`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{DbStatus, FileError, null_as_default};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfigReceived {
    pub device: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceConnected {
    pub addr: String,
    pub id: String,
    pub device_name: String,
    pub client_name: String,
    pub client_version: String,
    #[serde(rename = "type")]
    pub connection_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceDisconnected {
    pub error: String,
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceDiscovered {
    #[serde(deserialize_with = "null_as_default")]
    pub addrs: Vec<String>,
    pub device: String,
}

/// Shared by `DevicePaused` and `DeviceResumed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceRef {
    pub device: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceRejected {
    pub address: String,
    pub name: String,
    pub device: String,
}

/// Folder ID, then file name, then progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownloadProgress(pub BTreeMap<String, BTreeMap<String, PullerProgress>>);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullerProgress {
    pub total: i64,
    pub pulling: i64,
    pub copied_from_origin: i64,
    pub reused: i64,
    pub copied_from_elsewhere: i64,
    pub pulled: i64,
    pub bytes_total: i64,
    pub bytes_done: i64,
}

/// The daemon sends either a bare string or `{"error": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub error: String,
}

impl<'de> Deserialize<'de> for Failure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Message(String),
            Object {
                #[serde(default)]
                error: String,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Message(error) | Repr::Object { error } => Self { error },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FolderCompletion {
    pub completion: f64,
    pub device: String,
    pub folder: String,
    pub global_bytes: i64,
    pub global_items: i64,
    pub need_bytes: i64,
    pub need_deletes: i64,
    pub need_items: i64,
    pub remote_state: String,
    pub sequence: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderErrorsData {
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<FileError>,
    pub folder: String,
}

/// Shared by `FolderPaused` and `FolderResumed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderRef {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FolderRejected {
    pub device: String,
    pub folder: String,
    pub folder_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderScanProgress {
    pub total: i64,
    pub rate: f64,
    pub current: i64,
    pub folder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderSummary {
    pub folder: String,
    pub summary: DbStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderWatchStateChanged {
    pub folder: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFinished {
    pub item: String,
    pub folder: String,
    pub error: Option<String>,
    #[serde(rename = "type")]
    pub item_type: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStarted {
    pub item: String,
    pub folder: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub action: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenAddressesChanged {
    pub address: serde_json::Value,
    #[serde(deserialize_with = "null_as_default")]
    pub wan: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub lan: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalChangeDetected {
    pub action: String,
    pub folder: String,
    #[serde(rename = "folderID")]
    pub folder_id: String,
    pub label: String,
    pub path: String,
    #[serde(rename = "type")]
    pub item_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalIndexUpdated {
    pub folder: String,
    pub items: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub filenames: Vec<String>,
    pub sequence: i64,
    pub version: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginAttempt {
    pub remote_address: String,
    pub username: String,
    pub success: bool,
    pub proxy: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingDevicesChanged {
    #[serde(deserialize_with = "null_as_default")]
    pub added: Vec<PendingDeviceAdded>,
    #[serde(deserialize_with = "null_as_default")]
    pub removed: Vec<PendingDeviceRemoved>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingDeviceAdded {
    pub address: String,
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingDeviceRemoved {
    #[serde(rename = "deviceID")]
    pub device_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingFoldersChanged {
    #[serde(deserialize_with = "null_as_default")]
    pub added: Vec<PendingFolderAdded>,
    #[serde(deserialize_with = "null_as_default")]
    pub removed: Vec<PendingFolderRemoved>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PendingFolderAdded {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(rename = "folderID")]
    pub folder_id: String,
    pub folder_label: String,
    pub receive_encrypted: bool,
    pub remote_encrypted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingFolderRemoved {
    #[serde(rename = "deviceID")]
    pub device_id: Option<String>,
    #[serde(rename = "folderID")]
    pub folder_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoteChangeDetected {
    #[serde(rename = "type")]
    pub item_type: String,
    pub action: String,
    pub folder: String,
    #[serde(rename = "folderID")]
    pub folder_id: String,
    pub path: String,
    pub label: String,
    pub modified_by: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteDownloadProgress {
    /// File name to number of blocks downloaded.
    pub state: BTreeMap<String, i64>,
    pub device: String,
    pub folder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteIndexUpdated {
    pub device: String,
    pub folder: String,
    pub items: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Starting {
    pub home: String,
}

/// Carries no data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupComplete {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateChanged {
    pub folder: String,
    pub from: String,
    /// Seconds spent in `from`.
    pub duration: f64,
    pub to: String,
    pub error: Option<String>,
}
