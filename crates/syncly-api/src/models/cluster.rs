// Pending devices and folders: `/rest/cluster/pending/*`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Keyed by device ID.
pub type PendingDevices = BTreeMap<String, PendingDevice>;

/// Keyed by folder ID.
pub type PendingFolders = BTreeMap<String, PendingFolder>;

/// A device that tried to connect but is not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingDevice {
    pub time: String,
    pub name: String,
    pub address: String,
}

/// A folder some devices offered that is not configured locally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PendingFolder {
    /// Keyed by the offering device's ID.
    pub offered_by: BTreeMap<String, PendingFolderOffer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PendingFolderOffer {
    pub time: String,
    pub label: String,
    pub receive_encrypted: bool,
    pub remote_encrypted: bool,
}
