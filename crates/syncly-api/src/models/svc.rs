// Utility services: `/rest/svc/*`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Extra;

/// Device ID validation result. Exactly one of the fields is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceIdCheck {
    pub id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomString {
    pub random: String,
}

/// The anonymous usage report the daemon would send.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageReport {
    #[serde(rename = "folderMaxMiB")]
    pub folder_max_mib: i64,
    pub platform: String,
    #[serde(rename = "totMiB")]
    pub tot_mib: i64,
    pub long_version: String,
    pub upgrade_allowed_manual: bool,
    pub tot_files: i64,
    pub folder_uses: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "memoryUsageMiB")]
    pub memory_usage_mib: i64,
    pub version: String,
    pub sha256_perf: f64,
    pub num_folders: i64,
    pub memory_size: i64,
    pub announce: BTreeMap<String, serde_json::Value>,
    pub uses_rate_limit: bool,
    #[serde(rename = "numCPU")]
    pub num_cpu: i64,
    #[serde(rename = "uniqueID")]
    pub unique_id: String,
    pub ur_version: i64,
    pub rescan_intvs: Vec<i64>,
    pub num_devices: i64,
    pub folder_max_files: i64,
    pub relays: BTreeMap<String, serde_json::Value>,
    pub device_uses: BTreeMap<String, serde_json::Value>,
    pub upgrade_allowed_auto: bool,
    #[serde(flatten)]
    pub extra: Extra,
}
