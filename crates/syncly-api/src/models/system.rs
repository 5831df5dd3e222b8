// System state and control: `/rest/system/*` and `/rest/noauth/health`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Extra, null_as_default};

/// `GET /rest/system/status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemStatus {
    pub alloc: i64,
    pub connection_service_status: BTreeMap<String, ConnectionServiceStatus>,
    pub cpu_percent: f64,
    pub discovery_enabled: bool,
    pub discovery_errors: BTreeMap<String, String>,
    pub discovery_status: BTreeMap<String, DiscoveryStatus>,
    pub discovery_methods: i64,
    pub goroutines: i64,
    pub last_dial_status: BTreeMap<String, DialStatus>,
    #[serde(rename = "myID")]
    pub my_id: String,
    pub path_separator: String,
    pub start_time: String,
    pub sys: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub themes: Vec<String>,
    pub tilde: String,
    /// Seconds since the daemon started.
    pub uptime: u64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionServiceStatus {
    pub error: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub lan_addresses: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub wan_addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryStatus {
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialStatus {
    pub when: String,
    pub error: Option<String>,
    pub ok: Option<bool>,
}

/// One entry of the error list or the in-memory log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogLine {
    pub when: String,
    pub message: String,
    pub level: Option<i64>,
}

/// `GET /rest/system/error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemErrors {
    #[serde(deserialize_with = "null_as_default")]
    pub errors: Vec<LogLine>,
}

/// `GET /rest/system/log`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemLog {
    #[serde(deserialize_with = "null_as_default")]
    pub messages: Vec<LogLine>,
}

/// `GET /rest/system/paths`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemPaths {
    pub audit_log: String,
    pub base_dir_config: String,
    pub base_dir_data: String,
    pub base_dir_user_home: String,
    pub cert_file: String,
    pub config: String,
    pub csrf_tokens: String,
    pub database: String,
    pub def_folder: String,
    pub gui_assets: String,
    pub https_cert_file: String,
    pub https_key_file: String,
    pub key_file: String,
    pub log_file: String,
    pub panic_log: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemVersion {
    pub arch: String,
    pub long_version: String,
    pub os: String,
    pub version: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemUpgrade {
    pub latest: String,
    pub major_newer: bool,
    pub newer: bool,
    pub running: String,
}

/// `{"ping": "pong"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ping {
    pub ping: String,
}

/// `{"status": "OK"}` from the unauthenticated health probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// `GET /rest/system/connections`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Connections {
    /// Keyed by device ID.
    pub connections: BTreeMap<String, ConnectionInfo>,
    pub total: ConnectionInfo,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionInfo {
    pub at: String,
    pub in_bytes_total: i64,
    pub out_bytes_total: i64,
    pub connected: bool,
    pub paused: bool,
    pub address: String,
    pub client_version: String,
    #[serde(rename = "type")]
    pub connection_type: String,
    pub crypto: String,
    #[serde(flatten)]
    pub extra: Extra,
}
