// Configuration document: `/rest/config` and its sub-resources.

use serde::{Deserialize, Serialize};

use super::{Extra, null_as_default};

/// The daemon's full configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigDocument {
    pub version: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub folders: Vec<Folder>,
    #[serde(deserialize_with = "null_as_default")]
    pub devices: Vec<Device>,
    pub gui: GuiConfig,
    pub ldap: serde_json::Value,
    pub options: Options,
    #[serde(deserialize_with = "null_as_default")]
    pub remote_ignored_devices: Vec<serde_json::Value>,
    pub defaults: ConfigDefaults,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Templates applied to newly added folders and devices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDefaults {
    pub folder: Folder,
    pub device: Device,
    pub ignores: Ignores,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ignores {
    #[serde(deserialize_with = "null_as_default")]
    pub lines: Vec<String>,
}

/// A configured folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Folder {
    pub id: String,
    pub label: String,
    pub filesystem_type: String,
    pub path: String,
    /// `sendreceive`, `sendonly`, `receiveonly` or `receiveencrypted`.
    #[serde(rename = "type")]
    pub folder_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub devices: Vec<FolderDevice>,
    pub rescan_interval_s: i64,
    pub fs_watcher_enabled: bool,
    pub fs_watcher_delay_s: f64,
    pub ignore_perms: bool,
    pub auto_normalize: bool,
    pub min_disk_free: Size,
    pub versioning: Versioning,
    pub copiers: i64,
    #[serde(rename = "pullerMaxPendingKiB")]
    pub puller_max_pending_kib: i64,
    pub hashes: i64,
    pub order: String,
    pub ignore_delete: bool,
    pub scan_progress_interval_s: i64,
    pub puller_pause_s: i64,
    pub max_conflicts: i64,
    pub disable_sparse_files: bool,
    pub paused: bool,
    pub marker_name: String,
    pub copy_ownership_from_parent: bool,
    pub mod_time_window_s: i64,
    pub max_concurrent_writes: i64,
    pub disable_fsync: bool,
    pub block_pull_order: String,
    pub copy_range_method: String,
    #[serde(rename = "caseSensitiveFS")]
    pub case_sensitive_fs: bool,
    pub junctions_as_dirs: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A device a folder is shared with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FolderDevice {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub introduced_by: String,
    pub encryption_password: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Threshold with a unit, e.g. `{"value": 1, "unit": "%"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Size {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Versioning {
    #[serde(rename = "type")]
    pub versioning_type: String,
    pub params: serde_json::Map<String, serde_json::Value>,
    pub cleanup_interval_s: i64,
    pub fs_path: String,
    pub fs_type: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A configured remote device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub addresses: Vec<String>,
    pub compression: String,
    pub cert_name: String,
    pub introducer: bool,
    pub skip_introduction_removals: bool,
    pub introduced_by: String,
    pub paused: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allowed_networks: Vec<String>,
    pub auto_accept_folders: bool,
    pub max_send_kbps: i64,
    pub max_recv_kbps: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ignored_folders: Vec<ObservedFolder>,
    #[serde(rename = "maxRequestKiB")]
    pub max_request_kib: i64,
    pub untrusted: bool,
    #[serde(rename = "remoteGUIPort")]
    pub remote_gui_port: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservedFolder {
    pub time: String,
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuiConfig {
    pub enabled: bool,
    pub address: String,
    pub unix_socket_permissions: String,
    pub user: String,
    pub password: String,
    pub auth_mode: String,
    #[serde(rename = "useTLS")]
    pub use_tls: bool,
    pub api_key: String,
    pub insecure_admin_access: bool,
    pub theme: String,
    pub insecure_skip_hostcheck: bool,
    pub insecure_allow_frame_loading: bool,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    #[serde(deserialize_with = "null_as_default")]
    pub listen_addresses: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub global_announce_servers: Vec<String>,
    pub global_announce_enabled: bool,
    pub local_announce_enabled: bool,
    pub local_announce_port: i64,
    #[serde(rename = "localAnnounceMCAddr")]
    pub local_announce_mc_addr: String,
    pub max_send_kbps: i64,
    pub max_recv_kbps: i64,
    pub reconnection_interval_s: i64,
    pub relays_enabled: bool,
    pub relay_reconnect_interval_m: i64,
    pub start_browser: bool,
    pub nat_enabled: bool,
    pub nat_lease_minutes: i64,
    pub nat_renewal_minutes: i64,
    pub nat_timeout_seconds: i64,
    pub ur_accepted: i64,
    pub ur_seen: i64,
    pub ur_unique_id: String,
    #[serde(rename = "urURL")]
    pub ur_url: String,
    pub ur_post_insecurely: bool,
    pub ur_initial_delay_s: i64,
    pub auto_upgrade_interval_h: i64,
    pub upgrade_to_pre_releases: bool,
    pub keep_temporaries_h: i64,
    pub cache_ignored_files: bool,
    pub progress_update_interval_s: i64,
    pub limit_bandwidth_in_lan: bool,
    pub min_home_disk_free: Size,
    #[serde(rename = "releasesURL")]
    pub releases_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub always_local_nets: Vec<String>,
    pub overwrite_remote_device_names_on_connect: bool,
    pub temp_index_min_blocks: i64,
    #[serde(rename = "unackedNotificationIDs", deserialize_with = "null_as_default")]
    pub unacked_notification_ids: Vec<String>,
    pub traffic_class: i64,
    pub set_low_priority: bool,
    pub max_folder_concurrency: i64,
    #[serde(rename = "crURL")]
    pub cr_url: String,
    pub crash_reporting_enabled: bool,
    pub stun_keepalive_start_s: i64,
    pub stun_keepalive_min_s: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub stun_servers: Vec<String>,
    #[serde(rename = "maxConcurrentIncomingRequestKiB")]
    pub max_concurrent_incoming_request_kib: i64,
    #[serde(rename = "announceLANAddresses")]
    pub announce_lan_addresses: bool,
    pub send_full_index_on_upgrade: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub feature_flags: Vec<String>,
    pub connection_limit_enough: i64,
    pub connection_limit_max: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Answer of `GET /rest/config/restart-required`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RestartRequired {
    pub requires_restart: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_folder_fields_survive_a_round_trip() {
        let raw = json!({
            "id": "abcd-1234",
            "label": "Photos",
            "path": "/data/photos",
            "type": "sendreceive",
            "devices": [{"deviceID": "AAAA", "introducedBy": "", "encryptionPassword": ""}],
            "pullerMaxPendingKiB": 0,
            "caseSensitiveFS": false,
            "syncOwnership": true,
            "xattrFilter": {"entries": [], "maxSingleEntrySize": 1024}
        });
        let folder: Folder = serde_json::from_value(raw).unwrap();
        assert_eq!(folder.folder_type, "sendreceive");
        assert_eq!(folder.devices[0].device_id, "AAAA");
        assert!(folder.extra.contains_key("syncOwnership"));

        let back = serde_json::to_value(&folder).unwrap();
        assert_eq!(back["syncOwnership"], json!(true));
        assert_eq!(back["xattrFilter"]["maxSingleEntrySize"], json!(1024));
        assert_eq!(back["pullerMaxPendingKiB"], json!(0));
    }

    #[test]
    fn null_lists_read_as_empty() {
        let device: Device =
            serde_json::from_value(json!({"deviceID": "BBBB", "addresses": null, "ignoredFolders": null}))
                .unwrap();
        assert!(device.addresses.is_empty());
        assert!(device.ignored_folders.is_empty());
    }
}
