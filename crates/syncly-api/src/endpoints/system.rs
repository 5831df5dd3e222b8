// System endpoints: daemon status, logs, lifecycle control.

use std::collections::BTreeMap;

use reqwest::Method;

use crate::client::{Client, NO_BODY};
use crate::error::Error;
use crate::models::{
    ConfigDocument, Connections, Ping, SystemErrors, SystemLog, SystemPaths, SystemStatus,
    SystemUpgrade, SystemVersion,
};
use crate::query::Query;

impl Client {
    // ── State ────────────────────────────────────────────────────────

    /// Directory completion for path pickers.
    ///
    /// `GET /rest/system/browse[?current=...]`
    pub async fn get_system_browse(&self, current: Option<&str>) -> Result<Vec<String>, Error> {
        self.get_json(
            &["system", "browse"],
            &Query::new().with_opt("current", current),
        )
        .await
    }

    /// Deprecated alias of [`Client::get_config`] still served by the daemon.
    ///
    /// `GET /rest/system/config`
    pub async fn get_system_config(&self) -> Result<ConfigDocument, Error> {
        self.get_json(&["system", "config"], &Query::new()).await
    }

    /// `PUT /rest/system/config`
    pub async fn put_system_config(&self, config: &ConfigDocument) -> Result<(), Error> {
        self.send_unit(Method::PUT, &["system", "config"], &Query::new(), Some(config))
            .await
    }

    /// `GET /rest/system/connections`
    pub async fn get_system_connections(&self) -> Result<Connections, Error> {
        self.get_json(&["system", "connections"], &Query::new())
            .await
    }

    /// Discovery cache, keyed by device ID.
    ///
    /// `GET /rest/system/discovery`
    pub async fn get_system_discovery(
        &self,
    ) -> Result<BTreeMap<String, serde_json::Value>, Error> {
        self.get_json(&["system", "discovery"], &Query::new()).await
    }

    /// Seed the discovery cache with an address for a device.
    ///
    /// `POST /rest/system/discovery?device=...&addr=...`
    pub async fn post_system_discovery(&self, device: &str, addr: &str) -> Result<(), Error> {
        self.send_unit(
            Method::POST,
            &["system", "discovery"],
            &Query::new().with("device", device).with("addr", addr),
            NO_BODY,
        )
        .await
    }

    /// `GET /rest/system/paths`
    pub async fn get_system_paths(&self) -> Result<SystemPaths, Error> {
        self.get_json(&["system", "paths"], &Query::new()).await
    }

    /// `GET /rest/system/status`
    pub async fn get_system_status(&self) -> Result<SystemStatus, Error> {
        self.get_json(&["system", "status"], &Query::new()).await
    }

    /// `GET /rest/system/version`
    pub async fn get_system_version(&self) -> Result<SystemVersion, Error> {
        self.get_json(&["system", "version"], &Query::new()).await
    }

    // ── Errors and logs ──────────────────────────────────────────────

    /// `GET /rest/system/error`
    pub async fn get_system_error(&self) -> Result<SystemErrors, Error> {
        self.get_json(&["system", "error"], &Query::new()).await
    }

    /// Add an entry to the daemon's error list.
    ///
    /// `POST /rest/system/error`
    pub async fn post_system_error(&self, message: &str) -> Result<(), Error> {
        self.send_unit(Method::POST, &["system", "error"], &Query::new(), Some(message))
            .await
    }

    /// `POST /rest/system/error/clear`
    pub async fn post_system_error_clear(&self) -> Result<(), Error> {
        self.send_unit(
            Method::POST,
            &["system", "error", "clear"],
            &Query::new(),
            NO_BODY,
        )
        .await
    }

    /// Recent log lines, optionally only those after the RFC 3339 `since`.
    ///
    /// `GET /rest/system/log[?since=...]`
    pub async fn get_system_log(&self, since: Option<&str>) -> Result<SystemLog, Error> {
        self.get_json(&["system", "log"], &Query::new().with_opt("since", since))
            .await
    }

    /// Same as [`Client::get_system_log`], as plain text.
    ///
    /// `GET /rest/system/log.txt[?since=...]`
    pub async fn get_system_log_txt(&self, since: Option<&str>) -> Result<String, Error> {
        self.get_text(
            &["system", "log.txt"],
            &Query::new().with_opt("since", since),
        )
        .await
    }

    /// Log facilities and their current levels.
    ///
    /// `GET /rest/system/loglevels`
    pub async fn get_system_log_levels(&self) -> Result<serde_json::Value, Error> {
        self.get_json(&["system", "loglevels"], &Query::new()).await
    }

    /// `POST /rest/system/loglevels` with `{"facility": "level", ...}`
    pub async fn post_system_log_levels(
        &self,
        levels: &BTreeMap<String, String>,
    ) -> Result<(), Error> {
        self.send_unit(
            Method::POST,
            &["system", "loglevels"],
            &Query::new(),
            Some(levels),
        )
        .await
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Pause one device, or every device when `device` is `None`.
    ///
    /// `POST /rest/system/pause[?device=...]`
    pub async fn post_system_pause(&self, device: Option<&str>) -> Result<(), Error> {
        self.send_unit(
            Method::POST,
            &["system", "pause"],
            &Query::new().with_opt("device", device),
            NO_BODY,
        )
        .await
    }

    /// Resume one device, or every device when `device` is `None`.
    ///
    /// `POST /rest/system/resume[?device=...]`
    pub async fn post_system_resume(&self, device: Option<&str>) -> Result<(), Error> {
        self.send_unit(
            Method::POST,
            &["system", "resume"],
            &Query::new().with_opt("device", device),
            NO_BODY,
        )
        .await
    }

    /// `GET /rest/system/ping`
    pub async fn get_system_ping(&self) -> Result<Ping, Error> {
        self.get_json(&["system", "ping"], &Query::new()).await
    }

    /// `POST /rest/system/ping`
    pub async fn post_system_ping(&self) -> Result<Ping, Error> {
        self.send_json(Method::POST, &["system", "ping"], &Query::new(), NO_BODY)
            .await
    }

    /// Erase the index of one folder, or the whole database, then restart.
    ///
    /// `POST /rest/system/reset[?folder=...]`
    pub async fn post_system_reset(&self, folder: Option<&str>) -> Result<(), Error> {
        self.send_unit(
            Method::POST,
            &["system", "reset"],
            &Query::new().with_opt("folder", folder),
            NO_BODY,
        )
        .await
    }

    /// `POST /rest/system/restart`
    pub async fn post_system_restart(&self) -> Result<(), Error> {
        self.send_unit(Method::POST, &["system", "restart"], &Query::new(), NO_BODY)
            .await
    }

    /// `POST /rest/system/shutdown`
    pub async fn post_system_shutdown(&self) -> Result<(), Error> {
        self.send_unit(Method::POST, &["system", "shutdown"], &Query::new(), NO_BODY)
            .await
    }

    /// `GET /rest/system/upgrade`
    pub async fn get_system_upgrade(&self) -> Result<SystemUpgrade, Error> {
        self.get_json(&["system", "upgrade"], &Query::new()).await
    }

    /// Download and install the latest release, then restart.
    ///
    /// `POST /rest/system/upgrade`
    pub async fn post_system_upgrade(&self) -> Result<(), Error> {
        self.send_unit(Method::POST, &["system", "upgrade"], &Query::new(), NO_BODY)
            .await
    }
}
