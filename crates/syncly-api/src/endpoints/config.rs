// Configuration endpoints.
//
// `PUT` replaces a resource wholesale, `PATCH` merges the given fields,
// `POST` on a collection adds an entry.

use reqwest::Method;
use serde::Serialize;

use crate::client::{Client, NO_BODY};
use crate::error::Error;
use crate::models::{
    ConfigDocument, Device, Folder, GuiConfig, Ignores, Options, RestartRequired,
};
use crate::query::Query;

impl Client {
    // ── Whole document ───────────────────────────────────────────────

    /// `GET /rest/config`
    pub async fn get_config(&self) -> Result<ConfigDocument, Error> {
        self.get_json(&["config"], &Query::new()).await
    }

    /// `PUT /rest/config`
    pub async fn put_config(&self, config: &ConfigDocument) -> Result<(), Error> {
        self.send_unit(Method::PUT, &["config"], &Query::new(), Some(config))
            .await
    }

    /// `GET /rest/config/restart-required`
    pub async fn get_config_restart_required(&self) -> Result<RestartRequired, Error> {
        self.get_json(&["config", "restart-required"], &Query::new())
            .await
    }

    // ── Folders ──────────────────────────────────────────────────────

    /// `GET /rest/config/folders`
    pub async fn get_config_folders(&self) -> Result<Vec<Folder>, Error> {
        self.get_json(&["config", "folders"], &Query::new()).await
    }

    /// Replace the whole folder list.
    ///
    /// `PUT /rest/config/folders`
    pub async fn put_config_folders(&self, folders: &[Folder]) -> Result<(), Error> {
        self.send_unit(Method::PUT, &["config", "folders"], &Query::new(), Some(folders))
            .await
    }

    /// `POST /rest/config/folders`
    pub async fn post_config_folder(&self, folder: &Folder) -> Result<(), Error> {
        self.send_unit(Method::POST, &["config", "folders"], &Query::new(), Some(folder))
            .await
    }

    /// `GET /rest/config/folders/{id}`
    pub async fn get_config_folder(&self, id: &str) -> Result<Folder, Error> {
        self.get_json(&["config", "folders", id], &Query::new()).await
    }

    /// `PUT /rest/config/folders/{id}`
    pub async fn put_config_folder(&self, id: &str, folder: &Folder) -> Result<(), Error> {
        self.send_unit(
            Method::PUT,
            &["config", "folders", id],
            &Query::new(),
            Some(folder),
        )
        .await
    }

    /// Merge `patch` into one folder, e.g. `json!({"paused": true})`.
    ///
    /// `PATCH /rest/config/folders/{id}`
    pub async fn patch_config_folder<B>(&self, id: &str, patch: &B) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_unit(
            Method::PATCH,
            &["config", "folders", id],
            &Query::new(),
            Some(patch),
        )
        .await
    }

    /// `DELETE /rest/config/folders/{id}`
    pub async fn delete_config_folder(&self, id: &str) -> Result<(), Error> {
        self.send_unit(
            Method::DELETE,
            &["config", "folders", id],
            &Query::new(),
            NO_BODY,
        )
        .await
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// `GET /rest/config/devices`
    pub async fn get_config_devices(&self) -> Result<Vec<Device>, Error> {
        self.get_json(&["config", "devices"], &Query::new()).await
    }

    /// Replace the whole device list.
    ///
    /// `PUT /rest/config/devices`
    pub async fn put_config_devices(&self, devices: &[Device]) -> Result<(), Error> {
        self.send_unit(Method::PUT, &["config", "devices"], &Query::new(), Some(devices))
            .await
    }

    /// `POST /rest/config/devices`
    pub async fn post_config_device(&self, device: &Device) -> Result<(), Error> {
        self.send_unit(Method::POST, &["config", "devices"], &Query::new(), Some(device))
            .await
    }

    /// `GET /rest/config/devices/{id}`
    pub async fn get_config_device(&self, id: &str) -> Result<Device, Error> {
        self.get_json(&["config", "devices", id], &Query::new()).await
    }

    /// `PUT /rest/config/devices/{id}`
    pub async fn put_config_device(&self, id: &str, device: &Device) -> Result<(), Error> {
        self.send_unit(
            Method::PUT,
            &["config", "devices", id],
            &Query::new(),
            Some(device),
        )
        .await
    }

    /// `PATCH /rest/config/devices/{id}`
    pub async fn patch_config_device<B>(&self, id: &str, patch: &B) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_unit(
            Method::PATCH,
            &["config", "devices", id],
            &Query::new(),
            Some(patch),
        )
        .await
    }

    /// `DELETE /rest/config/devices/{id}`
    pub async fn delete_config_device(&self, id: &str) -> Result<(), Error> {
        self.send_unit(
            Method::DELETE,
            &["config", "devices", id],
            &Query::new(),
            NO_BODY,
        )
        .await
    }

    // ── Defaults ─────────────────────────────────────────────────────

    /// `GET /rest/config/defaults/folder`
    pub async fn get_config_default_folder(&self) -> Result<Folder, Error> {
        self.get_json(&["config", "defaults", "folder"], &Query::new())
            .await
    }

    /// `PUT /rest/config/defaults/folder`
    pub async fn put_config_default_folder(&self, folder: &Folder) -> Result<(), Error> {
        self.send_unit(
            Method::PUT,
            &["config", "defaults", "folder"],
            &Query::new(),
            Some(folder),
        )
        .await
    }

    /// `PATCH /rest/config/defaults/folder`
    pub async fn patch_config_default_folder<B>(&self, patch: &B) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_unit(
            Method::PATCH,
            &["config", "defaults", "folder"],
            &Query::new(),
            Some(patch),
        )
        .await
    }

    /// `GET /rest/config/defaults/device`
    pub async fn get_config_default_device(&self) -> Result<Device, Error> {
        self.get_json(&["config", "defaults", "device"], &Query::new())
            .await
    }

    /// `PUT /rest/config/defaults/device`
    pub async fn put_config_default_device(&self, device: &Device) -> Result<(), Error> {
        self.send_unit(
            Method::PUT,
            &["config", "defaults", "device"],
            &Query::new(),
            Some(device),
        )
        .await
    }

    /// `PATCH /rest/config/defaults/device`
    pub async fn patch_config_default_device<B>(&self, patch: &B) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_unit(
            Method::PATCH,
            &["config", "defaults", "device"],
            &Query::new(),
            Some(patch),
        )
        .await
    }

    /// `GET /rest/config/defaults/ignores`
    pub async fn get_config_default_ignores(&self) -> Result<Ignores, Error> {
        self.get_json(&["config", "defaults", "ignores"], &Query::new())
            .await
    }

    /// `PUT /rest/config/defaults/ignores`
    pub async fn put_config_default_ignores(&self, ignores: &Ignores) -> Result<(), Error> {
        self.send_unit(
            Method::PUT,
            &["config", "defaults", "ignores"],
            &Query::new(),
            Some(ignores),
        )
        .await
    }

    // ── Options and GUI ──────────────────────────────────────────────

    /// `GET /rest/config/options`
    pub async fn get_config_options(&self) -> Result<Options, Error> {
        self.get_json(&["config", "options"], &Query::new()).await
    }

    /// `PUT /rest/config/options`
    pub async fn put_config_options(&self, options: &Options) -> Result<(), Error> {
        self.send_unit(Method::PUT, &["config", "options"], &Query::new(), Some(options))
            .await
    }

    /// `PATCH /rest/config/options`
    pub async fn patch_config_options<B>(&self, patch: &B) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_unit(Method::PATCH, &["config", "options"], &Query::new(), Some(patch))
            .await
    }

    /// `GET /rest/config/gui`
    pub async fn get_config_gui(&self) -> Result<GuiConfig, Error> {
        self.get_json(&["config", "gui"], &Query::new()).await
    }

    /// `PUT /rest/config/gui`
    pub async fn put_config_gui(&self, gui: &GuiConfig) -> Result<(), Error> {
        self.send_unit(Method::PUT, &["config", "gui"], &Query::new(), Some(gui))
            .await
    }

    /// `PATCH /rest/config/gui`
    pub async fn patch_config_gui<B>(&self, patch: &B) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send_unit(Method::PATCH, &["config", "gui"], &Query::new(), Some(patch))
            .await
    }
}
