// Cluster endpoints: devices and folders offered by peers but not yet
// configured locally.

use reqwest::Method;

use crate::client::{Client, NO_BODY};
use crate::error::Error;
use crate::models::{PendingDevices, PendingFolders};
use crate::query::Query;

impl Client {
    /// `GET /rest/cluster/pending/devices`
    pub async fn get_cluster_pending_devices(&self) -> Result<PendingDevices, Error> {
        self.get_json(&["cluster", "pending", "devices"], &Query::new())
            .await
    }

    /// Dismiss a pending device until it connects again.
    ///
    /// `DELETE /rest/cluster/pending/devices?device=...`
    pub async fn delete_cluster_pending_device(&self, device: &str) -> Result<(), Error> {
        self.send_unit(
            Method::DELETE,
            &["cluster", "pending", "devices"],
            &Query::new().with("device", device),
            NO_BODY,
        )
        .await
    }

    /// `GET /rest/cluster/pending/folders`, optionally limited to one offering device.
    pub async fn get_cluster_pending_folders(
        &self,
        device: Option<&str>,
    ) -> Result<PendingFolders, Error> {
        self.get_json(
            &["cluster", "pending", "folders"],
            &Query::new().with_opt("device", device),
        )
        .await
    }

    /// `DELETE /rest/cluster/pending/folders?folder=...[&device=...]`
    pub async fn delete_cluster_pending_folder(
        &self,
        folder: &str,
        device: Option<&str>,
    ) -> Result<(), Error> {
        self.send_unit(
            Method::DELETE,
            &["cluster", "pending", "folders"],
            &Query::new().with("folder", folder).with_opt("device", device),
            NO_BODY,
        )
        .await
    }
}
