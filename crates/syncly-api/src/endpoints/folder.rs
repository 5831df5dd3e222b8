// Folder diagnostics and versioned file restore.

use std::collections::BTreeMap;

use reqwest::Method;

use crate::client::Client;
use crate::error::Error;
use crate::models::{FolderErrors, FolderVersions, RestoreErrors};
use crate::query::{Pagination, Query};

impl Client {
    /// Items that failed to sync in the last pull.
    ///
    /// `GET /rest/folder/errors?folder=...`
    pub async fn get_folder_errors(
        &self,
        folder: &str,
        page: &Pagination,
    ) -> Result<FolderErrors, Error> {
        let query = Query::new().with("folder", folder).with_pagination(page);
        self.get_json(&["folder", "errors"], &query).await
    }

    /// Older alias of [`Client::get_folder_errors`] kept by the daemon.
    ///
    /// `GET /rest/folder/pullerrors?folder=...`
    pub async fn get_folder_pull_errors(
        &self,
        folder: &str,
        page: &Pagination,
    ) -> Result<FolderErrors, Error> {
        let query = Query::new().with("folder", folder).with_pagination(page);
        self.get_json(&["folder", "pullerrors"], &query).await
    }

    /// `GET /rest/folder/versions?folder=...`
    pub async fn get_folder_versions(&self, folder: &str) -> Result<FolderVersions, Error> {
        self.get_json(&["folder", "versions"], &Query::new().with("folder", folder))
            .await
    }

    /// Restore archived versions. `versions` maps file path to the
    /// `versionTime` to restore.
    ///
    /// `POST /rest/folder/versions?folder=...`
    pub async fn post_folder_versions(
        &self,
        folder: &str,
        versions: &BTreeMap<String, String>,
    ) -> Result<RestoreErrors, Error> {
        self.send_json(
            Method::POST,
            &["folder", "versions"],
            &Query::new().with("folder", folder),
            Some(versions),
        )
        .await
    }
}
