// Database endpoints: per-folder index state, scans and file priorities.

use reqwest::Method;
use serde_json::json;

use crate::client::{Client, NO_BODY};
use crate::error::Error;
use crate::models::{DbCompletion, DbFile, DbIgnores, DbStatus, FilePage, NeedFiles};
use crate::query::{Pagination, Query};

impl Client {
    /// Directory tree of a folder as the index sees it.
    ///
    /// `GET /rest/db/browse?folder=...[&levels=...][&prefix=...]`
    ///
    /// Returns loosely-typed JSON because the nesting depends on `levels`.
    pub async fn get_db_browse(
        &self,
        folder: &str,
        levels: Option<u32>,
        prefix: Option<&str>,
    ) -> Result<serde_json::Value, Error> {
        let query = Query::new()
            .with("folder", folder)
            .with_opt("levels", levels)
            .with_opt("prefix", prefix);
        self.get_json(&["db", "browse"], &query).await
    }

    /// Sync completion of a folder, a device, or both. With neither the
    /// daemon reports the aggregate over everything.
    ///
    /// `GET /rest/db/completion`
    pub async fn get_db_completion(
        &self,
        folder: Option<&str>,
        device: Option<&str>,
    ) -> Result<DbCompletion, Error> {
        let query = Query::new()
            .with_opt("folder", folder)
            .with_opt("device", device);
        self.get_json(&["db", "completion"], &query).await
    }

    /// `GET /rest/db/file?folder=...&file=...`
    pub async fn get_db_file(&self, folder: &str, file: &str) -> Result<DbFile, Error> {
        let query = Query::new().with("folder", folder).with("file", file);
        self.get_json(&["db", "file"], &query).await
    }

    /// `GET /rest/db/ignores?folder=...`
    pub async fn get_db_ignores(&self, folder: &str) -> Result<DbIgnores, Error> {
        self.get_json(&["db", "ignores"], &Query::new().with("folder", folder))
            .await
    }

    /// Replace a folder's ignore patterns; answers with the new set.
    ///
    /// `POST /rest/db/ignores?folder=...` with `{"ignore": [...]}`
    pub async fn post_db_ignores(
        &self,
        folder: &str,
        patterns: &[String],
    ) -> Result<DbIgnores, Error> {
        self.send_json(
            Method::POST,
            &["db", "ignores"],
            &Query::new().with("folder", folder),
            Some(&json!({ "ignore": patterns })),
        )
        .await
    }

    /// `GET /rest/db/localchanged?folder=...`
    pub async fn get_db_local_changed(
        &self,
        folder: &str,
        page: &Pagination,
    ) -> Result<FilePage, Error> {
        let query = Query::new().with("folder", folder).with_pagination(page);
        self.get_json(&["db", "localchanged"], &query).await
    }

    /// `GET /rest/db/need?folder=...`
    pub async fn get_db_need(&self, folder: &str, page: &Pagination) -> Result<NeedFiles, Error> {
        let query = Query::new().with("folder", folder).with_pagination(page);
        self.get_json(&["db", "need"], &query).await
    }

    /// Make the local state of a send-only folder the global state.
    ///
    /// `POST /rest/db/override?folder=...`
    pub async fn post_db_override(&self, folder: &str) -> Result<(), Error> {
        self.send_unit(
            Method::POST,
            &["db", "override"],
            &Query::new().with("folder", folder),
            NO_BODY,
        )
        .await
    }

    /// Move a file to the head of the download queue.
    ///
    /// `POST /rest/db/prio?folder=...&file=...`
    pub async fn post_db_prio(&self, folder: &str, file: &str) -> Result<NeedFiles, Error> {
        self.send_json(
            Method::POST,
            &["db", "prio"],
            &Query::new().with("folder", folder).with("file", file),
            NO_BODY,
        )
        .await
    }

    /// `GET /rest/db/remoteneed?folder=...&device=...`
    pub async fn get_db_remote_need(
        &self,
        folder: &str,
        device: &str,
        page: &Pagination,
    ) -> Result<FilePage, Error> {
        let query = Query::new()
            .with("folder", folder)
            .with("device", device)
            .with_pagination(page);
        self.get_json(&["db", "remoteneed"], &query).await
    }

    /// Discard local changes of a receive-only folder.
    ///
    /// `POST /rest/db/revert?folder=...`
    pub async fn post_db_revert(&self, folder: &str) -> Result<(), Error> {
        self.send_unit(
            Method::POST,
            &["db", "revert"],
            &Query::new().with("folder", folder),
            NO_BODY,
        )
        .await
    }

    /// Rescan everything, one folder, or one subdirectory of a folder.
    /// `next` delays the next scheduled scan by that many seconds.
    ///
    /// `POST /rest/db/scan[?folder=...][&sub=...][&next=...]`
    pub async fn post_db_scan(
        &self,
        folder: Option<&str>,
        sub: Option<&str>,
        next: Option<u64>,
    ) -> Result<(), Error> {
        let query = Query::new()
            .with_opt("folder", folder)
            .with_opt("sub", sub)
            .with_opt("next", next);
        self.send_unit(Method::POST, &["db", "scan"], &query, NO_BODY)
            .await
    }

    /// `GET /rest/db/status?folder=...`
    pub async fn get_db_status(&self, folder: &str) -> Result<DbStatus, Error> {
        self.get_json(&["db", "status"], &Query::new().with("folder", folder))
            .await
    }
}
