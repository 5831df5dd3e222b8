use crate::client::Client;
use crate::error::Error;
use crate::models::{DeviceStatistics, FolderStatistics};
use crate::query::Query;

impl Client {
    /// Last-seen times per device.
    ///
    /// `GET /rest/stats/device`
    pub async fn get_stats_device(&self) -> Result<DeviceStatistics, Error> {
        self.get_json(&["stats", "device"], &Query::new()).await
    }

    /// Last scan and last synced file per folder.
    ///
    /// `GET /rest/stats/folder`
    pub async fn get_stats_folder(&self) -> Result<FolderStatistics, Error> {
        self.get_json(&["stats", "folder"], &Query::new()).await
    }
}
