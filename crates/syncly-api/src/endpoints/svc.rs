// Utility service endpoints.

use crate::client::Client;
use crate::error::Error;
use crate::models::{DeviceIdCheck, RandomString, UsageReport};
use crate::query::Query;

impl Client {
    /// Validate and normalize a device ID.
    ///
    /// `GET /rest/svc/deviceid?id=...`
    pub async fn get_svc_device_id(&self, id: &str) -> Result<DeviceIdCheck, Error> {
        self.get_json(&["svc", "deviceid"], &Query::new().with("id", id))
            .await
    }

    /// Languages preferred by the browser that issued the request.
    ///
    /// `GET /rest/svc/lang`
    pub async fn get_svc_lang(&self) -> Result<Vec<String>, Error> {
        self.get_json(&["svc", "lang"], &Query::new()).await
    }

    /// `GET /rest/svc/random/string?length=...`
    pub async fn get_svc_random_string(&self, length: u32) -> Result<RandomString, Error> {
        self.get_json(
            &["svc", "random", "string"],
            &Query::new().with("length", length),
        )
        .await
    }

    /// `GET /rest/svc/report`
    pub async fn get_svc_report(&self) -> Result<UsageReport, Error> {
        self.get_json(&["svc", "report"], &Query::new()).await
    }
}
