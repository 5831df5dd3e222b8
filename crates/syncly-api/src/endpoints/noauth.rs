use crate::client::Client;
use crate::error::Error;
use crate::models::Health;
use crate::query::Query;

impl Client {
    /// Liveness probe. The daemon answers without checking the key.
    ///
    /// `GET /rest/noauth/health`
    pub async fn get_health(&self) -> Result<Health, Error> {
        self.get_json(&["noauth", "health"], &Query::new()).await
    }
}
