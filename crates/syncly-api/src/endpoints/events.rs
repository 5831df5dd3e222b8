// Event feed endpoints.
//
// The daemon holds `GET /rest/events` open until events arrive or its
// `timeout` elapses, so polling goes through a per-request deadline longer
// than the long-poll window.

use std::time::Duration;

use crate::client::Client;
use crate::error::Error;
use crate::events::{Event, EventBatch, EventQuery};

impl Client {
    /// `GET /rest/events?since=...&limit=...&timeout=...&events=...`
    pub async fn get_events(&self, query: &EventQuery) -> Result<Vec<Event>, Error> {
        let values = self.get_json(&["events"], &query.to_query()).await?;
        Ok(EventBatch::decode(values).events)
    }

    /// Filesystem-change events only (`LocalChangeDetected` and
    /// `RemoteChangeDetected`).
    ///
    /// `GET /rest/events/disk`
    pub async fn get_events_disk(&self, query: &EventQuery) -> Result<Vec<Event>, Error> {
        let values = self.get_json(&["events", "disk"], &query.to_query()).await?;
        Ok(EventBatch::decode(values).events)
    }

    /// One long-poll request bounded by `deadline` instead of the client
    /// default timeout.
    pub(crate) async fn poll_events(
        &self,
        query: &EventQuery,
        deadline: Duration,
    ) -> Result<EventBatch, Error> {
        let values = self
            .get_json_within(&["events"], &query.to_query(), deadline)
            .await?;
        Ok(EventBatch::decode(values))
    }
}
