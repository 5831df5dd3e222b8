//! Long-poll event subscription.
//!
//! Repeatedly calls `GET /rest/events` with the id of the last delivered
//! event as the cursor, hands every new event to the caller in id order,
//! and survives daemon restarts and network errors by backing off and
//! trying again. Cancellation stops the loop at the next await point.
//!
//! # Example
//!
//! ```rust,ignore
//! use syncly_api::event_stream::{EventPoller, PollConfig};
//! use syncly_api::events::EventType;
//! use tokio_util::sync::CancellationToken;
//!
//! let cancel = CancellationToken::new();
//! let poller = EventPoller::new(client, PollConfig::default())
//!     .with_filter([EventType::FolderSummary, EventType::StateChanged]);
//!
//! let last_id = poller
//!     .run(cancel.clone(), |event| println!("{} {}", event.id, event.kind()))
//!     .await;
//! ```

use std::sync::Arc;
use std::time::Duration;

use futures_core::Stream;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::client::Client;
use crate::error::Error;
use crate::events::{Event, EventBatch, EventQuery, EventType};

// ── Broadcast channel capacity ───────────────────────────────────────

const EVENT_CHANNEL_CAPACITY: usize = 1024;

// ── PollConfig ───────────────────────────────────────────────────────

/// Timing of the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollConfig {
    /// How long the daemon may hold a request open. Default: 30s.
    pub long_poll_timeout: Duration,

    /// Pause after a successful poll. Default: 100ms.
    pub poll_delay: Duration,

    /// Pause after a failed poll. Default: 1s.
    pub retry_delay: Duration,

    /// Added to `long_poll_timeout` to form the client-side deadline, so a
    /// quiet feed never trips the request timeout. Default: 15s.
    pub request_grace: Duration,

    /// Cap on events per response. `None` lets the daemon decide.
    pub limit: Option<u32>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            long_poll_timeout: Duration::from_secs(30),
            poll_delay: Duration::from_millis(100),
            retry_delay: Duration::from_secs(1),
            request_grace: Duration::from_secs(15),
            limit: None,
        }
    }
}

impl PollConfig {
    /// Client-side deadline of one poll request.
    pub fn request_deadline(&self) -> Duration {
        self.long_poll_timeout + self.request_grace
    }
}

// ── EventPoller ──────────────────────────────────────────────────────

/// Cursor-tracking poller over one client.
///
/// The cursor only moves forward, and only after every event of a batch
/// has been handed out, so a failed or cancelled request never skips
/// events.
#[derive(Debug)]
pub struct EventPoller {
    client: Client,
    cursor: u64,
    filter: Vec<EventType>,
    config: PollConfig,
}

impl EventPoller {
    /// Start from the beginning of the daemon's buffer (cursor 0).
    pub fn new(client: Client, config: PollConfig) -> Self {
        Self {
            client,
            cursor: 0,
            filter: Vec::new(),
            config,
        }
    }

    /// Resume after `cursor`: only events with a greater id are delivered.
    pub fn since(mut self, cursor: u64) -> Self {
        self.cursor = cursor;
        self
    }

    /// Only request these kinds. An empty filter means every kind.
    pub fn with_filter(mut self, kinds: impl IntoIterator<Item = EventType>) -> Self {
        self.filter = kinds.into_iter().collect();
        self
    }

    /// Id of the last delivered event.
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    fn query(&self) -> EventQuery {
        EventQuery {
            since: Some(self.cursor),
            limit: self.config.limit,
            timeout: Some(self.config.long_poll_timeout.as_secs()),
            events: self.filter.clone(),
        }
    }

    async fn fetch(&self) -> Result<EventBatch, Error> {
        self.client
            .poll_events(&self.query(), self.config.request_deadline())
            .await
    }

    /// Drop anything at or below the cursor and anything out of order.
    fn fresh(&self, batch: Vec<Event>) -> Vec<Event> {
        let mut last = self.cursor;
        batch
            .into_iter()
            .filter(|event| {
                if event.id > last {
                    last = event.id;
                    true
                } else {
                    trace!(id = event.id, cursor = last, "skipping already-delivered event");
                    false
                }
            })
            .collect()
    }

    /// `last_id` may belong to an envelope that was skipped as undecodable.
    fn advance(&mut self, last_id: Option<u64>) {
        if let Some(last_id) = last_id.filter(|id| *id > self.cursor) {
            self.cursor = last_id;
        }
    }

    /// One request plus dispatch. Returns how many events were delivered.
    ///
    /// On error the cursor is unchanged, so the next call re-requests the
    /// same range.
    pub async fn poll_once<F>(&mut self, on_event: &mut F) -> Result<usize, Error>
    where
        F: FnMut(Event) + Send,
    {
        let batch = self.fetch().await?;
        let fresh = self.fresh(batch.events);
        let delivered = fresh.len();
        for event in fresh {
            trace!(id = event.id, kind = event.kind(), "dispatching event");
            on_event(event);
        }
        self.advance(batch.last_id);
        Ok(delivered)
    }

    /// Poll until `cancel` fires. Returns the final cursor.
    pub async fn run<F>(mut self, cancel: CancellationToken, mut on_event: F) -> u64
    where
        F: FnMut(Event) + Send,
    {
        debug!(cursor = self.cursor, filter = ?self.filter, "event polling started");

        loop {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                result = self.poll_once(&mut on_event) => result,
            };

            let delay = self.delay_after(outcome);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                () = tokio::time::sleep(delay) => {}
            }
        }

        debug!(cursor = self.cursor, "event polling stopped");
        self.cursor
    }

    /// The same loop as [`run`](Self::run), exposed as a stream.
    pub fn into_stream(mut self, cancel: CancellationToken) -> impl Stream<Item = Event> + Send {
        async_stream::stream! {
            loop {
                let outcome = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    result = self.fetch() => result,
                };

                let delay = match outcome {
                    Ok(batch) => {
                        for event in self.fresh(batch.events) {
                            yield event;
                        }
                        self.advance(batch.last_id);
                        self.config.poll_delay
                    }
                    Err(e) => self.delay_after(Err(e)),
                };

                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    () = tokio::time::sleep(delay) => {}
                }
            }
        }
    }

    fn delay_after(&self, outcome: Result<usize, Error>) -> Duration {
        match outcome {
            Ok(delivered) => {
                if delivered > 0 {
                    debug!(delivered, cursor = self.cursor, "event batch dispatched");
                }
                self.config.poll_delay
            }
            Err(e) => {
                warn!(error = %e, cursor = self.cursor, "event poll failed, retrying");
                self.config.retry_delay
            }
        }
    }
}

// ── EventStreamHandle ────────────────────────────────────────────────

/// Handle to a poller running on its own task.
///
/// Events are fanned out through a [`broadcast`] channel; the id of the
/// last delivered event is published on a [`watch`] channel.
pub struct EventStreamHandle {
    event_rx: broadcast::Receiver<Arc<Event>>,
    cursor_rx: watch::Receiver<u64>,
    cancel: CancellationToken,
    task: JoinHandle<u64>,
}

impl EventStreamHandle {
    /// Spawn `poller` onto the runtime. It runs until `cancel` fires or
    /// [`shutdown`](Self::shutdown) is called.
    pub fn spawn(poller: EventPoller, cancel: CancellationToken) -> Self {
        let (event_tx, event_rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (cursor_tx, cursor_rx) = watch::channel(poller.cursor());

        info!(cursor = poller.cursor(), "spawning event stream");
        let task_cancel = cancel.clone();
        let task = tokio::spawn(poller.run(task_cancel, move |event| {
            cursor_tx.send_replace(event.id);
            // No subscribers is fine; the event is dropped.
            let _ = event_tx.send(Arc::new(event));
        }));

        Self {
            event_rx,
            cursor_rx,
            cancel,
            task,
        }
    }

    /// Get a new broadcast receiver for the event stream.
    ///
    /// Multiple consumers can subscribe concurrently. If a consumer falls
    /// behind, it receives [`broadcast::error::RecvError::Lagged`].
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<Event>> {
        self.event_rx.resubscribe()
    }

    /// Watch the id of the last delivered event.
    pub fn cursor(&self) -> watch::Receiver<u64> {
        self.cursor_rx.clone()
    }

    /// Signal the background task to stop.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Stop the task and wait for it. Returns the final cursor.
    pub async fn join(self) -> u64 {
        self.cancel.cancel();
        match self.task.await {
            Ok(cursor) => cursor,
            Err(e) => {
                warn!(error = %e, "event stream task failed");
                *self.cursor_rx.borrow()
            }
        }
    }
}
