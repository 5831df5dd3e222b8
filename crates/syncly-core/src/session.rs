// ── Session provider ──
//
// Owns the current API client. Keys come from the worker; every time the
// key is (re)loaded a fresh immutable `Client` is swapped in and the
// generation counter is bumped. Clients handed out earlier keep the key
// they were built with.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, SecretString};
use syncly_api::{ApiSession, Client, EventPoller, EventStreamHandle, EventType};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::worker::{WorkerControl, WorkerEnvironment};

/// Shared handle to the daemon session.
///
/// Cheaply cloneable; all clones see the same client and generation.
pub struct SessionProvider<W> {
    inner: Arc<SessionInner<W>>,
}

impl<W> Clone for SessionProvider<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct SessionInner<W> {
    worker: W,
    config: SessionConfig,
    client: ArcSwapOption<Client>,
    generation: watch::Sender<u64>,
    /// Parent of every event stream spawned through this provider.
    cancel: CancellationToken,
}

impl<W> Drop for SessionInner<W> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<W: WorkerControl> SessionProvider<W> {
    /// Create a provider. No client exists until [`initialize`](Self::initialize).
    pub fn new(worker: W, config: SessionConfig) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            inner: Arc::new(SessionInner {
                worker,
                config,
                client: ArcSwapOption::empty(),
                generation,
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn worker(&self) -> &W {
        &self.inner.worker
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Load the worker's key and build the first client.
    pub async fn initialize(&self) -> Result<Client, CoreError> {
        self.refresh_key().await
    }

    /// Re-read the key from the worker and swap in a new client.
    pub async fn refresh_key(&self) -> Result<Client, CoreError> {
        let key = self.inner.worker.get_api_key().await?;
        let trimmed = key.expose_secret().trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyApiKey);
        }
        let key = SecretString::from(trimmed.to_owned());

        let session = ApiSession::new(self.inner.config.base_url.clone(), &key)?;
        let client = Client::new(session, &self.inner.config.transport())?;
        self.inner.client.store(Some(Arc::new(client.clone())));

        let mut generation = 0;
        self.inner.generation.send_modify(|g| {
            *g += 1;
            generation = *g;
        });
        info!(generation, base_url = %self.inner.config.base_url, "API key loaded");
        Ok(client)
    }

    /// The current client.
    pub fn client(&self) -> Result<Client, CoreError> {
        self.inner
            .client
            .load_full()
            .map(|client| Client::clone(&client))
            .ok_or(CoreError::NotInitialized)
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.client.load().is_some()
    }

    /// Watch the key generation. Bumped on every successful refresh.
    pub fn api_key_generation(&self) -> watch::Receiver<u64> {
        self.inner.generation.subscribe()
    }

    /// A poller over the current client, configured from the session.
    pub fn event_poller(&self) -> Result<EventPoller, CoreError> {
        Ok(EventPoller::new(self.client()?, self.inner.config.poll.clone()))
    }

    /// Spawn a background event stream tied to this provider's lifetime.
    pub fn spawn_events(
        &self,
        since: u64,
        filter: impl IntoIterator<Item = EventType>,
    ) -> Result<EventStreamHandle, CoreError> {
        let poller = self.event_poller()?.since(since).with_filter(filter);
        Ok(EventStreamHandle::spawn(
            poller,
            self.inner.cancel.child_token(),
        ))
    }

    // ── Worker lifecycle ─────────────────────────────────────────────

    /// Start the worker and load its key.
    pub async fn start_worker(&self, env: &WorkerEnvironment) -> Result<Client, CoreError> {
        self.inner.worker.spawn_worker(env).await?;
        self.refresh_key().await
    }

    /// Stop, start, then load the new key.
    pub async fn restart_worker(&self, env: &WorkerEnvironment) -> Result<Client, CoreError> {
        info!("restarting worker");
        self.inner.worker.stop_worker().await?;
        self.start_worker(env).await
    }

    /// Stop the worker and forget the client.
    pub async fn stop_worker(&self) -> Result<(), CoreError> {
        self.inner.worker.stop_worker().await?;
        self.inner.client.store(None);
        debug!("session client cleared");
        Ok(())
    }

    /// Cancel every event stream spawned through this provider and stop
    /// the worker.
    pub async fn shutdown(&self) -> Result<(), CoreError> {
        self.inner.cancel.cancel();
        self.stop_worker().await
    }
}
