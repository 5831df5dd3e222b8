#![allow(clippy::unwrap_used)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use syncly_api::{EventType, PollConfig};
use syncly_core::{CoreError, SessionConfig, SessionProvider, WorkerControl, WorkerEnvironment};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Stub worker ──────────────────────────────────────────────────────

/// Hands out keys from a fixed list, one per `get_api_key` call.
struct StubWorker {
    keys: Vec<&'static str>,
    next: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl StubWorker {
    fn new(keys: &[&'static str]) -> Self {
        Self {
            keys: keys.to_vec(),
            next: AtomicUsize::new(0),
            log: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl WorkerControl for StubWorker {
    async fn spawn_worker(&self, env: &WorkerEnvironment) -> Result<(), CoreError> {
        let home = env.vars().get("STHOMEDIR").cloned().unwrap_or_default();
        self.log.lock().unwrap().push(format!("spawn {home}"));
        Ok(())
    }

    async fn stop_worker(&self) -> Result<(), CoreError> {
        self.log.lock().unwrap().push("stop".into());
        Ok(())
    }

    async fn get_api_key(&self) -> Result<SecretString, CoreError> {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        let key = self.keys.get(i).or(self.keys.last()).copied().unwrap_or("");
        Ok(SecretString::from(key))
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

async fn setup(keys: &[&'static str]) -> (MockServer, SessionProvider<StubWorker>) {
    let server = MockServer::start().await;
    let config = SessionConfig {
        base_url: Url::parse(&format!("{}/rest/", server.uri())).unwrap(),
        timeout: Duration::from_secs(5),
        poll: PollConfig {
            long_poll_timeout: Duration::from_secs(1),
            poll_delay: Duration::from_millis(5),
            retry_delay: Duration::from_millis(20),
            ..PollConfig::default()
        },
        ..SessionConfig::default()
    };
    let provider = SessionProvider::new(StubWorker::new(keys), config);
    (server, provider)
}

async fn mount_ping(server: &MockServer, key: &str) {
    Mock::given(method("GET"))
        .and(path("/rest/system/ping"))
        .and(header("X-API-Key", key))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ping": "pong"})))
        .mount(server)
        .await;
}

// ── Initialization ───────────────────────────────────────────────────

#[tokio::test]
async fn client_is_unavailable_before_initialize() {
    let (_server, provider) = setup(&["key-1"]).await;

    assert!(!provider.is_initialized());
    assert!(matches!(provider.client(), Err(CoreError::NotInitialized)));
    assert!(matches!(
        provider.event_poller(),
        Err(CoreError::NotInitialized)
    ));
}

#[tokio::test]
async fn initialize_trims_the_key() {
    let (server, provider) = setup(&["  key-1\n"]).await;
    mount_ping(&server, "key-1").await;

    let client = provider.initialize().await.unwrap();
    assert_eq!(client.api_key().expose_secret(), "key-1");
    assert!(provider.is_initialized());

    let ping = client.get_system_ping().await.unwrap();
    assert_eq!(ping.ping, "pong");
}

#[tokio::test]
async fn blank_key_is_rejected() {
    let (_server, provider) = setup(&["   "]).await;

    let err = provider.initialize().await.unwrap_err();
    assert!(matches!(err, CoreError::EmptyApiKey));
    assert!(!provider.is_initialized());
    assert_eq!(*provider.api_key_generation().borrow(), 0);
}

// ── Rotation ─────────────────────────────────────────────────────────

#[tokio::test]
async fn refresh_swaps_in_a_new_client() {
    let (server, provider) = setup(&["key-1", "key-2"]).await;
    mount_ping(&server, "key-1").await;
    mount_ping(&server, "key-2").await;

    let generation = provider.api_key_generation();
    let old = provider.initialize().await.unwrap();
    assert_eq!(*generation.borrow(), 1);

    provider.refresh_key().await.unwrap();
    assert_eq!(*generation.borrow(), 2);

    let current = provider.client().unwrap();
    assert_eq!(current.api_key().expose_secret(), "key-2");
    // A client taken before the rotation keeps its key.
    assert_eq!(old.api_key().expose_secret(), "key-1");

    old.get_system_ping().await.unwrap();
    current.get_system_ping().await.unwrap();

    let keys: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| r.headers.get("X-API-Key").unwrap().to_str().unwrap().to_owned())
        .collect();
    assert_eq!(keys, vec!["key-1", "key-2"]);
}

#[tokio::test]
async fn rejected_key_surfaces_as_authentication_failure() {
    let (server, provider) = setup(&["stale"]).await;
    Mock::given(method("GET"))
        .and(path("/rest/system/status"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = provider.initialize().await.unwrap();
    let err: CoreError = client.get_system_status().await.unwrap_err().into();
    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
}

// ── Worker lifecycle ─────────────────────────────────────────────────

#[tokio::test]
async fn restart_stops_spawns_and_reloads() {
    let (_server, provider) = setup(&["key-1", "key-2"]).await;
    let env = WorkerEnvironment {
        syncthing_home: Some("/tmp/st".into()),
        ..WorkerEnvironment::default()
    };

    provider.start_worker(&env).await.unwrap();
    let client = provider.restart_worker(&env).await.unwrap();

    assert_eq!(client.api_key().expose_secret(), "key-2");
    assert_eq!(
        provider.worker().calls(),
        vec!["spawn /tmp/st", "stop", "spawn /tmp/st"]
    );
    assert_eq!(*provider.api_key_generation().borrow(), 2);
}

#[tokio::test]
async fn stop_forgets_the_client() {
    let (_server, provider) = setup(&["key-1"]).await;
    provider.initialize().await.unwrap();

    provider.stop_worker().await.unwrap();
    assert!(!provider.is_initialized());
    assert!(matches!(provider.client(), Err(CoreError::NotInitialized)));
}

// ── Events ───────────────────────────────────────────────────────────

#[tokio::test]
async fn shutdown_cancels_spawned_streams() {
    let (server, provider) = setup(&["key-1"]).await;
    Mock::given(method("GET"))
        .and(path("/rest/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    provider.initialize().await.unwrap();
    let handle = provider.spawn_events(7, Vec::<EventType>::new()).unwrap();

    provider.shutdown().await.unwrap();
    let cursor = tokio::time::timeout(Duration::from_secs(2), handle.join())
        .await
        .unwrap();
    assert_eq!(cursor, 7);
}
