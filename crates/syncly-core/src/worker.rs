// ── Worker control boundary ──
//
// The daemon ("worker") is owned by whoever embeds the session provider.
// The provider only needs three things from it: start it with an
// environment, stop it, and hand over the API key it currently accepts.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::PathBuf;
use std::process::Stdio;

use secrecy::{ExposeSecret, SecretString};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::CoreError;

/// Local Tor SOCKS endpoint used when `ProxySettings::Tor` is selected.
pub const TOR_SOCKS_PROXY: &str = "socks5://localhost:9050";

/// Control surface of the daemon process.
///
/// Implementations are injected into [`SessionProvider`](crate::SessionProvider);
/// nothing is looked up globally.
pub trait WorkerControl: Send + Sync + 'static {
    /// Start the daemon with the given environment.
    fn spawn_worker(
        &self,
        env: &WorkerEnvironment,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Stop the daemon. Stopping a worker that is not running is not an error.
    fn stop_worker(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// The API key the running daemon accepts.
    fn get_api_key(&self) -> impl Future<Output = Result<SecretString, CoreError>> + Send;
}

// ── Environment ──────────────────────────────────────────────────────

/// Outbound proxy for the daemon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProxySettings {
    #[default]
    Direct,
    /// Route everything through a local Tor daemon, no direct fallback.
    Tor,
    Custom {
        socks: Option<String>,
        http: Option<String>,
    },
}

/// Process environment handed to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerEnvironment {
    pub home: Option<PathBuf>,
    pub syncthing_home: Option<PathBuf>,
    /// Debug facilities, joined with spaces into `STTRACE`.
    pub trace: Vec<String>,
    pub monitored: bool,
    pub no_upgrade: bool,
    pub version_extra: Option<String>,
    pub sqlite_tmp_dir: Option<PathBuf>,
    pub proxy: ProxySettings,
}

impl Default for WorkerEnvironment {
    fn default() -> Self {
        Self {
            home: None,
            syncthing_home: None,
            trace: Vec::new(),
            monitored: true,
            no_upgrade: true,
            version_extra: None,
            sqlite_tmp_dir: None,
            proxy: ProxySettings::Direct,
        }
    }
}

impl WorkerEnvironment {
    /// Flatten into environment variables. Empty values are omitted.
    pub fn vars(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        let mut set = |key: &str, value: String| {
            if !value.is_empty() {
                vars.insert(key.to_owned(), value);
            }
        };

        let path = |p: Option<&PathBuf>| {
            p.map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default()
        };

        set("HOME", path(self.home.as_ref()));
        set("STHOMEDIR", path(self.syncthing_home.as_ref()));
        set("STTRACE", self.trace.join(" "));
        set("STMONITORED", flag(self.monitored));
        set("STNOUPGRADE", flag(self.no_upgrade));
        set("STVERSIONEXTRA", self.version_extra.clone().unwrap_or_default());
        set("SQLITE_TMPDIR", path(self.sqlite_tmp_dir.as_ref()));
        set("GOGC", "100".into());

        match &self.proxy {
            ProxySettings::Direct => {}
            ProxySettings::Tor => {
                set("all_proxy", TOR_SOCKS_PROXY.into());
                set("ALL_PROXY_NO_FALLBACK", "1".into());
            }
            ProxySettings::Custom { socks, http } => {
                set("all_proxy", socks.clone().unwrap_or_default());
                let http = http.clone().unwrap_or_default();
                set("http_proxy", http.clone());
                set("https_proxy", http);
            }
        }

        vars
    }
}

fn flag(on: bool) -> String {
    if on { "1" } else { "0" }.to_owned()
}

// ── Process worker ───────────────────────────────────────────────────

#[derive(Default)]
struct ProcessState {
    child: Option<Child>,
    api_key: Option<SecretString>,
}

/// Runs the daemon binary as a child process.
///
/// Each spawn generates a fresh API key and passes it on the command line,
/// so the key is known without reading the daemon's config file.
pub struct ProcessWorker {
    binary: PathBuf,
    gui_address: String,
    state: Mutex<ProcessState>,
}

impl ProcessWorker {
    pub fn new(binary: impl Into<PathBuf>, gui_address: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            gui_address: gui_address.into(),
            state: Mutex::new(ProcessState::default()),
        }
    }

    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }

    /// Command-line arguments for a spawn with the given key.
    pub fn args(&self, api_key: &str) -> Vec<String> {
        vec![
            "serve".into(),
            "--no-browser".into(),
            "--no-restart".into(),
            format!("--gui-address={}", self.gui_address),
            format!("--gui-apikey={api_key}"),
        ]
    }

    /// Whether a child is currently held (it may have exited on its own).
    pub async fn is_running(&self) -> bool {
        let mut state = self.state.lock().await;
        match state.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl std::fmt::Debug for ProcessWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessWorker")
            .field("binary", &self.binary)
            .field("gui_address", &self.gui_address)
            .finish_non_exhaustive()
    }
}

impl WorkerControl for ProcessWorker {
    async fn spawn_worker(&self, env: &WorkerEnvironment) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;
        if let Some(child) = state.child.as_mut() {
            if matches!(child.try_wait(), Ok(None)) {
                return Err(CoreError::Worker {
                    message: "worker is already running".into(),
                });
            }
        }

        let key = uuid::Uuid::new_v4().simple().to_string();
        let vars = env.vars();
        debug!(binary = %self.binary.display(), vars = ?vars.keys().collect::<Vec<_>>(), "spawning worker");

        let child = Command::new(&self.binary)
            .args(self.args(&key))
            .envs(&vars)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        info!(pid = child.id(), gui_address = %self.gui_address, "worker started");
        state.child = Some(child);
        state.api_key = Some(SecretString::from(key));
        Ok(())
    }

    async fn stop_worker(&self) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;
        if let Some(mut child) = state.child.take() {
            // kill() also reaps the child
            child.kill().await?;
            info!("worker stopped");
        }
        Ok(())
    }

    async fn get_api_key(&self) -> Result<SecretString, CoreError> {
        let state = self.state.lock().await;
        state.api_key.clone().ok_or_else(|| CoreError::Worker {
            message: "worker has not been started".into(),
        })
    }
}

// ── External worker ──────────────────────────────────────────────────

/// A daemon managed outside this process, reached with a fixed key.
#[derive(Debug, Clone)]
pub struct ExternalWorker {
    api_key: SecretString,
}

impl ExternalWorker {
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }
}

impl WorkerControl for ExternalWorker {
    async fn spawn_worker(&self, _env: &WorkerEnvironment) -> Result<(), CoreError> {
        Ok(())
    }

    async fn stop_worker(&self) -> Result<(), CoreError> {
        Ok(())
    }

    async fn get_api_key(&self) -> Result<SecretString, CoreError> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(CoreError::EmptyApiKey);
        }
        Ok(self.api_key.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_environment_sets_monitor_flags() {
        let vars = WorkerEnvironment::default().vars();
        assert_eq!(vars.get("STMONITORED").map(String::as_str), Some("1"));
        assert_eq!(vars.get("STNOUPGRADE").map(String::as_str), Some("1"));
        assert_eq!(vars.get("GOGC").map(String::as_str), Some("100"));
        assert!(!vars.contains_key("HOME"));
        assert!(!vars.contains_key("STTRACE"));
        assert!(!vars.contains_key("all_proxy"));
    }

    #[test]
    fn trace_facilities_are_space_joined() {
        let env = WorkerEnvironment {
            trace: vec!["model".into(), "db".into()],
            home: Some("/data/home".into()),
            syncthing_home: Some("/data/home/st".into()),
            monitored: false,
            ..WorkerEnvironment::default()
        };
        let vars = env.vars();
        assert_eq!(vars["STTRACE"], "model db");
        assert_eq!(vars["HOME"], "/data/home");
        assert_eq!(vars["STHOMEDIR"], "/data/home/st");
        assert_eq!(vars["STMONITORED"], "0");
    }

    #[test]
    fn tor_disables_proxy_fallback() {
        let env = WorkerEnvironment {
            proxy: ProxySettings::Tor,
            ..WorkerEnvironment::default()
        };
        let vars = env.vars();
        assert_eq!(vars["all_proxy"], TOR_SOCKS_PROXY);
        assert_eq!(vars["ALL_PROXY_NO_FALLBACK"], "1");
        assert!(!vars.contains_key("http_proxy"));
    }

    #[test]
    fn custom_proxy_sets_http_and_https() {
        let env = WorkerEnvironment {
            proxy: ProxySettings::Custom {
                socks: None,
                http: Some("http://proxy:3128".into()),
            },
            ..WorkerEnvironment::default()
        };
        let vars = env.vars();
        assert!(!vars.contains_key("all_proxy"));
        assert_eq!(vars["http_proxy"], "http://proxy:3128");
        assert_eq!(vars["https_proxy"], "http://proxy:3128");
    }

    #[test]
    fn serve_args_carry_address_and_key() {
        let worker = ProcessWorker::new("syncthing", "127.0.0.1:8384");
        assert_eq!(
            worker.args("k3y"),
            vec![
                "serve",
                "--no-browser",
                "--no-restart",
                "--gui-address=127.0.0.1:8384",
                "--gui-apikey=k3y",
            ]
        );
    }

    #[tokio::test]
    async fn key_unavailable_before_first_spawn() {
        let worker = ProcessWorker::new("syncthing", "127.0.0.1:8384");
        assert!(matches!(
            worker.get_api_key().await,
            Err(CoreError::Worker { .. })
        ));
        assert!(!worker.is_running().await);
        worker.stop_worker().await.unwrap();
    }

    #[tokio::test]
    async fn missing_binary_is_an_io_error() {
        let worker = ProcessWorker::new("/nonexistent/syncthing-binary", "127.0.0.1:0");
        let err = worker
            .spawn_worker(&WorkerEnvironment::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::WorkerIo(_)));
        assert!(worker.get_api_key().await.is_err());
    }

    #[tokio::test]
    async fn external_worker_rejects_blank_key() {
        let worker = ExternalWorker::new(SecretString::from("  "));
        assert!(matches!(
            worker.get_api_key().await,
            Err(CoreError::EmptyApiKey)
        ));
    }
}
