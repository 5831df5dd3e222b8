// ── Runtime session configuration ──
//
// These types describe *how* to reach a daemon. They never touch disk:
// the CLI builds a `SessionConfig` from its profile and hands it in. The
// API key is not part of it; keys come from the worker.

use std::time::Duration;

use syncly_api::transport::{TlsMode, TransportConfig};
use syncly_api::{DEFAULT_BASE_URL, PollConfig};
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict). Default: the daemon usually speaks plain
    /// HTTP on loopback.
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (the daemon's self-signed GUI certificate).
    DangerAcceptInvalid,
}

/// Configuration for talking to a single daemon.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// REST root, e.g. `http://127.0.0.1:8384/rest/`.
    pub base_url: Url,
    pub tls: TlsVerification,
    /// Timeout for ordinary requests.
    pub timeout: Duration,
    /// Event loop timing.
    pub poll: PollConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            poll: PollConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: tls_to_transport(&self.tls),
            timeout: self.timeout,
        }
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
