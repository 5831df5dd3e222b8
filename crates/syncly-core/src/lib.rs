// syncly-core: Session and worker lifecycle between syncly-api and consumers (CLI).

pub mod config;
pub mod error;
pub mod session;
pub mod worker;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{SessionConfig, TlsVerification};
pub use error::CoreError;
pub use session::SessionProvider;
pub use worker::{ExternalWorker, ProcessWorker, ProxySettings, WorkerControl, WorkerEnvironment};
