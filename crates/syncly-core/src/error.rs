// ── Core error types ──
//
// User-facing errors from syncly-core. Consumers see connection, auth and
// session failures, not raw HTTP plumbing. The `From<syncly_api::Error>`
// impl translates transport-layer errors into these variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to daemon at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request to the daemon timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    #[error("API client not initialized -- no API key has been loaded yet")]
    NotInitialized,

    #[error("Worker returned an empty API key")]
    EmptyApiKey,

    // ── Worker errors ────────────────────────────────────────────────
    #[error("Worker error: {message}")]
    Worker { message: String },

    #[error("Worker I/O error: {0}")]
    WorkerIo(#[from] std::io::Error),

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Unexpected response from daemon: {message}")]
    MalformedResponse { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<syncly_api::Error> for CoreError {
    fn from(err: syncly_api::Error) -> Self {
        if err.is_auth_rejected() {
            return CoreError::AuthenticationFailed {
                message: "the daemon rejected the API key".into(),
            };
        }
        if err.is_not_found() {
            return CoreError::NotFound {
                resource: err.to_string(),
            };
        }

        match err {
            syncly_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            syncly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            syncly_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            syncly_api::Error::InvalidApiKey { message } => {
                CoreError::AuthenticationFailed { message }
            }
            syncly_api::Error::Api {
                status,
                status_text,
            } => CoreError::Api {
                message: format!("{status} {status_text}"),
                status: Some(status),
            },
            syncly_api::Error::MalformedResponse { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_key_maps_to_authentication() {
        let err: CoreError = syncly_api::Error::Api {
            status: 403,
            status_text: "Forbidden".into(),
        }
        .into();
        assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    }

    #[test]
    fn server_error_keeps_status() {
        let err: CoreError = syncly_api::Error::Api {
            status: 500,
            status_text: "Internal Server Error".into(),
        }
        .into();
        assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
    }

    #[test]
    fn not_found_is_preserved() {
        let err: CoreError = syncly_api::Error::Api {
            status: 404,
            status_text: "Not Found".into(),
        }
        .into();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }
}
