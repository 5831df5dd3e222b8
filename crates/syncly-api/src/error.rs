use thiserror::Error;

/// Top-level error type for the `syncly-api` crate.
///
/// Every request issued against the daemon's REST surface fails with one
/// of these. `syncly-core` wraps them, the CLI maps them to exit codes.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// No response arrived (connection refused, DNS failure, client timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Base URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Authentication ──────────────────────────────────────────────
    /// The API key is empty or cannot be carried in a header.
    #[error("Invalid API key: {message}")]
    InvalidApiKey { message: String },

    // ── Daemon responses ────────────────────────────────────────────
    /// The daemon answered with a non-2xx status. The body is not read.
    #[error("API error: {status} {status_text}")]
    Api { status: u16, status_text: String },

    /// A JSON endpoint answered with something that is not the expected JSON.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, body: String },
}

impl Error {
    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` when the daemon rejected the API key.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if the request timed out on the client side.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> Error {
        Error::Api {
            status,
            status_text: String::new(),
        }
    }

    #[test]
    fn status_helpers_classify_api_errors() {
        assert!(api(404).is_not_found());
        assert!(!api(404).is_transient());
        assert!(api(403).is_auth_rejected());
        assert!(api(401).is_auth_rejected());
        assert!(api(503).is_transient());
        assert_eq!(api(500).status(), Some(500));
    }

    #[test]
    fn malformed_response_has_no_status() {
        let err = Error::MalformedResponse {
            message: "expected JSON".into(),
            body: "<html>".into(),
        };
        assert_eq!(err.status(), None);
        assert!(!err.is_transient());
        assert_eq!(err.to_string(), "Malformed response: expected JSON");
    }
}
