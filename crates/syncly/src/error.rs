//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use syncly_config::ConfigError;
use syncly_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to daemon at {url}: {reason}")]
    #[diagnostic(
        code(syncly::connection_failed),
        help(
            "Check that Syncthing is running and its GUI/REST listener is reachable.\n\
             URL: {url}\n\
             Try: syncly health --url <address>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("The daemon rejected the API key")]
    #[diagnostic(
        code(syncly::auth_failed),
        help(
            "The key is shown under Actions > Settings > GUI in the web UI.\n\
             Store it with: syncly config set-key --for-profile {profile}"
        )
    )]
    AuthFailed { profile: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(syncly::no_credentials),
        help(
            "Configure one with: syncly config init\n\
             Or set the SYNCLY_API_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(syncly::not_found),
        help("Run: syncly {list_command} to see what is configured")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(syncly::api_error))]
    ApiError { message: String },

    #[error("Unexpected response: {message}")]
    #[diagnostic(
        code(syncly::malformed_response),
        help("The URL may point at something other than the daemon's /rest/ root.")
    )]
    MalformedResponse { message: String },

    // ── Worker ───────────────────────────────────────────────────────
    #[error("Worker error: {message}")]
    #[diagnostic(
        code(syncly::worker),
        help("Check worker.binary in your profile points at a Syncthing executable.")
    )]
    Worker { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(syncly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(syncly::config),
        help("Inspect the file with: syncly config show")
    )]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(syncly::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out")]
    #[diagnostic(
        code(syncly::timeout),
        help("Increase the timeout with --timeout or check the daemon's load.")
    )]
    Timeout,

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(syncly::json))]
    Json(#[from] serde_json::Error),

    #[error("YAML rendering failed: {0}")]
    #[diagnostic(code(syncly::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message: _ } | CoreError::EmptyApiKey => {
                CliError::AuthFailed {
                    profile: "current".into(),
                }
            }
            CoreError::NotInitialized => CliError::NoCredentials {
                profile: "current".into(),
            },
            CoreError::Timeout => CliError::Timeout,
            CoreError::NotFound { resource } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier: resource,
                list_command: "folders list".into(),
            },
            CoreError::MalformedResponse { message } => CliError::MalformedResponse { message },
            CoreError::Api { message, status: _ } => CliError::ApiError { message },
            CoreError::Worker { message } => CliError::Worker { message },
            CoreError::WorkerIo(e) => CliError::Worker {
                message: e.to_string(),
            },
            CoreError::Config { message } => CliError::Config { message },
        }
    }
}

impl From<syncly_api::Error> for CliError {
    fn from(err: syncly_api::Error) -> Self {
        CoreError::from(err).into()
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(CliError::Timeout.exit_code(), exit_code::TIMEOUT);
        assert_eq!(
            CliError::from(CoreError::AuthenticationFailed {
                message: "nope".into()
            })
            .exit_code(),
            exit_code::AUTH
        );
        assert_eq!(
            CliError::from(CoreError::ConnectionFailed {
                url: "http://127.0.0.1:8384/rest/".into(),
                reason: "refused".into(),
            })
            .exit_code(),
            exit_code::CONNECTION
        );
        assert_eq!(
            CliError::from(ConfigError::Validation {
                field: "url".into(),
                reason: "bad".into(),
            })
            .exit_code(),
            exit_code::USAGE
        );
    }

    #[test]
    fn not_found_api_error_maps_to_exit_four() {
        let err: CliError = syncly_api::Error::Api {
            status: 404,
            status_text: "Not Found".into(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }
}
