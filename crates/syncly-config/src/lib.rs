//! Shared configuration for syncly tools.
//!
//! TOML profiles, API key resolution (env + keyring + plaintext),
//! and translation to `syncly_core::SessionConfig` and the worker
//! environment. The CLI adds flag-aware wrappers on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use syncly_api::PollConfig;
use syncly_core::{ProcessWorker, ProxySettings, SessionConfig, TlsVerification, WorkerEnvironment};

/// Keyring service name; entries are `<profile>/api-key`.
pub const KEYRING_SERVICE: &str = "syncly";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named daemon profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named daemon profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// REST root of the daemon.
    #[serde(default = "default_url")]
    pub url: String,

    /// API key (plaintext, prefer keyring or env var).
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    pub api_key_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    #[serde(default)]
    pub events: EventsProfile,

    #[serde(default)]
    pub worker: WorkerProfile,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: None,
            api_key_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
            events: EventsProfile::default(),
            worker: WorkerProfile::default(),
        }
    }
}

fn default_url() -> String {
    "http://127.0.0.1:8384/rest".into()
}

/// Event loop timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventsProfile {
    #[serde(default = "default_long_poll")]
    pub long_poll_timeout_secs: u64,
    #[serde(default = "default_poll_delay")]
    pub poll_delay_ms: u64,
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
    pub limit: Option<u32>,
}

impl Default for EventsProfile {
    fn default() -> Self {
        Self {
            long_poll_timeout_secs: default_long_poll(),
            poll_delay_ms: default_poll_delay(),
            retry_delay_ms: default_retry_delay(),
            limit: None,
        }
    }
}

fn default_long_poll() -> u64 {
    30
}
fn default_poll_delay() -> u64 {
    100
}
fn default_retry_delay() -> u64 {
    1000
}

/// How to launch a local daemon.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkerProfile {
    #[serde(default = "default_binary")]
    pub binary: PathBuf,

    /// `HOME` for the daemon.
    pub home: Option<PathBuf>,

    /// Daemon state directory (`STHOMEDIR`).
    pub syncthing_home: Option<PathBuf>,

    #[serde(default = "default_gui_address")]
    pub gui_address: String,

    /// Debug facilities for `STTRACE`.
    #[serde(default)]
    pub trace: Vec<String>,

    #[serde(default)]
    pub proxy: ProxyProfile,

    #[serde(default = "default_true")]
    pub monitored: bool,

    #[serde(default = "default_true")]
    pub no_upgrade: bool,

    pub version_extra: Option<String>,

    pub sqlite_tmp_dir: Option<PathBuf>,
}

impl Default for WorkerProfile {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            home: None,
            syncthing_home: None,
            gui_address: default_gui_address(),
            trace: Vec::new(),
            proxy: ProxyProfile::default(),
            monitored: true,
            no_upgrade: true,
            version_extra: None,
            sqlite_tmp_dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProxyProfile {
    /// Route through a local Tor daemon. Wins over `socks`/`http`.
    #[serde(default)]
    pub tor: bool,
    pub socks: Option<String>,
    pub http: Option<String>,
}

fn default_binary() -> PathBuf {
    PathBuf::from("syncthing")
}
fn default_gui_address() -> String {
    "127.0.0.1:8384".into()
}
fn default_true() -> bool {
    true
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "syncly", "syncly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("syncly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file + environment.
///
/// Nested keys use a double underscore, e.g.
/// `SYNCLY_PROFILES__HOME__URL`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SYNCLY_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

/// Resolve an API key from the credential chain (no CLI flag step).
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Translation into core types ─────────────────────────────────────

/// Parse a REST root, making sure it ends in `/`.
pub fn parse_base_url(raw: &str) -> Result<url::Url, ConfigError> {
    let mut url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("not a base URL: {raw}"),
        });
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Build a `SessionConfig` from a profile. No CLI flag overrides.
pub fn profile_to_session_config(profile: &Profile) -> Result<SessionConfig, ConfigError> {
    let base_url = parse_base_url(&profile.url)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(SessionConfig {
        base_url,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
        poll: poll_config(&profile.events),
    })
}

pub fn poll_config(events: &EventsProfile) -> PollConfig {
    PollConfig {
        long_poll_timeout: Duration::from_secs(events.long_poll_timeout_secs),
        poll_delay: Duration::from_millis(events.poll_delay_ms),
        retry_delay: Duration::from_millis(events.retry_delay_ms),
        limit: events.limit,
        ..PollConfig::default()
    }
}

/// Environment for a daemon launched from this profile.
pub fn worker_environment(worker: &WorkerProfile) -> WorkerEnvironment {
    let proxy = if worker.proxy.tor {
        ProxySettings::Tor
    } else if worker.proxy.socks.is_some() || worker.proxy.http.is_some() {
        ProxySettings::Custom {
            socks: worker.proxy.socks.clone(),
            http: worker.proxy.http.clone(),
        }
    } else {
        ProxySettings::Direct
    };

    WorkerEnvironment {
        home: worker.home.clone(),
        syncthing_home: worker.syncthing_home.clone(),
        trace: worker.trace.clone(),
        monitored: worker.monitored,
        no_upgrade: worker.no_upgrade,
        version_extra: worker.version_extra.clone(),
        sqlite_tmp_dir: worker.sqlite_tmp_dir.clone(),
        proxy,
    }
}

pub fn process_worker(worker: &WorkerProfile) -> ProcessWorker {
    ProcessWorker::new(worker.binary.clone(), worker.gui_address.clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    // ── Loading ──

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 30);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn profile_fields_fill_defaults() {
        let (_dir, path) = write_config(
            r#"
            default_profile = "laptop"

            [profiles.laptop]
            api_key = "abc"

            [profiles.laptop.worker]
            trace = ["model"]

            [profiles.laptop.worker.proxy]
            tor = true
            "#,
        );
        let cfg = load_config_from(&path).unwrap();
        let profile = &cfg.profiles["laptop"];

        assert_eq!(profile.url, "http://127.0.0.1:8384/rest");
        assert_eq!(profile.events, EventsProfile::default());
        assert_eq!(profile.worker.binary, PathBuf::from("syncthing"));
        assert_eq!(profile.worker.trace, vec!["model".to_owned()]);
        assert!(profile.worker.proxy.tor);
        assert!(profile.worker.monitored);
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "nas".into(),
            Profile {
                url: "https://nas.local:8384/rest".into(),
                insecure: Some(true),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles["nas"].url, "https://nas.local:8384/rest");
        assert_eq!(loaded.profiles["nas"].insecure, Some(true));
    }

    // ── Translation ──

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = parse_base_url("http://127.0.0.1:8384/rest").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8384/rest/");
        let url = parse_base_url("http://127.0.0.1:8384/rest/").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8384/rest/");
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn session_config_from_profile() {
        let profile = Profile {
            ca_cert: Some("/etc/ca.pem".into()),
            timeout: Some(5),
            events: EventsProfile {
                long_poll_timeout_secs: 60,
                limit: Some(50),
                ..EventsProfile::default()
            },
            ..Profile::default()
        };
        let cfg = profile_to_session_config(&profile).unwrap();

        assert_eq!(cfg.tls, TlsVerification::CustomCa("/etc/ca.pem".into()));
        assert_eq!(cfg.timeout, Duration::from_secs(5));
        assert_eq!(cfg.poll.long_poll_timeout, Duration::from_secs(60));
        assert_eq!(cfg.poll.limit, Some(50));
        assert_eq!(cfg.poll.request_grace, PollConfig::default().request_grace);
    }

    #[test]
    fn insecure_wins_over_custom_ca() {
        let profile = Profile {
            ca_cert: Some("/etc/ca.pem".into()),
            insecure: Some(true),
            ..Profile::default()
        };
        let cfg = profile_to_session_config(&profile).unwrap();
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
    }

    #[test]
    fn worker_proxy_selection() {
        let mut worker = WorkerProfile::default();
        assert_eq!(worker_environment(&worker).proxy, ProxySettings::Direct);

        worker.proxy.http = Some("http://proxy:3128".into());
        assert_eq!(
            worker_environment(&worker).proxy,
            ProxySettings::Custom {
                socks: None,
                http: Some("http://proxy:3128".into()),
            }
        );

        worker.proxy.tor = true;
        assert_eq!(worker_environment(&worker).proxy, ProxySettings::Tor);
    }

    // ── Credentials ──

    #[test]
    fn plaintext_key_is_last_resort() {
        let profile = Profile {
            api_key: Some("plain".into()),
            api_key_env: Some("SYNCLY_TEST_KEY_THAT_IS_NEVER_SET".into()),
            ..Profile::default()
        };
        let key = resolve_api_key(&profile, "syncly-config-test-profile").unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&key), "plain");
    }

    #[test]
    fn missing_key_names_the_profile() {
        let err = resolve_api_key(&Profile::default(), "syncly-config-test-none").unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { profile } if profile == "syncly-config-test-none"));
    }
}
