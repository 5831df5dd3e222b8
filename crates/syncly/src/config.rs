//! CLI configuration: thin wrapper around `syncly_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--url, --api-key, --insecure, --timeout).

use secrecy::SecretString;

use syncly_core::SessionConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use syncly_config::{
    Config, KEYRING_SERVICE, Profile, config_path, load_config_or_default,
    save_config,
};

/// Everything needed to open a session against one daemon.
pub struct Resolved {
    pub profile_name: String,
    pub profile: Profile,
    pub session: SessionConfig,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Pick the active profile and apply flag overrides.
///
/// A missing profile is not an error: the built-in defaults point at a
/// daemon on this machine. Naming a profile that does not exist is.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let mut profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            let mut names: Vec<_> = cfg.profiles.keys().cloned().collect();
            names.sort();
            return Err(CliError::Config {
                message: format!(
                    "profile '{profile_name}' not found (available: {})",
                    if names.is_empty() { "none".into() } else { names.join(", ") }
                ),
            });
        }
        None => Profile::default(),
    };

    // Flag > env > profile > defaults
    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if global.insecure || (profile.insecure.is_none() && cfg.defaults.insecure) {
        profile.insecure = Some(true);
    }
    profile.timeout = Some(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(cfg.defaults.timeout),
    );

    let session = syncly_config::profile_to_session_config(&profile)?;

    Ok(Resolved {
        profile_name,
        profile,
        session,
    })
}

/// Resolve an API key: the --api-key flag first, then the profile chain.
pub fn resolve_api_key_with_flag(
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref key) = global.api_key {
        return Ok(SecretString::from(key.clone()));
    }
    Ok(syncly_config::resolve_api_key(
        &resolved.profile,
        &resolved.profile_name,
    )?)
}
