// Connection identity for one daemon: where it lives and which key it
// accepts. Immutable once built; a new key means a new session.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::Error;

/// Default REST root of a locally running daemon.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8384/rest/";

/// Header carrying the API key on every request.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Base URL plus API key.
#[derive(Debug, Clone)]
pub struct ApiSession {
    base_url: Url,
    api_key: SecretString,
}

impl ApiSession {
    /// Build a session. The key is trimmed; an empty key is rejected.
    pub fn new(base_url: Url, api_key: &SecretString) -> Result<Self, Error> {
        let trimmed = api_key.expose_secret().trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidApiKey {
                message: "API key is empty".into(),
            });
        }
        Ok(Self {
            base_url,
            api_key: SecretString::from(trimmed.to_owned()),
        })
    }

    /// Session against [`DEFAULT_BASE_URL`].
    pub fn local(api_key: &SecretString) -> Result<Self, Error> {
        Self::new(Url::parse(DEFAULT_BASE_URL)?, api_key)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// Headers attached to every request: JSON content type and the key.
    pub(crate) fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut key_value =
            HeaderValue::from_str(self.api_key.expose_secret()).map_err(|e| {
                Error::InvalidApiKey {
                    message: format!("API key is not a valid header value: {e}"),
                }
            })?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);
        Ok(headers)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn key_is_trimmed() {
        let session = ApiSession::local(&SecretString::from("  abc123\n".to_owned())).unwrap();
        assert_eq!(session.api_key().expose_secret(), "abc123");
        assert_eq!(session.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = ApiSession::local(&SecretString::from("   ".to_owned())).unwrap_err();
        assert!(matches!(err, Error::InvalidApiKey { .. }));
    }

    #[test]
    fn headers_carry_key_and_content_type() {
        let session = ApiSession::local(&SecretString::from("k3y".to_owned())).unwrap();
        let headers = session.headers().unwrap();
        assert_eq!(headers[API_KEY_HEADER], "k3y");
        assert!(headers[API_KEY_HEADER].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn debug_output_redacts_key() {
        let session = ApiSession::local(&SecretString::from("supersecret".to_owned())).unwrap();
        assert!(!format!("{session:?}").contains("supersecret"));
    }
}
