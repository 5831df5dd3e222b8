// Request executor for the Syncthing REST API.
//
// Every endpoint in `endpoints/` funnels through `execute` (or one of its
// typed wrappers): build the URL, attach the key, send, reject non-2xx,
// then decode by content type.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::query::{Query, build_url};
use crate::session::ApiSession;
use crate::transport::TransportConfig;

/// `None` body for calls that send nothing.
pub(crate) const NO_BODY: Option<&()> = None;

// ── Payload ──────────────────────────────────────────────────────────

/// A decoded 2xx response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body served as `application/json`.
    Json(serde_json::Value),
    /// Anything else, verbatim.
    Text(String),
}

impl Payload {
    async fn from_response(resp: reqwest::Response) -> Result<Self, Error> {
        let json = is_json(resp.headers());
        let body = resp.text().await?;
        if !json {
            return Ok(Self::Text(body));
        }
        match serde_json::from_str(&body) {
            Ok(value) => Ok(Self::Json(value)),
            Err(e) => Err(Error::MalformedResponse {
                message: format!("invalid JSON body: {e}"),
                body,
            }),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// Deserialize a JSON payload. A text payload is a malformed response.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, Error> {
        match self {
            Self::Json(value) => T::deserialize(&value).map_err(|e| {
                Error::MalformedResponse {
                    message: format!("unexpected JSON shape: {e}"),
                    body: value.to_string(),
                }
            }),
            Self::Text(body) => Err(Error::MalformedResponse {
                message: "expected a JSON response".into(),
                body,
            }),
        }
    }

    /// The body as text; JSON is re-serialized.
    pub fn into_text(self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Text(body) => body,
        }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    Err(Error::Api {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_owned(),
    })
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for one daemon.
///
/// Cheap to clone; every clone shares the same connection pool and
/// credentials. A client never changes its key: rotating keys means
/// building a new client.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    session: ApiSession,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.session.base_url().as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a session and transport config.
    ///
    /// Injects `Content-Type` and `X-API-Key` as default headers.
    pub fn new(session: ApiSession, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(session.headers()?)?;
        Ok(Self::from_reqwest(session, http))
    }

    /// Wrap an existing `reqwest::Client` (caller manages default headers).
    pub fn from_reqwest(session: ApiSession, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(ClientInner { http, session }),
        }
    }

    pub fn session(&self) -> &ApiSession {
        &self.inner.session
    }

    pub fn base_url(&self) -> &Url {
        self.inner.session.base_url()
    }

    pub fn api_key(&self) -> &SecretString {
        self.inner.session.api_key()
    }

    // ── Executor ─────────────────────────────────────────────────────

    /// Issue one request and decode the body by its content type.
    ///
    /// Non-2xx statuses become [`Error::Api`] without reading the body.
    pub async fn execute<B>(
        &self,
        method: Method,
        path: &[&str],
        query: &Query,
        body: Option<&B>,
    ) -> Result<Payload, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.send(method, path, query, body, None).await?;
        Payload::from_response(resp).await
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &[&str],
        query: &Query,
        body: Option<&B>,
        timeout: Option<Duration>,
    ) -> Result<reqwest::Response, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = build_url(self.base_url(), path, query)?;
        debug!("{method} {url}");

        let mut req = self.inner.http.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        if let Some(timeout) = timeout {
            req = req.timeout(timeout);
        }
        check_status(req.send().await?)
    }

    // ── Typed helpers ────────────────────────────────────────────────

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &Query,
    ) -> Result<T, Error> {
        self.execute(Method::GET, path, query, NO_BODY)
            .await?
            .into_json()
    }

    /// GET with a per-request timeout replacing the client default.
    pub(crate) async fn get_json_within<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &Query,
        timeout: Duration,
    ) -> Result<T, Error> {
        let resp = self
            .send(Method::GET, path, query, NO_BODY, Some(timeout))
            .await?;
        Payload::from_response(resp).await?.into_json()
    }

    pub(crate) async fn get_text(&self, path: &[&str], query: &Query) -> Result<String, Error> {
        Ok(self
            .execute(Method::GET, path, query, NO_BODY)
            .await?
            .into_text())
    }

    pub(crate) async fn get_bytes(&self, path: &[&str], query: &Query) -> Result<Bytes, Error> {
        let resp = self.send(Method::GET, path, query, NO_BODY, None).await?;
        Ok(resp.bytes().await?)
    }

    pub(crate) async fn send_json<T, B>(
        &self,
        method: Method,
        path: &[&str],
        query: &Query,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        self.execute(method, path, query, body).await?.into_json()
    }

    /// Send and discard whatever the daemon answers.
    pub(crate) async fn send_unit<B>(
        &self,
        method: Method,
        path: &[&str],
        query: &Query,
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        self.send(method, path, query, body, None).await?;
        Ok(())
    }
}
