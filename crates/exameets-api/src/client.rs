// Portal HTTP client
//
// Wraps `reqwest::Client` with versioned URL construction and uniform
// response parsing. All endpoint groups (resources, session) are
// implemented as inherent methods via separate files to keep this module
// focused on transport mechanics.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// The backend mounts everything under a versioned path.
const API_PREFIX: &str = "/api/v1";

/// Raw HTTP client for the Exameets backend.
///
/// Carries the session cookie jar (the backend authenticates via an
/// HTTP-only cookie), builds `{base}/api/v1/...` URLs, and normalizes
/// every response into either parsed JSON or an [`Error`] whose message
/// is the backend's own `message` field when one is present. Callers
/// never see an unstructured failure.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    /// Cookie jar reference, kept for session inspection.
    cookie_jar: Option<Arc<Jar>>,
}

impl ApiClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// If the config doesn't already include a cookie jar, one is created
    /// automatically -- session auth requires cookies. `base_url` is the
    /// backend root (e.g. `https://api.exameets.in`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            cookie_jar,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this when you already have a client with a session cookie in
    /// its jar (e.g. in tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            cookie_jar: None,
        }
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether the cookie jar currently holds any cookie for the backend.
    pub fn has_session_cookie(&self) -> bool {
        self.cookie_jar
            .as_ref()
            .and_then(|jar| jar.cookies(&self.base_url))
            .is_some()
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/v1/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}{API_PREFIX}/{path}")).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and parse the response.
    pub(crate) async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, Error> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);

        let mut builder = self.http.get(url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a POST request with a JSON body and parse the response.
    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<Value, Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a PUT request with a JSON body and parse the response.
    pub(crate) async fn put(&self, path: &str, body: &Value) -> Result<Value, Error> {
        let url = self.api_url(path)?;
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a DELETE request (optional JSON body) and parse the response.
    pub(crate) async fn delete(&self, path: &str, body: Option<&Value>) -> Result<Value, Error> {
        let url = self.api_url(path)?;
        debug!("DELETE {}", url);

        let mut builder = self.http.delete(url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let resp = builder.send().await.map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Normalize a response into parsed JSON or an [`Error`].
    ///
    /// - 401 maps to [`Error::Authentication`] with the backend message.
    /// - Other non-2xx statuses map to [`Error::Api`], mining the body
    ///   for a `message` field and falling back to `HTTP {status}`.
    /// - A 2xx body carrying `{"success": false, "message": ...}` is
    ///   still a backend-reported failure.
    async fn parse_response(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: body_message(&body)
                    .unwrap_or_else(|| "session expired or invalid credentials".into()),
            });
        }

        if !status.is_success() {
            return Err(Error::Api {
                message: body_message(&body).unwrap_or_else(|| format!("HTTP {status}")),
                status: status.as_u16(),
            });
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| {
            let preview = body.chars().take(200).collect::<String>();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        if value.get("success").and_then(Value::as_bool) == Some(false) {
            return Err(Error::Api {
                message: value
                    .get("message")
                    .and_then(Value::as_str)
                    .map_or_else(|| format!("HTTP {status}"), str::to_owned),
                status: status.as_u16(),
            });
        }

        Ok(value)
    }
}

/// Extract the backend `message` field from a raw (possibly non-JSON) body.
fn body_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Extract the transient success `message` from a parsed payload.
pub(crate) fn payload_message(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
}
