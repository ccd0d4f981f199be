use thiserror::Error;

/// Top-level error type for the `exameets-api` crate.
///
/// Covers every failure mode of the HTTP adapter: authentication,
/// transport, backend-reported errors, and malformed payloads.
/// `exameets-core` stores the display form of these in slice state.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login/register rejected, or a protected endpoint answered 401.
    /// The backend uses the same 401 for bad credentials and for an
    /// expired session cookie; the message distinguishes them.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Backend ─────────────────────────────────────────────────────
    /// Error reported by the backend, surfaced verbatim to the user.
    /// The message comes from the response body's `message` field,
    /// with an `HTTP {status}` fallback when the body lacks one.
    #[error("{message}")]
    Api { message: String, status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the session is gone and
    /// a fresh login might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient transport error.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if the backend answered 404 for the request.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// The human-readable message a UI should surface for this failure.
    ///
    /// Every variant renders to a plain string; no failure reaches the
    /// caller unstructured.
    pub fn display_message(&self) -> String {
        self.to_string()
    }
}
