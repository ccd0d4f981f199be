use thiserror::Error;

/// Top-level error type for the `exameets-core` crate.
///
/// Slice operations record their failure message in slice state *and*
/// return it here, so consumers can branch on the outcome without ever
/// catching an unstructured failure.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Login/session rejected by the backend.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// The backend reported a failure; surfaced verbatim.
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    /// The backend could not be reached at all.
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    /// Client-side validation rejected the input before any request.
    #[error("Invalid input: {message}")]
    ValidationFailed { message: String },
}

impl CoreError {
    /// The display string stored in slice `error` slots.
    pub fn display_message(&self) -> String {
        self.to_string()
    }

    /// Returns `true` when the backend answered 404.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Api {
                status: Some(404),
                ..
            }
        )
    }
}

impl From<exameets_api::Error> for CoreError {
    fn from(err: exameets_api::Error) -> Self {
        match err {
            exameets_api::Error::Authentication { message } => {
                Self::AuthenticationFailed { message }
            }
            exameets_api::Error::Api { message, status } => Self::Api {
                message,
                status: Some(status),
            },
            exameets_api::Error::Transport(e) => Self::ConnectionFailed {
                message: e.to_string(),
            },
            exameets_api::Error::InvalidUrl(e) => Self::ValidationFailed {
                message: e.to_string(),
            },
            exameets_api::Error::Deserialization { message, .. } => Self::Api {
                message,
                status: None,
            },
        }
    }
}
