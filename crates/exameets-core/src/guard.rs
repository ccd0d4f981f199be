//! Route protection, as a pure function of session state.
//!
//! Deciding is deliberately separate from acting: the consumer renders a
//! placeholder, performs a redirect, or shows the content, but the
//! three-way decision itself has no side effects and is trivially
//! testable.

use crate::session::{SessionPhase, SessionState};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Outcome of guarding a protected location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session not yet settled; render a loading placeholder. Protected
    /// content must never flash before bootstrap completes.
    Pending,
    /// Not authenticated; send to `to`, preserving `from` so the
    /// consumer can return there after a successful login.
    Redirect { to: String, from: String },
    /// Authenticated; show the content.
    Allow,
}

/// Decide whether `requested` may be shown under the given session.
pub fn protect(session: &SessionState, requested: &str) -> RouteDecision {
    if !session.ready {
        return RouteDecision::Pending;
    }
    match session.phase {
        SessionPhase::Authenticated => RouteDecision::Allow,
        SessionPhase::Anonymous | SessionPhase::Bootstrapping => RouteDecision::Redirect {
            to: LOGIN_PATH.to_owned(),
            from: requested.to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exameets_api::Record;
    use serde_json::Map;

    fn settled(phase: SessionPhase, user: Option<Record>) -> SessionState {
        SessionState {
            phase,
            user,
            ready: true,
            ..SessionState::default()
        }
    }

    #[test]
    fn unsettled_session_is_pending() {
        let state = SessionState::default();
        assert_eq!(protect(&state, "/jobs"), RouteDecision::Pending);

        // Still pending mid-bootstrap, even though a phase is set.
        let state = SessionState {
            phase: SessionPhase::Bootstrapping,
            ..SessionState::default()
        };
        assert_eq!(protect(&state, "/jobs"), RouteDecision::Pending);
    }

    #[test]
    fn anonymous_redirects_preserving_origin() {
        let state = settled(SessionPhase::Anonymous, None);
        assert_eq!(
            protect(&state, "/scholarships/abc123"),
            RouteDecision::Redirect {
                to: LOGIN_PATH.to_owned(),
                from: "/scholarships/abc123".to_owned(),
            }
        );
    }

    #[test]
    fn authenticated_allows() {
        let user = Record::new("u1", Map::new());
        let state = settled(SessionPhase::Authenticated, Some(user));
        assert_eq!(protect(&state, "/dashboard"), RouteDecision::Allow);
    }
}
