// ── Session/auth slice ──
//
// Owns the authenticated principal and drives route protection.
// Lifecycle: anonymous → bootstrapping → {authenticated, anonymous};
// authenticated → anonymous on logout or account deletion;
// authenticated → authenticated (user record merged) on profile or
// preference updates.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::{debug, warn};

use exameets_api::{ApiClient, LoginCredentials, Record, RegisterPayload};

use crate::error::CoreError;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Anonymous,
    Bootstrapping,
    Authenticated,
}

/// Observable session state.
///
/// `ready` flips to `true` once the one-time bootstrap has settled and
/// never flips back; the route guard keys off it so protected content
/// cannot flash before the session is known.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub user: Option<Record>,
    pub loading: bool,
    pub ready: bool,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }
}

/// Reactive slice for the session principal.
pub struct SessionSlice {
    api: Arc<ApiClient>,
    state: watch::Sender<Arc<SessionState>>,
}

impl SessionSlice {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        let (state, _) = watch::channel(Arc::new(SessionState::default()));
        Self { api, state }
    }

    /// Current state snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<SessionState> {
        self.state.borrow().clone()
    }

    /// Subscribe to session changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionState>> {
        self.state.subscribe()
    }

    // ── Lifecycle operations ─────────────────────────────────────────

    /// Restore the session from the cookie, once, at application start.
    ///
    /// Idempotent: calling it again with no intervening login/logout
    /// yields the same result. Any failure (including 401 for a missing
    /// cookie) settles to anonymous without recording an error --
    /// "not logged in" is a normal start state, not a fault.
    ///
    /// Returns whether the session is authenticated after settling.
    pub async fn bootstrap(&self) -> bool {
        self.apply(|s| {
            s.phase = SessionPhase::Bootstrapping;
            s.loading = true;
        });

        let authenticated = match self.api.current_user().await {
            Ok(Some(user)) => {
                debug!(user = %user.id, "session restored");
                self.apply(|s| {
                    s.phase = SessionPhase::Authenticated;
                    s.user = Some(user.clone());
                });
                true
            }
            Ok(None) => {
                self.apply(|s| {
                    s.phase = SessionPhase::Anonymous;
                    s.user = None;
                });
                false
            }
            Err(e) => {
                debug!(error = %e, "session bootstrap settled anonymous");
                self.apply(|s| {
                    s.phase = SessionPhase::Anonymous;
                    s.user = None;
                });
                false
            }
        };

        self.apply(|s| {
            s.loading = false;
            s.ready = true;
        });
        authenticated
    }

    /// Authenticate with email/password.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<(), CoreError> {
        self.begin();

        match self.api.login(credentials).await {
            Ok((user, message)) => {
                self.apply(|s| {
                    s.phase = SessionPhase::Authenticated;
                    s.user = Some(user.clone());
                    s.message = message.clone();
                    s.loading = false;
                    s.ready = true;
                });
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Register a new account. Same contract as [`login`](Self::login);
    /// the consuming view follows up with a one-time preference setup.
    pub async fn register(&self, payload: &RegisterPayload) -> Result<(), CoreError> {
        self.begin();

        match self.api.register(payload).await {
            Ok((user, message)) => {
                self.apply(|s| {
                    s.phase = SessionPhase::Authenticated;
                    s.user = Some(user.clone());
                    s.message = message.clone();
                    s.loading = false;
                    s.ready = true;
                });
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// End the session. The remote call is best-effort: local session
    /// state clears unconditionally on logout intent, and a remote
    /// failure is only recorded in `error` for display.
    pub async fn logout(&self) -> Result<(), CoreError> {
        self.begin();

        let result = self.api.logout().await;
        match result {
            Ok(message) => {
                self.apply(|s| {
                    *s = SessionState {
                        ready: true,
                        message: message.clone(),
                        ..SessionState::default()
                    };
                });
                Ok(())
            }
            Err(e) => {
                let core_err = CoreError::from(e);
                warn!(error = %core_err, "remote logout failed; clearing local session anyway");
                let message = core_err.display_message();
                self.apply(|s| {
                    *s = SessionState {
                        ready: true,
                        error: Some(message.clone()),
                        ..SessionState::default()
                    };
                });
                Err(core_err)
            }
        }
    }

    /// Delete the account. On success the session clears; on failure it
    /// is left untouched with `error` set for display.
    pub async fn delete_account(&self, password: &SecretString) -> Result<(), CoreError> {
        self.begin();

        match self.api.delete_account(password).await {
            Ok(message) => {
                self.apply(|s| {
                    *s = SessionState {
                        ready: true,
                        message: message.clone(),
                        ..SessionState::default()
                    };
                });
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    // ── Profile operations (merge, never replace) ────────────────────

    /// Update profile fields, merge-patching the stored user record with
    /// the subset the backend returns.
    pub async fn update_profile(&self, payload: Map<String, Value>) -> Result<(), CoreError> {
        self.begin();

        match self.api.update_profile(payload.clone()).await {
            Ok(outcome) => {
                self.merge_user(outcome.record.as_ref(), &payload, outcome.message);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Update notification/content preferences. Merge semantics.
    pub async fn update_preferences(&self, payload: Map<String, Value>) -> Result<(), CoreError> {
        self.begin();

        match self.api.update_preferences(payload.clone()).await {
            Ok(outcome) => {
                self.merge_user(outcome.record.as_ref(), &payload, outcome.message);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Change the account password. The user record is untouched.
    pub async fn update_password(
        &self,
        old_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), CoreError> {
        self.begin();

        match self.api.update_password(old_password, new_password).await {
            Ok(message) => {
                self.apply(|s| {
                    s.message = message.clone();
                    s.loading = false;
                });
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Acknowledge the stored error.
    pub fn clear_error(&self) {
        self.apply(|s| s.error = None);
    }

    /// Acknowledge the stored success message.
    pub fn clear_message(&self) {
        self.apply(|s| s.message = None);
    }

    // ── Plumbing ─────────────────────────────────────────────────────

    /// Rebuild the snapshot and broadcast to subscribers.
    fn apply(&self, f: impl Fn(&mut SessionState)) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.state.send_modify(|snap| {
            let mut next = (**snap).clone();
            f(&mut next);
            *snap = Arc::new(next);
        });
    }

    fn begin(&self) {
        self.apply(|s| {
            s.loading = true;
            s.error = None;
        });
    }

    fn fail(&self, err: exameets_api::Error) -> CoreError {
        let core_err = CoreError::from(err);
        let message = core_err.display_message();
        self.apply(|s| {
            s.loading = false;
            s.error = Some(message.clone());
        });
        core_err
    }

    /// Merge a returned user subset (or, failing that, the submitted
    /// payload) into the stored record. Never replaces wholesale.
    fn merge_user(
        &self,
        patch: Option<&Record>,
        submitted: &Map<String, Value>,
        message: Option<String>,
    ) {
        self.apply(|s| {
            if let Some(ref mut user) = s.user {
                match patch {
                    Some(patch) => {
                        for (key, value) in &patch.fields {
                            user.fields.insert(key.clone(), value.clone());
                        }
                        if !patch.id.is_empty() {
                            user.id.clone_from(&patch.id);
                        }
                    }
                    None => {
                        for (key, value) in submitted {
                            user.fields.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
            s.message = message.clone();
            s.loading = false;
        });
    }
}
