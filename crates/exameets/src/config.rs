//! Bridges the config file and CLI flags to a connected `Store`.

use std::time::Duration;

use exameets_config::Config;
use exameets_core::{LoginCredentials, SessionState, Store, TransportConfig, protect};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use exameets_config::{config_path, load_config_or_default, save_config};

/// The backend URL after applying CLI/env overrides.
pub fn resolve_url(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .url
        .clone()
        .unwrap_or_else(|| cfg.backend.url.clone())
}

/// Build a `Store` from the config file and CLI flag overrides.
pub fn build_store(global: &GlobalOpts, cfg: &Config) -> Result<Store, CliError> {
    let url = resolve_url(global, cfg);
    let transport = TransportConfig {
        timeout: Duration::from_secs(global.timeout),
        ..TransportConfig::default()
    };
    Store::connect(&url, &transport).map_err(CliError::from)
}

/// Establish a session for commands that require one.
///
/// Each CLI invocation starts with an empty cookie jar, so "restore"
/// means logging in with the stored account credentials. The route
/// guard then decides whether the command may proceed.
pub async fn ensure_session(
    store: &Store,
    cfg: &Config,
    command: &str,
) -> Result<SessionState, CliError> {
    let session = store.session();
    if !session.snapshot().ready {
        session.bootstrap().await;
    }

    if !session.snapshot().is_authenticated() {
        if let Some(ref account) = cfg.account {
            let password = exameets_config::resolve_password(account)?;
            let creds = LoginCredentials {
                email: account.email.clone(),
                password,
            };
            session.login(&creds).await?;
        }
    }

    let snapshot = session.snapshot();
    match protect(&snapshot, command) {
        exameets_core::RouteDecision::Allow => Ok((*snapshot).clone()),
        exameets_core::RouteDecision::Pending | exameets_core::RouteDecision::Redirect { .. } => {
            Err(CliError::AuthRequired {
                command: command.to_owned(),
            })
        }
    }
}
