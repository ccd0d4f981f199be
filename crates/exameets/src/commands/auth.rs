//! Session and account command handlers.

use secrecy::ExposeSecret;

use exameets_core::{LoginCredentials, Store};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(store: &Store, args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Login {
            email,
            save_password,
        } => login(store, global, email, save_password).await,
        AuthCommand::Register { name, email, phone } => {
            register(store, global, name, email, phone).await
        }
        AuthCommand::Logout => logout(store, global).await,
        AuthCommand::Whoami => whoami(store, global).await,
        AuthCommand::DeleteAccount => delete_account(store, global).await,
    }
}

async fn login(
    store: &Store,
    global: &GlobalOpts,
    email: Option<String>,
    save_password: bool,
) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();

    let email = email
        .or_else(|| cfg.account.as_ref().map(|a| a.email.clone()))
        .ok_or(CliError::NoAccount)?;

    // Stored credentials first, interactive prompt as the fallback.
    let stored = exameets_config::Account {
        email: email.clone(),
        password: cfg.account.as_ref().and_then(|a| a.password.clone()),
    };
    let password = match exameets_config::resolve_password(&stored) {
        Ok(pw) => pw,
        Err(_) => util::prompt_password("Password")?,
    };

    let creds = LoginCredentials {
        email: email.clone(),
        password,
    };
    store.session().login(&creds).await?;

    if save_password {
        exameets_config::store_password(&email, creds.password.expose_secret())?;
    }
    cfg.account = Some(exameets_config::Account {
        email,
        password: None,
    });
    config::save_config(&cfg)?;

    report(store, "Signed in", global.quiet);
    Ok(())
}

async fn register(
    store: &Store,
    global: &GlobalOpts,
    name: String,
    email: String,
    phone: String,
) -> Result<(), CliError> {
    let password = util::prompt_password("Choose a password")?;

    let payload = exameets_core::RegisterPayload {
        name,
        email: email.clone(),
        phone,
        password,
        extra: serde_json::Map::new(),
    };
    store.session().register(&payload).await?;

    let mut cfg = config::load_config_or_default();
    cfg.account = Some(exameets_config::Account {
        email,
        password: None,
    });
    config::save_config(&cfg)?;

    report(store, "Account created", global.quiet);
    Ok(())
}

async fn logout(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    config::ensure_session(store, &cfg, "auth logout").await?;

    // Local state clears regardless of the remote outcome; surface the
    // remote failure but keep going so the stored account is forgotten.
    let remote = store.session().logout().await;

    cfg.account = None;
    config::save_config(&cfg)?;
    remote?;

    report(store, "Signed out", global.quiet);
    Ok(())
}

async fn whoami(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let session = config::ensure_session(store, &cfg, "auth whoami").await?;

    if let Some(ref user) = session.user {
        let out = output::render_record(&global.output, user);
        output::print_output(&out, global.quiet);
    }
    Ok(())
}

async fn delete_account(store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    config::ensure_session(store, &cfg, "auth delete-account").await?;

    if !util::confirm(
        "Permanently delete this account and all its data?",
        global.yes,
    )? {
        return Ok(());
    }
    let password = util::prompt_password("Confirm password")?;
    store.session().delete_account(&password).await?;

    cfg.account = None;
    config::save_config(&cfg)?;

    report(store, "Account deleted", global.quiet);
    Ok(())
}

/// Print the session's message, or a fallback, to stderr.
fn report(store: &Store, fallback: &str, quiet: bool) {
    if quiet {
        return;
    }
    let snap = store.session().snapshot();
    match snap.message {
        Some(ref message) => eprintln!("{message}"),
        None => eprintln!("{fallback}"),
    }
}
