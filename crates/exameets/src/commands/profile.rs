//! Profile, password, and preference command handlers.

use exameets_core::Store;

use crate::cli::{GlobalOpts, ProfileArgs, ProfileCommand};
use crate::config;
use crate::error::CliError;

use super::util;

pub async fn handle(store: &Store, args: ProfileArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();

    match args.command {
        ProfileCommand::Update(payload) => {
            config::ensure_session(store, &cfg, "profile update").await?;

            let payload = util::build_payload(&payload)?;
            store.session().update_profile(payload).await?;
            report(store, "Profile updated", global.quiet);
            Ok(())
        }

        ProfileCommand::Password => {
            config::ensure_session(store, &cfg, "profile password").await?;

            let old = util::prompt_password("Current password")?;
            let new = util::prompt_password("New password")?;
            store.session().update_password(&old, &new).await?;
            report(store, "Password changed", global.quiet);
            Ok(())
        }

        ProfileCommand::Preferences(payload) => {
            config::ensure_session(store, &cfg, "profile preferences").await?;

            let payload = util::build_payload(&payload)?;
            store.session().update_preferences(payload).await?;
            report(store, "Preferences updated", global.quiet);
            Ok(())
        }
    }
}

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
