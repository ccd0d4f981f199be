//! Configuration command handlers. These never touch the backend.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }
        ConfigCommand::SetPassword => set_password(global),
    }
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();

    let url: String = dialoguer::Input::new()
        .with_prompt("Portal API base URL")
        .default(cfg.backend.url.clone())
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    cfg.backend.url = url;

    let email: String = dialoguer::Input::new()
        .with_prompt("Account email (blank to skip)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    if !email.is_empty() {
        cfg.account = Some(exameets_config::Account {
            email,
            password: None,
        });
    }

    config::save_config(&cfg)?;
    if !global.quiet {
        eprintln!("Wrote {}", config::config_path().display());
    }
    Ok(())
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let toml_str = toml_string(&cfg)?;
    output::print_output(&toml_str, global.quiet);
    Ok(())
}

fn set_password(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let account = cfg.account.as_ref().ok_or(CliError::NoAccount)?;

    let password = util::prompt_password(&format!("Password for {}", account.email))?;
    use secrecy::ExposeSecret;
    exameets_config::store_password(&account.email, password.expose_secret())?;

    if !global.quiet {
        eprintln!("Password stored in the system keyring");
    }
    Ok(())
}

fn toml_string(cfg: &exameets_config::Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: e.to_string(),
    })
}
