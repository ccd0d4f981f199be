//! Configuration for the Exameets client.
//!
//! A TOML file under the platform config directory, merged with
//! `EXAMEETS_*` environment variables, plus credential resolution
//! (env var, then system keyring, then plaintext config). Durable UI
//! preferences live in their own file, see [`prefs`].

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod prefs;

pub use prefs::{Preferences, Theme, load_prefs, save_prefs};

/// Env var overriding the config directory (used by tests and CI).
pub const CONFIG_DIR_ENV: &str = "EXAMEETS_CONFIG_DIR";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for account '{email}'")]
    NoPassword { email: String },

    #[error("no account configured; run `exameets auth login` or set [account] in the config")]
    NoAccount,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Backend connection settings.
    #[serde(default)]
    pub backend: Backend,

    /// Output defaults for the CLI.
    #[serde(default)]
    pub defaults: Defaults,

    /// The signed-in account, if any.
    pub account: Option<Account>,
}

/// Backend connection settings.
#[derive(Debug, Deserialize, Serialize)]
pub struct Backend {
    /// Portal API base URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "https://api.exameets.in".into()
}
fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// A stored account identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Account {
    pub email: String,

    /// Password in plaintext (prefer keyring or `EXAMEETS_PASSWORD`).
    pub password: Option<String>,
}

// ── Paths ───────────────────────────────────────────────────────────

/// The config directory, honoring the `EXAMEETS_CONFIG_DIR` override.
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    ProjectDirs::from("in", "exameets", "exameets")
        .map_or_else(dirs_fallback, |dirs| dirs.config_dir().to_path_buf())
}

/// Full path of the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("exameets");
    p
}

// ── Loading / saving ────────────────────────────────────────────────

/// Load the full `Config` from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("EXAMEETS_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, falling back to defaults when the file is absent or bad.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write it to the canonical path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the account password from the credential chain:
/// `EXAMEETS_PASSWORD` env var, then the system keyring, then plaintext
/// in the config file.
pub fn resolve_password(account: &Account) -> Result<SecretString, ConfigError> {
    // 1. Env var
    if let Ok(pw) = std::env::var("EXAMEETS_PASSWORD") {
        return Ok(SecretString::from(pw));
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("exameets", &account.email) {
        if let Ok(pw) = entry.get_password() {
            return Ok(SecretString::from(pw));
        }
    }

    // 3. Plaintext in config
    if let Some(ref pw) = account.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoPassword {
        email: account.email.clone(),
    })
}

/// Store a password in the system keyring for the given account.
pub fn store_password(email: &str, password: &str) -> Result<(), ConfigError> {
    let entry =
        keyring::Entry::new("exameets", email).map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })?;
    entry.set_password(password).map_err(|e| ConfigError::Validation {
        field: "keyring".into(),
        reason: e.to_string(),
    })
}
