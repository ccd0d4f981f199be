//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde_json::{Map, Value};

use crate::cli::PayloadArgs;
use crate::error::CliError;

/// Form fields the portal submits comma-separated but stores as arrays.
pub const LIST_FIELDS: &[&str] = &["skills", "qualifications", "subjects", "keywords"];

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal on stdin there is nobody to answer the prompt, so
/// a non-interactive invocation must pass `--yes` explicitly.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.to_owned(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Prompt for a password without echoing.
pub fn prompt_password(prompt: &str) -> Result<secrecy::SecretString, CliError> {
    let raw = rpassword::prompt_password(format!("{prompt}: "))?;
    Ok(secrecy::SecretString::from(raw))
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Map<String, Value>, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    value.as_object().cloned().ok_or_else(|| CliError::Validation {
        field: "from-file".into(),
        reason: "expected a JSON object at the top level".into(),
    })
}

/// Parse one `key=value` argument.
pub fn parse_kv(raw: &str) -> Result<(String, String), CliError> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_owned(), v.to_owned()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| CliError::Validation {
            field: "set/filter".into(),
            reason: format!("expected key=value, got '{raw}'"),
        })
}

/// Assemble a create/update payload from `--from-file` and `--set`
/// flags, then split comma-separated list fields into arrays.
pub fn build_payload(args: &PayloadArgs) -> Result<Map<String, Value>, CliError> {
    let mut payload = match args.from_file {
        Some(ref path) => read_json_file(path)?,
        None => Map::new(),
    };

    for raw in &args.set {
        let (key, value) = parse_kv(raw)?;
        payload.insert(key, Value::String(value));
    }

    if payload.is_empty() {
        return Err(CliError::Validation {
            field: "payload".into(),
            reason: "provide at least one --set key=value or --from-file".into(),
        });
    }

    exameets_api::split_list_fields(&mut payload, LIST_FIELDS);
    Ok(payload)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::PayloadArgs;
    use serde_json::json;

    #[test]
    fn parse_kv_rejects_bare_keys() {
        assert_eq!(
            parse_kv("location=Hyderabad").unwrap(),
            ("location".to_owned(), "Hyderabad".to_owned())
        );
        assert!(parse_kv("location").is_err());
        assert!(parse_kv("=value").is_err());
    }

    #[test]
    fn build_payload_splits_list_fields() {
        let args = PayloadArgs {
            set: vec![
                "jobTitle=Backend Engineer".into(),
                "skills=rust, tokio ,serde".into(),
            ],
            from_file: None,
        };
        let payload = build_payload(&args).unwrap();
        assert_eq!(payload.get("jobTitle"), Some(&json!("Backend Engineer")));
        assert_eq!(payload.get("skills"), Some(&json!(["rust", "tokio", "serde"])));
    }

    #[test]
    fn build_payload_requires_input() {
        let args = PayloadArgs {
            set: vec![],
            from_file: None,
        };
        assert!(build_payload(&args).is_err());
    }
}
