//! Durable UI preferences.
//!
//! What the browser keeps in local storage, kept here in a small TOML
//! file next to the config: the colour theme and the last visited page
//! number per section, so a returning user lands where they left off.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, config_dir};

/// Colour theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Persisted UI preferences.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,

    /// Last visited page number, keyed by section name (e.g. `"jobs"`).
    #[serde(default)]
    pub last_page: BTreeMap<String, u32>,
}

impl Preferences {
    /// The remembered page for a section, defaulting to the first.
    pub fn page_for(&self, section: &str) -> u32 {
        self.last_page.get(section).copied().unwrap_or(1).max(1)
    }

    /// Remember the page for a section. Page `1` is the default and is
    /// not stored, keeping the file minimal.
    pub fn remember_page(&mut self, section: &str, page: u32) {
        if page <= 1 {
            self.last_page.remove(section);
        } else {
            self.last_page.insert(section.to_owned(), page);
        }
    }
}

/// Full path of the preferences file.
pub fn prefs_path() -> PathBuf {
    config_dir().join("prefs.toml")
}

/// Load preferences, falling back to defaults when absent or unreadable.
pub fn load_prefs() -> Preferences {
    load_prefs_at(&prefs_path())
}

/// Save preferences to the canonical path.
pub fn save_prefs(prefs: &Preferences) -> Result<(), ConfigError> {
    save_prefs_at(&prefs_path(), prefs)
}

/// Load preferences from an explicit path.
pub fn load_prefs_at(path: &Path) -> Preferences {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|raw| toml::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Save preferences to an explicit path.
pub fn save_prefs_at(path: &Path, prefs: &Preferences) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(prefs)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.toml");

        let mut prefs = Preferences {
            theme: Theme::Dark,
            ..Preferences::default()
        };
        prefs.remember_page("jobs", 4);
        prefs.remember_page("exams", 2);
        save_prefs_at(&path, &prefs).unwrap();

        let loaded = load_prefs_at(&path);
        assert_eq!(loaded.theme, Theme::Dark);
        assert_eq!(loaded.page_for("jobs"), 4);
        assert_eq!(loaded.page_for("exams"), 2);
        // Unvisited section falls back to page one.
        assert_eq!(loaded.page_for("scholarships"), 1);
    }

    #[test]
    fn first_page_is_not_stored() {
        let mut prefs = Preferences::default();
        prefs.remember_page("jobs", 3);
        prefs.remember_page("jobs", 1);
        assert!(prefs.last_page.is_empty());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = load_prefs_at(&dir.path().join("nope.toml"));
        assert_eq!(prefs.theme, Theme::System);
        assert!(prefs.last_page.is_empty());
    }
}
