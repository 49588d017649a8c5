//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rcompose/rcompose.toml`
//! 3. Local config: `<dir>/.rcompose.toml`
//! 4. Environment variables: `RCOMPOSE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Unified configuration for rcompose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Channels used by `notify` when none are given, in delivery order
    pub default_channels: Vec<String>,
    /// Optional sender shown in front of every delivered line
    pub sender: Option<String>,
    /// Print the cost tree, not just totals
    pub show_tree: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_channels: vec!["email".into(), "sms".into(), "slack".into()],
            sender: None,
            show_tree: false,
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_channels: Option<Vec<String>>,
    pub sender: Option<String>,
    pub show_tree: Option<bool>,
}

/// Get the XDG config directory for rcompose.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rcompose").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rcompose.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".rcompose.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge a channel list keeping order.
    ///
    /// - Base items keep their position
    /// - New overlay items are appended in overlay order
    /// - Items prefixed with `!` remove the corresponding item
    ///
    /// # Examples
    /// ```ignore
    /// merge_channels(&["email", "sms"], &["slack"])  // → ["email", "sms", "slack"]
    /// merge_channels(&["email", "sms"], &["!email"]) // → ["sms"]
    /// ```
    pub fn merge_channels(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: Vec<String> = Vec::with_capacity(base.len() + overlay.len());
        for item in base {
            if !result.contains(item) {
                result.push(item.clone());
            }
        }

        for pattern in overlay {
            if let Some(negated) = pattern.strip_prefix('!') {
                result.retain(|item| item != negated);
            } else if !result.contains(pattern) {
                result.push(pattern.clone());
            }
        }

        result
    }

    /// Merge local overlay onto self: scalars replace, channels union.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_channels: overlay
                .default_channels
                .as_ref()
                .map(|o| Self::merge_channels(&self.default_channels, o))
                .unwrap_or_else(|| self.default_channels.clone()),
            sender: overlay.sender.clone().or_else(|| self.sender.clone()),
            show_tree: overlay.show_tree.unwrap_or(self.show_tree),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for arrays.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            default_channels: global
                .default_channels
                .clone()
                .unwrap_or_else(|| self.default_channels.clone()),
            sender: global.sender.clone().or_else(|| self.sender.clone()),
            show_tree: global.show_tree.unwrap_or(self.show_tree),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.rcompose.toml`
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION in order, with `!name` negation
    /// - Any → Env vars: REPLACE
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply RCOMPOSE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("RCOMPOSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("default_channels"),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get::<Vec<String>>("default_channels") {
            settings.default_channels = val;
        }
        if let Ok(val) = config.get_string("sender") {
            settings.sender = Some(val);
        }
        if let Ok(val) = config.get_bool("show_tree") {
            settings.show_tree = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rcompose configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/rcompose/rcompose.toml
#   Local:  <dir>/.rcompose.toml
#   Env:    RCOMPOSE_* environment variables
#
# Local default_channels are appended to the global list in order.
# Use "!name" in local config to remove an inherited channel:
#   default_channels = ["slack", "!sms"]

# Channels used by `rcompose notify` without --via, first delivers first
# default_channels = ["email", "sms", "slack"]

# Sender shown in front of every delivered line
# sender = "ops"

# Print the cost tree for `rcompose cost`
# show_tree = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn given_defaults_when_created_then_all_channels_in_order() {
        let settings = Settings::default();
        assert_eq!(settings.default_channels, strings(&["email", "sms", "slack"]));
        assert!(!settings.show_tree);
    }

    #[test]
    fn test_merge_channels_appends_in_order() {
        let result = Settings::merge_channels(&strings(&["email", "sms"]), &strings(&["slack"]));
        assert_eq!(result, strings(&["email", "sms", "slack"]));
    }

    #[test]
    fn test_merge_channels_negation() {
        let result = Settings::merge_channels(
            &strings(&["email", "sms", "slack"]),
            &strings(&["!email"]),
        );
        assert_eq!(result, strings(&["sms", "slack"]));
    }

    #[test]
    fn test_merge_channels_duplicates_keep_first_position() {
        let result =
            Settings::merge_channels(&strings(&["email", "sms"]), &strings(&["email", "slack"]));
        assert_eq!(result, strings(&["email", "sms", "slack"]));
    }

    #[test]
    fn test_merge_channels_negation_nonexistent() {
        let result = Settings::merge_channels(&strings(&["email"]), &strings(&["!pigeon"]));
        assert_eq!(result, strings(&["email"]));
    }

    #[test]
    fn test_apply_global_replaces_channels() {
        let base = Settings::default();
        let global = RawSettings {
            default_channels: Some(strings(&["slack"])),
            sender: Some("global".into()),
            show_tree: None,
        };

        let result = base.apply_global(&global);

        assert_eq!(result.default_channels, strings(&["slack"]));
        assert_eq!(result.sender.as_deref(), Some("global"));
        assert!(!result.show_tree);
    }

    #[test]
    fn test_merge_with_keeps_base_when_not_specified() {
        let base = Settings {
            default_channels: strings(&["email"]),
            sender: Some("base".into()),
            show_tree: true,
        };

        let result = base.merge_with(&RawSettings::default());

        assert_eq!(result, base);
    }

    #[test]
    fn given_settings_when_to_toml_then_roundtrips_fields() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("default_channels"));
        assert!(toml.contains("show_tree = false"));
    }
}
