//! User Configuration
//!
//! A small user-editable JSON file with the name-substitution table and the
//! cut-word list. Loaded before and saved after each run, so files created
//! by older versions pick up newly added keys.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// User-editable matching configuration.
///
/// `object_name_replacement` is order-preserving: replacements apply in file
/// order and compose left to right. Unknown keys in the file are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Literal substring replacements applied to object names
    pub object_name_replacement: IndexMap<String, String>,
    /// Switch group names whose container children are cut by their parent's
    /// name before matching
    pub special_switch_group_cut_words: Vec<String>,
}

impl Default for UserConfig {
    fn default() -> Self {
        let mut replacements = IndexMap::new();
        replacements.insert(
            "example_name_replacement_switch_auto_assigner".to_string(),
            "example_new_name".to_string(),
        );
        Self {
            object_name_replacement: replacements,
            special_switch_group_cut_words: vec![
                "write_switch_group_name_here".to_string(),
                "and_switch_container_child_name_will_be_cut".to_string(),
                "by_their_parents_name".to_string(),
            ],
        }
    }
}

/// Errors from loading or saving the configuration file
#[derive(Debug)]
pub enum ConfigError {
    /// File could not be read or written
    Io(std::io::Error),
    /// File content is not valid configuration JSON
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Config IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl UserConfig {
    /// Load the configuration, creating the file with defaults when missing.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let text = fs::read_to_string(path)?;
            let config: UserConfig = serde_json::from_str(&text)?;
            debug!(path = %path.display(), "User config loaded");
            Ok(config)
        } else {
            debug!(path = %path.display(), "User config not found, creating default");
            let config = UserConfig::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Save the configuration as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        debug!(path = %path.display(), "User config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_replacement_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = UserConfig {
            object_name_replacement: IndexMap::new(),
            special_switch_group_cut_words: vec!["Surface".to_string()],
        };
        config
            .object_name_replacement
            .insert("zz".to_string(), "a".to_string());
        config
            .object_name_replacement
            .insert("aa".to_string(), "b".to_string());
        config.save(&path).unwrap();

        let loaded = UserConfig::load(&path).unwrap();
        let keys: Vec<_> = loaded.object_name_replacement.keys().collect();
        assert_eq!(keys, vec!["zz", "aa"]);
        assert_eq!(loaded.special_switch_group_cut_words, vec!["Surface"]);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = UserConfig::load(&path).unwrap();
        assert!(path.exists());
        assert!(!config.object_name_replacement.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"object_name_replacement": {"a": "b"}, "future_key": 42}"#,
        )
        .unwrap();

        let config = UserConfig::load(&path).unwrap();
        assert_eq!(
            config.object_name_replacement.get("a"),
            Some(&"b".to_string())
        );
        // Missing keys fall back to defaults.
        assert!(!config.special_switch_group_cut_words.is_empty());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        match UserConfig::load(&path) {
            Err(ConfigError::Parse(_)) => {}
            other => panic!("Expected parse error, got {:?}", other.map(|_| ())),
        }
    }
}
