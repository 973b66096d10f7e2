//! Editor configuration.
//!
//! Read from TOML. Every field has a default, so an empty file is valid:
//!
//! ```toml
//! placeholder = "Start writing your post..."
//! history_depth = 100
//! append_rounds = 8
//! input_rules = true
//!
//! [keys]
//! "ctrl-s" = "toggle_strike"
//! "ctrl-y" = "none"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use folio_primitives::KeyParseError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::keymap::Keymap;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read {}: {source}", path.display())]
	Io {
		/// File that could not be read.
		path: PathBuf,
		source: std::io::Error,
	},
	#[error("failed to parse config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("key '{key}' is bound to unknown action '{action}'")]
	UnknownAction {
		/// Key string as written.
		key: String,
		/// Action name as written.
		action: String,
	},
	#[error("invalid key '{key}': {source}")]
	InvalidKey {
		/// Key string as written.
		key: String,
		source: KeyParseError,
	},
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
	/// Hint shown while the post body is empty.
	pub placeholder: String,
	/// Maximum number of undo steps kept.
	pub history_depth: usize,
	/// Maximum number of append rounds per dispatch.
	pub append_rounds: usize,
	/// Whether Markdown shortcuts apply while typing.
	pub input_rules: bool,
	/// Key binding overrides, key string to action name.
	pub keys: BTreeMap<String, String>,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			placeholder: "Start writing your post...".to_string(),
			history_depth: 100,
			append_rounds: 8,
			input_rules: true,
			keys: BTreeMap::new(),
		}
	}
}

impl EditorConfig {
	/// Parses configuration from a TOML string.
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}

	/// Reads configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml_str(&src)?;
		debug!(path = %path.display(), overrides = config.keys.len(), "loaded editor config");
		Ok(config)
	}

	/// Builds the keymap: defaults plus the `[keys]` overrides.
	pub fn keymap(&self) -> Result<Keymap, ConfigError> {
		Keymap::with_overrides(&self.keys)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use folio_primitives::Key;

	use super::*;
	use crate::action::Action;

	#[test]
	fn empty_config_uses_defaults() {
		assert_eq!(EditorConfig::from_toml_str("").unwrap(), EditorConfig::default());
	}

	#[test]
	fn partial_config_keeps_other_defaults() {
		let config = EditorConfig::from_toml_str("history_depth = 5\ninput_rules = false").unwrap();
		assert_eq!(config.history_depth, 5);
		assert!(!config.input_rules);
		assert_eq!(config.append_rounds, 8);
	}

	#[test]
	fn unknown_fields_are_rejected() {
		let err = EditorConfig::from_toml_str("colour = \"red\"").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn key_table_feeds_keymap() {
		let config = EditorConfig::from_toml_str(
			r#"
			[keys]
			"ctrl-s" = "toggle_strike"
			"ctrl-b" = "none"
			"#,
		)
		.unwrap();
		let keymap = config.keymap().unwrap();
		assert_eq!(keymap.lookup(&"ctrl-s".parse::<Key>().unwrap()), Some(Action::ToggleStrike));
		assert_eq!(keymap.lookup(&"ctrl-b".parse::<Key>().unwrap()), None);
	}

	#[test]
	fn load_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "placeholder = \"Write!\"").unwrap();
		let config = EditorConfig::load(file.path()).unwrap();
		assert_eq!(config.placeholder, "Write!");
	}

	#[test]
	fn missing_file_names_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent.toml");
		let err = EditorConfig::load(&path).unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
		assert!(err.to_string().contains("absent.toml"));
	}
}
