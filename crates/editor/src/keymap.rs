//! Key to action bindings.
//!
//! The default bindings mirror the toolbar shortcuts of the post editor. User
//! configuration overrides individual bindings by key string; binding a key to
//! `"none"` removes it.

use std::collections::{BTreeMap, HashMap};

use folio_primitives::{Key, KeyCode, Modifiers};
use tracing::debug;

use crate::action::Action;
use crate::config::ConfigError;

/// Value unbinding a key in configuration.
pub const UNBIND: &str = "none";

/// A set of key bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
	bindings: HashMap<Key, Action>,
}

impl Keymap {
	/// A keymap without bindings.
	pub fn empty() -> Self {
		Self {
			bindings: HashMap::new(),
		}
	}

	/// Default bindings with `overrides` applied on top.
	///
	/// Keys are parsed with [`Key`]'s dash syntax (`"ctrl-shift-z"`), values
	/// are snake_case action names or [`UNBIND`].
	pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
		let mut keymap = Self::default();
		for (key_str, action_str) in overrides {
			let key: Key = key_str.parse().map_err(|source| ConfigError::InvalidKey {
				key: key_str.clone(),
				source,
			})?;
			if action_str == UNBIND {
				keymap.unbind(&key);
				debug!(%key, "unbound key");
				continue;
			}
			let action: Action = action_str.parse().map_err(|_| ConfigError::UnknownAction {
				key: key_str.clone(),
				action: action_str.clone(),
			})?;
			keymap.bind(key, action);
			debug!(%key, %action, "bound key");
		}
		Ok(keymap)
	}

	/// Binds `key`, returning the action it replaced.
	pub fn bind(&mut self, key: Key, action: Action) -> Option<Action> {
		self.bindings.insert(key, action)
	}

	/// Removes the binding of `key`.
	pub fn unbind(&mut self, key: &Key) -> Option<Action> {
		self.bindings.remove(key)
	}

	/// Action bound to `key`, if any.
	pub fn lookup(&self, key: &Key) -> Option<Action> {
		self.bindings.get(key).copied()
	}

	/// Number of bindings.
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}

	/// Bindings sorted by key string, for listing.
	pub fn sorted(&self) -> Vec<(String, Action)> {
		let mut list: Vec<_> = self.bindings.iter().map(|(k, a)| (k.to_string(), *a)).collect();
		list.sort_by(|a, b| a.0.cmp(&b.0));
		list
	}
}

impl Default for Keymap {
	fn default() -> Self {
		let ctrl = Modifiers::CTRL;
		let ctrl_shift = Modifiers::CTRL.shift();
		let ctrl_alt = Modifiers::CTRL.alt();

		let bindings = [
			(Key::new(KeyCode::Enter), Action::InsertNewline),
			(Key::new(KeyCode::Left), Action::MoveLeft),
			(Key::new(KeyCode::Right), Action::MoveRight),
			(Key::new(KeyCode::Up), Action::MoveUp),
			(Key::new(KeyCode::Down), Action::MoveDown),
			(Key::new(KeyCode::Backspace), Action::DeleteBackward),
			(Key::char('z').with(ctrl), Action::Undo),
			(Key::char('z').with(ctrl_shift), Action::Redo),
			(Key::char('y').with(ctrl), Action::Redo),
			(Key::char('b').with(ctrl), Action::ToggleBold),
			(Key::char('i').with(ctrl), Action::ToggleItalic),
			(Key::char('e').with(ctrl), Action::ToggleCode),
			(Key::char('s').with(ctrl_shift), Action::ToggleStrike),
			(Key::char('0').with(ctrl_alt), Action::Paragraph),
			(Key::char('1').with(ctrl_alt), Action::Heading1),
			(Key::char('2').with(ctrl_alt), Action::Heading2),
			(Key::char('3').with(ctrl_alt), Action::Heading3),
			(Key::char('7').with(ctrl_shift), Action::OrderedList),
			(Key::char('8').with(ctrl_shift), Action::BulletList),
			(Key::char('b').with(ctrl_shift), Action::Blockquote),
			(Key::char('c').with(ctrl_alt), Action::CodeBlock),
		];
		Self {
			bindings: bindings.into_iter().collect(),
		}
	}
}
