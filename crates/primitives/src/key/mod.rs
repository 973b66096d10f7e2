//! Key events and the textual key syntax used by keymaps.
//!
//! ```text
//! key       = (modifier "-")* name
//! modifier  = "ctrl" | "cmd" | "mod" | "alt" | "shift"
//! name      = "enter" | "backspace" | "left" | ... | char
//! ```

mod modifiers;


use std::fmt;
use std::str::FromStr;

pub use modifiers::Modifiers;
use thiserror::Error;

/// A key without modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	/// A printable character.
	Char(char),
	/// Enter / Return.
	Enter,
	/// Backspace.
	Backspace,
	/// Forward delete.
	Delete,
	/// Tab.
	Tab,
	/// Escape.
	Esc,
	/// Left arrow.
	Left,
	/// Right arrow.
	Right,
	/// Up arrow.
	Up,
	/// Down arrow.
	Down,
	/// Home.
	Home,
	/// End.
	End,
}

const NAMED: &[(&str, KeyCode)] = &[
	("enter", KeyCode::Enter),
	("ret", KeyCode::Enter),
	("backspace", KeyCode::Backspace),
	("del", KeyCode::Delete),
	("delete", KeyCode::Delete),
	("tab", KeyCode::Tab),
	("esc", KeyCode::Esc),
	("left", KeyCode::Left),
	("right", KeyCode::Right),
	("up", KeyCode::Up),
	("down", KeyCode::Down),
	("home", KeyCode::Home),
	("end", KeyCode::End),
	("space", KeyCode::Char(' ')),
];

/// A key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
	/// The key pressed.
	pub code: KeyCode,
	/// Modifiers held.
	pub modifiers: Modifiers,
}

impl Key {
	/// Creates an unmodified key.
	pub const fn new(code: KeyCode) -> Self {
		Self {
			code,
			modifiers: Modifiers::NONE,
		}
	}

	/// Creates an unmodified character key.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c))
	}

	/// Returns a copy with `modifiers`.
	pub const fn with(self, modifiers: Modifiers) -> Self {
		Self { modifiers, ..self }
	}

	/// Returns the character this key types, if it is plain text input.
	pub fn text_input(&self) -> Option<char> {
		match self.code {
			KeyCode::Char(c) if !self.modifiers.is_command() => Some(c),
			_ => None,
		}
	}
}

impl From<KeyCode> for Key {
	fn from(code: KeyCode) -> Self {
		Self::new(code)
	}
}

/// A key string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
	/// The string was empty.
	#[error("empty key")]
	Empty,
	/// A modifier name was not recognised.
	#[error("unknown modifier '{0}'")]
	UnknownModifier(String),
	/// A key name was not recognised.
	#[error("unknown key '{0}'")]
	UnknownKey(String),
}

impl FromStr for Key {
	type Err = KeyParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if s.is_empty() {
			return Err(KeyParseError::Empty);
		}

		// A trailing "--" names the '-' key itself.
		let (prefix, name) = match s.strip_suffix("--") {
			Some(rest) => (rest, "-"),
			None => match s.rsplit_once('-') {
				Some((prefix, name)) if !name.is_empty() => (prefix, name),
				_ => ("", s),
			},
		};

		let mut modifiers = Modifiers::NONE;
		for part in prefix.split('-').filter(|p| !p.is_empty()) {
			modifiers = match part.to_ascii_lowercase().as_str() {
				"ctrl" | "cmd" | "mod" => modifiers.ctrl(),
				"alt" => modifiers.alt(),
				"shift" => modifiers.shift(),
				_ => return Err(KeyParseError::UnknownModifier(part.to_string())),
			};
		}

		let lower = name.to_ascii_lowercase();
		let code = if let Some((_, code)) = NAMED.iter().find(|(n, _)| *n == lower) {
			*code
		} else {
			let mut chars = name.chars();
			match (chars.next(), chars.next()) {
				(Some(c), None) => KeyCode::Char(c),
				_ => return Err(KeyParseError::UnknownKey(name.to_string())),
			}
		};

		Ok(Key { code, modifiers })
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.modifiers.ctrl {
			f.write_str("ctrl-")?;
		}
		if self.modifiers.alt {
			f.write_str("alt-")?;
		}
		if self.modifiers.shift {
			f.write_str("shift-")?;
		}
		match self.code {
			KeyCode::Char(' ') => f.write_str("space"),
			KeyCode::Char(c) => write!(f, "{c}"),
			code => {
				let name = NAMED.iter().find(|(_, c)| *c == code).map_or("?", |(n, _)| n);
				f.write_str(name)
			}
		}
	}
}
