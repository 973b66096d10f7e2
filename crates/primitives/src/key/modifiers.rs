//! Modifier keys held during a key press.

/// Held modifiers.
///
/// Cmd is read as Ctrl, so a `mod-s` binding fires for Ctrl+S and Cmd+S.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	pub ctrl: bool,
	pub alt: bool,
	pub shift: bool,
}

impl Modifiers {
	/// Bare key.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
	};

	/// Ctrl (or Cmd) alone, the usual command chord.
	pub const CTRL: Self = Self::NONE.ctrl();

	pub const fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	pub const fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	pub const fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns true when the chord is a command rather than text input.
	///
	/// Shift on its own still types.
	pub const fn is_command(self) -> bool {
		self.ctrl || self.alt
	}
}
