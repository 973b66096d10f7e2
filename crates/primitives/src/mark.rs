//! Inline formatting marks.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
	/// Set of inline marks applied to a text span.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
	pub struct Marks: u8 {
		/// Strong emphasis.
		const BOLD = 1 << 0;
		/// Emphasis.
		const ITALIC = 1 << 1;
		/// Strikethrough.
		const STRIKE = 1 << 2;
		/// Inline code.
		const CODE = 1 << 3;
	}
}

/// A single inline mark, as toggled by formatting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
	/// Strong emphasis.
	Bold,
	/// Emphasis.
	Italic,
	/// Strikethrough.
	Strike,
	/// Inline code.
	Code,
}

impl Mark {
	/// Returns the flag for this mark.
	pub const fn flag(self) -> Marks {
		match self {
			Mark::Bold => Marks::BOLD,
			Mark::Italic => Marks::ITALIC,
			Mark::Strike => Marks::STRIKE,
			Mark::Code => Marks::CODE,
		}
	}
}

impl From<Mark> for Marks {
	fn from(mark: Mark) -> Self {
		mark.flag()
	}
}
