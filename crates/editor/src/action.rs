//! Named editor actions.
//!
//! Keys resolve to actions through the [`Keymap`](crate::keymap::Keymap);
//! plugins get the first chance to handle an action before the default
//! command runs.

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// A command the editing surface can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
	/// Confirm the current line (Enter).
	InsertNewline,
	/// Move the cursor one character back.
	MoveLeft,
	/// Move the cursor one character forward.
	MoveRight,
	/// Move the cursor to the previous text block.
	MoveUp,
	/// Move the cursor to the next text block.
	MoveDown,
	/// Delete the selection or the character before the cursor.
	DeleteBackward,
	/// Revert the last edit.
	Undo,
	/// Reapply the last reverted edit.
	Redo,
	/// Toggle bold.
	ToggleBold,
	/// Toggle italic.
	ToggleItalic,
	/// Toggle strikethrough.
	ToggleStrike,
	/// Toggle inline code.
	ToggleCode,
	/// Turn the block into a rank-1 heading.
	#[strum(serialize = "heading1")]
	Heading1,
	/// Turn the block into a rank-2 heading.
	#[strum(serialize = "heading2")]
	Heading2,
	/// Turn the block into a rank-3 heading.
	#[strum(serialize = "heading3")]
	Heading3,
	/// Turn the block into a paragraph.
	Paragraph,
	/// Turn the block into a bullet list item.
	BulletList,
	/// Turn the block into an ordered list item.
	OrderedList,
	/// Turn the block into a blockquote.
	Blockquote,
	/// Turn the block into a code block.
	CodeBlock,
	/// Insert a separator after the current block.
	InsertSeparator,
}

impl Action {
	/// Returns true for the actions that advance out of the current block.
	pub fn is_advance(self) -> bool {
		matches!(self, Action::InsertNewline | Action::MoveRight | Action::MoveDown)
	}
}
