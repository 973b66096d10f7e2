//! Plugin contract for the editing session.
//!
//! Plugins observe the session at three seams. Each hook returns a
//! transaction to claim the event, or `None` to pass.
//!
//! * [`Plugin::handle_action`]: a named action was requested. Returning a
//!   transaction suppresses the default command.
//! * [`Plugin::handle_text_input`]: text is about to be typed at the cursor.
//! * [`Plugin::append_transaction`]: a transaction was applied. Returned
//!   transactions are applied on top, in the same commit.

use folio_primitives::Transaction;

use crate::action::Action;
use crate::state::EditorState;

/// An editor extension.
pub trait Plugin {
	/// Stable plugin name, used as the origin of appended transactions.
	fn name(&self) -> &'static str;

	/// Handles a named action. Returning `Some` marks the action handled.
	fn handle_action(&self, _state: &EditorState, _action: Action) -> Option<Transaction> {
		None
	}

	/// Handles text about to be inserted at the cursor.
	fn handle_text_input(&self, _state: &EditorState, _text: &str) -> Option<Transaction> {
		None
	}

	/// Inspects the state after `transactions` were applied to `old` and may
	/// append a corrective transaction built from `new`.
	fn append_transaction(
		&self,
		_transactions: &[Transaction],
		_old: &EditorState,
		_new: &EditorState,
	) -> Option<Transaction> {
		None
	}
}
