//! Title enforcement for post documents.
//!
//! Every post starts with a rank-1 title heading. The enforcer keeps it there
//! through two triggers:
//!
//! * After every applied transaction, [`enforce_title`] re-coerces the first
//!   block into a title heading (keeping its text) and bootstraps an empty
//!   document with an empty title.
//! * When an advance action (Enter, Right, Down) fires with the cursor at the
//!   end of the title, [`move_from_title_to_body`] makes sure exactly one
//!   separator follows the title and a paragraph follows the separator, then
//!   puts the cursor in that paragraph.
//!
//! Both corrections are single transactions, so the session commits them
//! together with the edit that triggered them.

use folio_primitives::{Block, Document, Origin, ResolvedPos, Selection, StepError, Transaction};
use tracing::{debug, trace, warn};

use crate::action::Action;
use crate::plugin::Plugin;
use crate::state::EditorState;


/// Name used as the origin of enforcer transactions.
pub const PLUGIN_NAME: &str = "title_enforcer";

/// Plugin keeping the title, separator, body shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleEnforcer;

impl Plugin for TitleEnforcer {
	fn name(&self) -> &'static str {
		PLUGIN_NAME
	}

	fn handle_action(&self, state: &EditorState, action: Action) -> Option<Transaction> {
		if !action.is_advance() {
			return None;
		}
		move_from_title_to_body(state)
	}

	fn append_transaction(&self, _transactions: &[Transaction], _old: &EditorState, new: &EditorState) -> Option<Transaction> {
		let mut tr = enforce_title(&new.doc)?;
		// Coercing a text block keeps its length, so no position moves.
		if new.doc.first().is_some_and(Block::is_textblock) {
			tr.set_selection(new.selection);
		}
		Some(tr)
	}
}

/// Returns true if the selection starts at the end of the title heading.
pub fn is_at_title_end(doc: &Document, selection: Selection) -> bool {
	let Some(ResolvedPos::Inside { index: 0, offset }) = doc.resolve(selection.from()) else {
		return false;
	};
	doc.first().is_some_and(|title| title.is_title() && offset == title.content_len())
}

/// Builds the transaction leaving the title for the body.
///
/// Returns `None` unless the cursor sits at the end of the title heading, in
/// which case the action falls through to the default command.
pub fn move_from_title_to_body(state: &EditorState) -> Option<Transaction> {
	if !is_at_title_end(&state.doc, state.selection) {
		return None;
	}
	match title_exit(&state.doc) {
		Ok(tr) => Some(tr),
		Err(error) => {
			warn!(%error, "title exit repair failed");
			None
		}
	}
}

/// Applies [`move_from_title_to_body`] to a bare document and cursor.
pub fn confirm_from_title(doc: &Document, selection: Selection) -> Option<(Document, Selection)> {
	let state = EditorState {
		doc: doc.clone(),
		selection,
		focused: false,
	};
	let tr = move_from_title_to_body(&state)?;
	let selection = tr.selection_after(selection);
	Some((tr.into_doc(), selection))
}

fn title_exit(doc: &Document) -> Result<Transaction, StepError> {
	const SEPARATOR: usize = 1;
	const BODY: usize = SEPARATOR + 1;

	let mut tr = Transaction::new(doc);
	tr.set_origin(Origin::Plugin(PLUGIN_NAME));

	let fresh = !tr.doc().get(SEPARATOR).is_some_and(Block::is_separator);
	if fresh {
		tr.insert_block(SEPARATOR, Block::separator())?;
	} else {
		let extra = tr.doc().blocks()[BODY..].iter().take_while(|b| b.is_separator()).count();
		if extra > 0 {
			debug!(extra, "collapsing duplicate separators after title");
			tr.delete_blocks(BODY, BODY + extra)?;
		}
	}

	// A freshly placed separator always opens a new paragraph. An existing one
	// reuses the paragraph after it.
	let needs_paragraph = match tr.doc().get(BODY) {
		Some(next) if next.is_paragraph() => fresh,
		_ => true,
	};
	if needs_paragraph {
		tr.insert_block(BODY, Block::empty_paragraph())?;
	}

	let cursor = Selection::near(tr.doc(), tr.doc().block_start(BODY) + 1);
	trace!(fresh, needs_paragraph, cursor = cursor.head, "leaving title");
	tr.set_selection(cursor).focus();
	Ok(tr)
}

/// Builds the transaction restoring a title heading at the top of `doc`.
///
/// Returns `None` when the first block already is a rank-1 heading.
pub fn enforce_title(doc: &Document) -> Option<Transaction> {
	let mut tr = Transaction::new(doc);
	tr.set_origin(Origin::Plugin(PLUGIN_NAME));

	let result = match doc.first() {
		Some(first) if first.is_title() => return None,
		Some(first) => {
			debug!(kind = first.kind.name(), "coercing first block into title");
			tr.replace_block(0, Block::title(first.text_content())).map(|_| ())
		}
		None => {
			debug!("bootstrapping empty document with a title");
			tr.insert_block(0, Block::title("")).map(|_| ())
		}
	};

	match result {
		Ok(()) => Some(tr),
		Err(error) => {
			warn!(%error, "title repair failed");
			None
		}
	}
}

/// Returns `doc` with a title heading at the top.
///
/// Running it on its own output changes nothing.
pub fn repair(doc: Document) -> Document {
	match enforce_title(&doc) {
		Some(tr) => tr.into_doc(),
		None => doc,
	}
}
