//! Immutable editor state snapshots.

use folio_primitives::{Block, Document, Selection, Transaction};

/// The document, cursor, and focus flag of an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorState {
	/// Current document.
	pub doc: Document,
	/// Current selection.
	pub selection: Selection,
	/// Whether the editing surface holds input focus.
	pub focused: bool,
}

impl EditorState {
	/// Creates a state over `doc` with the cursor at the first text position.
	pub fn new(doc: Document) -> Self {
		let selection = Selection::near(&doc, 0);
		Self {
			doc,
			selection,
			focused: false,
		}
	}

	/// The blank post a session starts with: an empty title and an empty paragraph.
	pub fn blank() -> Self {
		Self::new(Document::from_blocks([Block::title(""), Block::empty_paragraph()]))
	}

	/// Returns the state produced by applying `tr`.
	pub fn apply(&self, tr: &Transaction) -> Self {
		Self {
			doc: tr.doc().clone(),
			selection: tr.selection_after(self.selection),
			focused: self.focused || tr.wants_focus(),
		}
	}

	/// Starts a transaction over the current document.
	pub fn tr(&self) -> Transaction {
		Transaction::new(&self.doc)
	}
}
