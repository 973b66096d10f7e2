//! Undo/redo history.
//!
//! Each committed transaction group stores a [`Snapshot`] of the state it
//! replaced.

use std::collections::VecDeque;

use folio_primitives::{Document, Selection};
use tracing::trace;

use crate::state::EditorState;

/// Document and selection at one point in history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
	/// Document content.
	pub doc: Document,
	/// Selection to restore with the content.
	pub selection: Selection,
}

impl Snapshot {
	/// Captures the document and selection of `state`.
	pub fn of(state: &EditorState) -> Self {
		Self {
			doc: state.doc.clone(),
			selection: state.selection,
		}
	}
}

/// Bounded undo and redo stacks.
#[derive(Debug, Clone, Default)]
pub struct History {
	undo: VecDeque<Snapshot>,
	redo: Vec<Snapshot>,
	depth: usize,
}

impl History {
	/// Creates a history keeping at most `depth` undo steps. Zero disables it.
	pub fn new(depth: usize) -> Self {
		Self {
			undo: VecDeque::new(),
			redo: Vec::new(),
			depth,
		}
	}

	/// Records the state replaced by a new edit. Clears the redo stack.
	pub fn record(&mut self, before: Snapshot) {
		self.redo.clear();
		if self.depth == 0 {
			return;
		}
		self.undo.push_back(before);
		if self.undo.len() > self.depth {
			self.undo.pop_front();
			trace!(depth = self.depth, "dropped oldest undo step");
		}
	}

	/// Pops the last undo step, pushing `current` onto the redo stack.
	pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
		let previous = self.undo.pop_back()?;
		self.redo.push(current);
		Some(previous)
	}

	/// Pops the last redo step, pushing `current` back onto the undo stack.
	pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
		let next = self.redo.pop()?;
		self.undo.push_back(current);
		Some(next)
	}

	pub fn can_undo(&self) -> bool {
		!self.undo.is_empty()
	}

	pub fn can_redo(&self) -> bool {
		!self.redo.is_empty()
	}

	/// Number of undo steps available.
	pub fn undo_len(&self) -> usize {
		self.undo.len()
	}

	/// Drops every recorded step.
	pub fn clear(&mut self) {
		self.undo.clear();
		self.redo.clear();
	}
}
