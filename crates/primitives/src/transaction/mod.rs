//! Atomic document edits.
//!
//! A [`Transaction`] owns a working copy of the document. Every builder call
//! applies its [`Step`] to that copy immediately, so later steps can inspect the
//! intermediate document (the way a repair looks at the block after a freshly
//! inserted separator). Nothing outside the transaction sees the working copy
//! until the caller commits it as a whole.

mod types;


pub use types::{Bias, Origin, Step, StepMap};

use crate::document::{Document, Pos};
use crate::error::StepError;
use crate::mark::{Mark, Marks};
use crate::node::{Block, BlockKind};
use crate::selection::Selection;

/// A sequence of steps over a working copy of a document.
#[derive(Debug, Clone)]
pub struct Transaction {
	doc: Document,
	steps: Vec<Step>,
	maps: Vec<StepMap>,
	selection: Option<Selection>,
	focus: bool,
	origin: Origin,
	add_to_history: bool,
}

impl Transaction {
	/// Starts a transaction over a copy of `doc`.
	pub fn new(doc: &Document) -> Self {
		Self {
			doc: doc.clone(),
			steps: Vec::new(),
			maps: Vec::new(),
			selection: None,
			focus: false,
			origin: Origin::default(),
			add_to_history: true,
		}
	}

	/// Applies `step` to the working document and records it.
	pub fn step(&mut self, step: Step) -> Result<&mut Self, StepError> {
		let map = step.apply(&mut self.doc)?;
		self.steps.push(step);
		self.maps.push(map);
		Ok(self)
	}

	/// Inserts `block` before block `index`.
	pub fn insert_block(&mut self, index: usize, block: Block) -> Result<&mut Self, StepError> {
		self.step(Step::ReplaceBlocks {
			start: index,
			end: index,
			blocks: vec![block],
		})
	}

	/// Removes blocks `[start, end)`.
	pub fn delete_blocks(&mut self, start: usize, end: usize) -> Result<&mut Self, StepError> {
		self.step(Step::ReplaceBlocks {
			start,
			end,
			blocks: Vec::new(),
		})
	}

	/// Replaces block `index` with `block`.
	pub fn replace_block(&mut self, index: usize, block: Block) -> Result<&mut Self, StepError> {
		self.step(Step::ReplaceBlocks {
			start: index,
			end: index + 1,
			blocks: vec![block],
		})
	}

	/// Replaces every block of the document.
	pub fn replace_all(&mut self, blocks: Vec<Block>) -> Result<&mut Self, StepError> {
		let end = self.doc.len();
		self.step(Step::ReplaceBlocks { start: 0, end, blocks })
	}

	/// Inserts text with `marks` at `pos`.
	pub fn insert_text(&mut self, pos: Pos, text: impl Into<String>, marks: Marks) -> Result<&mut Self, StepError> {
		self.step(Step::InsertText {
			pos,
			text: text.into(),
			marks,
		})
	}

	/// Deletes text in `[from, to)` of one text block.
	pub fn delete_text(&mut self, from: Pos, to: Pos) -> Result<&mut Self, StepError> {
		self.step(Step::DeleteText { from, to })
	}

	/// Splits the text block at `pos`.
	pub fn split(&mut self, pos: Pos, kind: Option<BlockKind>) -> Result<&mut Self, StepError> {
		self.step(Step::Split { pos, kind })
	}

	/// Joins block `index` into the block before it.
	pub fn join(&mut self, index: usize) -> Result<&mut Self, StepError> {
		self.step(Step::Join { index })
	}

	/// Changes the kind of block `index`.
	pub fn set_kind(&mut self, index: usize, kind: BlockKind) -> Result<&mut Self, StepError> {
		self.step(Step::SetKind { index, kind })
	}

	/// Adds or removes `mark` over `[from, to)`.
	pub fn set_mark(&mut self, from: Pos, to: Pos, mark: Mark, on: bool) -> Result<&mut Self, StepError> {
		self.step(Step::SetMark { from, to, mark, on })
	}

	/// Links `[from, to)` to `href`, or removes the link when `href` is `None`.
	pub fn set_link(&mut self, from: Pos, to: Pos, href: Option<&str>) -> Result<&mut Self, StepError> {
		self.step(Step::SetLink {
			from,
			to,
			href: href.map(str::to_string),
		})
	}

	/// Sets the selection the transaction leaves behind.
	pub fn set_selection(&mut self, selection: Selection) -> &mut Self {
		self.selection = Some(selection);
		self
	}

	/// Requests input focus for the editing surface.
	pub fn focus(&mut self) -> &mut Self {
		self.focus = true;
		self
	}

	/// Tags the transaction with its origin.
	pub fn set_origin(&mut self, origin: Origin) -> &mut Self {
		self.origin = origin;
		self
	}

	/// Excludes the transaction from undo history.
	pub fn without_history(&mut self) -> &mut Self {
		self.add_to_history = false;
		self
	}

	/// The working document after all steps so far.
	pub fn doc(&self) -> &Document {
		&self.doc
	}

	/// Steps applied so far.
	pub fn steps(&self) -> &[Step] {
		&self.steps
	}

	/// Explicit selection, if one was set.
	pub fn selection(&self) -> Option<Selection> {
		self.selection
	}

	/// Returns true if focus was requested.
	pub fn wants_focus(&self) -> bool {
		self.focus
	}

	/// Origin tag.
	pub fn origin(&self) -> Origin {
		self.origin
	}

	/// Returns true if the transaction should be recorded for undo.
	pub fn adds_to_history(&self) -> bool {
		self.add_to_history
	}

	/// Returns true if any step changed the document.
	pub fn doc_changed(&self) -> bool {
		!self.steps.is_empty()
	}

	/// Maps a position from the starting document through every step.
	pub fn map_pos(&self, pos: Pos, bias: Bias) -> Pos {
		self.maps.iter().fold(pos, |p, map| map.map(p, bias))
	}

	/// Maps a selection from the starting document through every step.
	///
	/// Cursors follow insertions made at their position.
	pub fn map_selection(&self, selection: Selection) -> Selection {
		selection.map(|p| self.map_pos(p, Bias::Right))
	}

	/// Selection after the transaction: the explicit one, or `before` mapped
	/// through the steps, snapped onto a text position of the result.
	pub fn selection_after(&self, before: Selection) -> Selection {
		let selection = self.selection.unwrap_or_else(|| self.map_selection(before));
		selection.snapped(&self.doc)
	}

	/// Consumes the transaction, returning the working document.
	pub fn into_doc(self) -> Document {
		self.doc
	}
}
