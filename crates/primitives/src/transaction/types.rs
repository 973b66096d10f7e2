use crate::document::{Document, Pos, ResolvedPos};
use crate::error::StepError;
use crate::mark::{Mark, Marks};
use crate::node::{Block, BlockKind};

/// Bias determines how positions at change boundaries are mapped.
///
/// When mapping a position through a change, bias determines whether the position
/// moves with insertions or stays before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// Position stays before insertions at the same location.
	Left,
	/// Position moves after insertions at the same location.
	Right,
}

/// Records that `old_size` positions starting at `pos` were replaced by
/// `new_size` positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepMap {
	/// Start of the replaced region.
	pub pos: Pos,
	/// Size of the region before the step.
	pub old_size: usize,
	/// Size of the region after the step.
	pub new_size: usize,
}

impl StepMap {
	/// A map that leaves every position unchanged.
	pub const IDENTITY: Self = Self {
		pos: 0,
		old_size: 0,
		new_size: 0,
	};

	/// Creates a map for a replaced region.
	pub fn new(pos: Pos, old_size: usize, new_size: usize) -> Self {
		Self { pos, old_size, new_size }
	}

	/// Maps a position from before the step to after it.
	pub fn map(&self, p: Pos, bias: Bias) -> Pos {
		let end = self.pos + self.old_size;
		if p < self.pos || (self.old_size == 0 && self.new_size == 0) {
			return p;
		}
		if p > end || (p == end && self.old_size > 0) {
			return p - self.old_size + self.new_size;
		}
		match bias {
			Bias::Left => self.pos,
			Bias::Right => self.pos + self.new_size,
		}
	}
}

/// Where a transaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
	/// Typed text or a key press handled by a default command.
	#[default]
	Input,
	/// A named editor command.
	Command,
	/// A plugin hook, identified by plugin name.
	Plugin(&'static str),
	/// Undo or redo.
	History,
	/// Content loaded into the session.
	Load,
}

/// A single structural edit.
///
/// Steps validate their arguments before touching the document, so a failed
/// step leaves it unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	/// Replace blocks `[start, end)` with `blocks`. Covers insertion and removal.
	ReplaceBlocks {
		/// First block index replaced.
		start: usize,
		/// End block index (exclusive).
		end: usize,
		/// Replacement blocks.
		blocks: Vec<Block>,
	},
	/// Insert text at a position inside a text block.
	InsertText {
		/// Insertion position.
		pos: Pos,
		/// Text to insert.
		text: String,
		/// Marks applied to the inserted text.
		marks: Marks,
	},
	/// Delete text between two positions of the same text block.
	DeleteText {
		/// Start of the range.
		from: Pos,
		/// End of the range.
		to: Pos,
	},
	/// Split a text block at a position. The new block takes `kind`, or the
	/// kind of the split block when `None`.
	Split {
		/// Split position.
		pos: Pos,
		/// Kind of the block created after the split.
		kind: Option<BlockKind>,
	},
	/// Append the content of text block `index` to the text block before it.
	Join {
		/// Index of the block merged away.
		index: usize,
	},
	/// Change the kind of a block, keeping its content.
	SetKind {
		/// Block index.
		index: usize,
		/// New kind.
		kind: BlockKind,
	},
	/// Add or remove a mark over a text range within one block.
	SetMark {
		/// Start of the range.
		from: Pos,
		/// End of the range.
		to: Pos,
		/// The mark.
		mark: Mark,
		/// Whether the mark is added.
		on: bool,
	},
	/// Point a text range within one block at `href`, or unlink it.
	SetLink {
		/// Start of the range.
		from: Pos,
		/// End of the range.
		to: Pos,
		/// Link target; `None` removes the link.
		href: Option<String>,
	},
}

impl Step {
	/// Applies this step to `doc`, returning how positions moved.
	pub fn apply(&self, doc: &mut Document) -> Result<StepMap, StepError> {
		match self {
			Step::ReplaceBlocks { start, end, blocks } => {
				let (start, end) = (*start, *end);
				if start > end || end > doc.len() {
					return Err(StepError::BlockRange { start, end, len: doc.len() });
				}
				let pos = doc.block_start(start);
				let old_size = doc.blocks()[start..end].iter().map(Block::node_size).sum();
				let new_size = blocks.iter().map(Block::node_size).sum();
				doc.blocks_mut().splice(start..end, blocks.iter().cloned());
				Ok(StepMap::new(pos, old_size, new_size))
			}
			Step::InsertText { pos, text, marks } => {
				let (index, offset) = inside(doc, *pos)?;
				doc.blocks_mut()[index].insert_text(offset, text, *marks);
				Ok(StepMap::new(*pos, 0, text.chars().count()))
			}
			Step::DeleteText { from, to } => {
				let (index, lo, hi) = inside_range(doc, *from, *to)?;
				doc.blocks_mut()[index].delete_text(lo, hi);
				Ok(StepMap::new(*from, to - from, 0))
			}
			Step::Split { pos, kind } => {
				let (index, offset) = inside(doc, *pos)?;
				if kind.as_ref().is_some_and(BlockKind::is_leaf) {
					return Err(StepError::KindMismatch { index });
				}
				let blocks = doc.blocks_mut();
				let right = blocks[index].split_off(offset);
				let kind = kind.clone().unwrap_or_else(|| blocks[index].kind.clone());
				blocks.insert(index + 1, Block::new(kind, right));
				Ok(StepMap::new(*pos, 0, 2))
			}
			Step::Join { index } => {
				let index = *index;
				let joinable = index > 0
					&& index < doc.len()
					&& doc.blocks()[index - 1].is_textblock()
					&& doc.blocks()[index].is_textblock();
				if !joinable {
					return Err(StepError::CannotJoin { index });
				}
				let pos = doc.block_start(index) - 1;
				let blocks = doc.blocks_mut();
				let content = blocks.remove(index).take_content();
				blocks[index - 1].append(content);
				Ok(StepMap::new(pos, 2, 0))
			}
			Step::SetKind { index, kind } => {
				let index = *index;
				let Some(block) = doc.get(index) else {
					return Err(StepError::BlockRange {
						start: index,
						end: index + 1,
						len: doc.len(),
					});
				};
				if block.is_leaf() != kind.is_leaf() {
					return Err(StepError::KindMismatch { index });
				}
				doc.blocks_mut()[index].kind = kind.clone();
				Ok(StepMap::IDENTITY)
			}
			Step::SetMark { from, to, mark, on } => {
				let (index, lo, hi) = inside_range(doc, *from, *to)?;
				doc.blocks_mut()[index].set_mark(lo, hi, *mark, *on);
				Ok(StepMap::IDENTITY)
			}
			Step::SetLink { from, to, href } => {
				let (index, lo, hi) = inside_range(doc, *from, *to)?;
				doc.blocks_mut()[index].set_link(lo, hi, href.as_deref());
				Ok(StepMap::IDENTITY)
			}
		}
	}
}

fn inside(doc: &Document, pos: Pos) -> Result<(usize, usize), StepError> {
	match doc.resolve(pos) {
		Some(ResolvedPos::Inside { index, offset }) => Ok((index, offset)),
		_ => Err(StepError::NotInTextblock { pos }),
	}
}

fn inside_range(doc: &Document, from: Pos, to: Pos) -> Result<(usize, usize, usize), StepError> {
	let (index, lo) = inside(doc, from)?;
	let (end_index, hi) = inside(doc, to)?;
	if index != end_index || from > to {
		return Err(StepError::CrossesBlocks { from, to });
	}
	Ok((index, lo, hi))
}
