//! Block documents and positional addressing.
//!
//! Positions count tokens across the flat block array: a leaf block occupies
//! one position, a text block occupies an opening token, one position per
//! character, and a closing token. Position `p` inside text block `i` at
//! character offset `o` is `block_start(i) + 1 + o`.

use serde::{Deserialize, Serialize};

use crate::node::Block;


/// A position in the document token stream.
pub type Pos = usize;

/// A position resolved against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedPos {
	/// Between blocks, directly before block `index` (`index == len` is the end).
	Boundary {
		/// Index of the block following the position.
		index: usize,
	},
	/// Inside the content of text block `index`.
	Inside {
		/// Block index.
		index: usize,
		/// Character offset within the block content.
		offset: usize,
	},
}

impl ResolvedPos {
	/// Returns the block index for positions inside a text block.
	pub fn block_index(&self) -> Option<usize> {
		match *self {
			ResolvedPos::Inside { index, .. } => Some(index),
			ResolvedPos::Boundary { .. } => None,
		}
	}
}

/// An ordered array of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
	blocks: Vec<Block>,
}

impl Document {
	/// Creates an empty document.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a document from blocks.
	pub fn from_blocks(blocks: impl IntoIterator<Item = Block>) -> Self {
		Self {
			blocks: blocks.into_iter().collect(),
		}
	}

	/// Returns all blocks.
	pub fn blocks(&self) -> &[Block] {
		&self.blocks
	}

	/// Consumes the document, returning its blocks.
	pub fn into_blocks(self) -> Vec<Block> {
		self.blocks
	}

	/// Number of blocks.
	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	/// Returns true if the document has no blocks.
	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}

	/// First block, if any.
	pub fn first(&self) -> Option<&Block> {
		self.blocks.first()
	}

	/// Block at `index`, if any.
	pub fn get(&self, index: usize) -> Option<&Block> {
		self.blocks.get(index)
	}

	/// Total number of positions in the document.
	pub fn content_size(&self) -> usize {
		self.blocks.iter().map(Block::node_size).sum()
	}

	/// Position directly before block `index`.
	///
	/// `index` may equal [`len`](Self::len), yielding the end of the document.
	/// Indices past the end clamp to the end.
	pub fn block_start(&self, index: usize) -> Pos {
		self.blocks.iter().take(index).map(Block::node_size).sum()
	}

	/// Position directly after block `index`.
	pub fn pos_after(&self, index: usize) -> Pos {
		self.block_start(index + 1)
	}

	/// Position of character offset 0 inside block `index`.
	///
	/// Returns `None` for leaf blocks and missing indices.
	pub fn content_start(&self, index: usize) -> Option<Pos> {
		let block = self.blocks.get(index)?;
		block.is_textblock().then(|| self.block_start(index) + 1)
	}

	/// Position at the end of the content of block `index`.
	pub fn content_end(&self, index: usize) -> Option<Pos> {
		let start = self.content_start(index)?;
		Some(start + self.blocks[index].content_len())
	}

	/// Index of the block starting exactly at `pos`.
	pub fn block_at_boundary(&self, pos: Pos) -> Option<usize> {
		match self.resolve(pos)? {
			ResolvedPos::Boundary { index } if index < self.blocks.len() => Some(index),
			_ => None,
		}
	}

	/// Resolves `pos` to a block boundary or a text offset.
	///
	/// Returns `None` if `pos` is past the end of the document.
	pub fn resolve(&self, pos: Pos) -> Option<ResolvedPos> {
		let mut start = 0;
		for (index, block) in self.blocks.iter().enumerate() {
			if pos == start {
				return Some(ResolvedPos::Boundary { index });
			}
			let end = start + block.node_size();
			if pos < end {
				return block.is_textblock().then_some(ResolvedPos::Inside {
					index,
					offset: pos - start - 1,
				});
			}
			start = end;
		}
		(pos == start).then_some(ResolvedPos::Boundary {
			index: self.blocks.len(),
		})
	}

	/// Plain text between two positions, with blocks separated by `\n`.
	pub fn text_between(&self, from: Pos, to: Pos) -> String {
		let mut out = String::new();
		let mut start = 0;
		for block in &self.blocks {
			let size = block.node_size();
			let end = start + size;
			if end > from && start < to && block.is_textblock() {
				let lo = from.saturating_sub(start + 1);
				let hi = (to.min(end - 1)).saturating_sub(start + 1);
				if !out.is_empty() {
					out.push('\n');
				}
				out.extend(block.text_content().chars().skip(lo).take(hi.saturating_sub(lo)));
			}
			start = end;
		}
		out
	}

	pub(crate) fn blocks_mut(&mut self) -> &mut Vec<Block> {
		&mut self.blocks
	}
}

impl FromIterator<Block> for Document {
	fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
		Self::from_blocks(iter)
	}
}
