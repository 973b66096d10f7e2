//! Errors raised when a step cannot be applied to a document.

use thiserror::Error;

use crate::document::Pos;

/// A step referenced positions or blocks that do not fit the document.
///
/// Steps validate before mutating, so a failed step leaves the document untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
	/// A block index range is outside the document.
	#[error("block range {start}..{end} out of bounds for {len} blocks")]
	BlockRange {
		/// First block index of the range.
		start: usize,
		/// End block index of the range (exclusive).
		end: usize,
		/// Number of blocks in the document.
		len: usize,
	},

	/// A text step targeted a position outside any text block.
	#[error("position {pos} is not inside a text block")]
	NotInTextblock {
		/// The offending position.
		pos: Pos,
	},

	/// A text range starts and ends in different blocks.
	#[error("range {from}..{to} spans more than one block")]
	CrossesBlocks {
		/// Start of the range.
		from: Pos,
		/// End of the range.
		to: Pos,
	},

	/// Two blocks that cannot share content were asked to join.
	#[error("block {index} cannot be joined with its predecessor")]
	CannotJoin {
		/// Index of the block that would be merged away.
		index: usize,
	},

	/// A block kind change would turn a leaf block into a text block or back.
	#[error("block {index} cannot change between leaf and text kinds")]
	KindMismatch {
		/// Index of the block.
		index: usize,
	},
}
