//! Default editing commands.
//!
//! These run when no plugin claims an action. Each command inspects the state
//! and builds a transaction, or returns `None` when the action does not apply
//! (for example moving right at the very end of the document).

use folio_primitives::{Block, BlockKind, Mark, Marks, Origin, Pos, ResolvedPos, Selection, StepError, Transaction};
use tracing::{debug, warn};

use crate::action::Action;
use crate::state::EditorState;


/// Builds the default transaction for `action`.
///
/// History actions are handled by the session and always return `None` here.
pub fn run(state: &EditorState, action: Action) -> Option<Transaction> {
	let result = match action {
		Action::InsertNewline => insert_newline(state),
		Action::MoveLeft => Ok(move_horizontal(state, false)),
		Action::MoveRight => Ok(move_horizontal(state, true)),
		Action::MoveUp => Ok(move_vertical(state, false)),
		Action::MoveDown => Ok(move_vertical(state, true)),
		Action::DeleteBackward => delete_backward(state),
		Action::Undo | Action::Redo => Ok(None),
		Action::ToggleBold => toggle_mark(state, Mark::Bold),
		Action::ToggleItalic => toggle_mark(state, Mark::Italic),
		Action::ToggleStrike => toggle_mark(state, Mark::Strike),
		Action::ToggleCode => toggle_mark(state, Mark::Code),
		Action::Heading1 => toggle_block_kind(state, BlockKind::Heading { level: 1 }),
		Action::Heading2 => toggle_block_kind(state, BlockKind::Heading { level: 2 }),
		Action::Heading3 => toggle_block_kind(state, BlockKind::Heading { level: 3 }),
		Action::Paragraph => toggle_block_kind(state, BlockKind::Paragraph),
		Action::BulletList => toggle_block_kind(state, BlockKind::ListItem { ordered: false }),
		Action::OrderedList => toggle_block_kind(state, BlockKind::ListItem { ordered: true }),
		Action::Blockquote => toggle_block_kind(state, BlockKind::Blockquote),
		Action::CodeBlock => toggle_block_kind(state, BlockKind::CodeBlock { language: None }),
		Action::InsertSeparator => insert_separator(state),
	};

	match result {
		Ok(tr) => tr,
		Err(error) => {
			warn!(%action, %error, "command failed");
			None
		}
	}
}

/// Inserts `text` at the cursor, replacing any selection.
///
/// Typed text inherits the marks of the character before the cursor.
pub fn insert_text(state: &EditorState, text: &str) -> Option<Transaction> {
	if text.is_empty() {
		return None;
	}
	let build = || -> Result<Option<Transaction>, StepError> {
		let mut tr = state.tr();
		let pos = delete_selection(&mut tr, state.selection)?;
		let Some(ResolvedPos::Inside { index, offset }) = tr.doc().resolve(pos) else {
			return Ok(None);
		};
		let marks = tr.doc().blocks()[index].marks_at(offset);
		tr.insert_text(pos, text, marks)?;
		tr.set_selection(Selection::point(pos + text.chars().count()));
		Ok(Some(tr))
	};
	build().unwrap_or_else(|error| {
		warn!(%error, "text insertion failed");
		None
	})
}

/// Links the selected text to `href`, or unlinks it when `href` is `None`.
///
/// A blank target also unlinks. Returns `None` without a range selection.
pub fn set_link(state: &EditorState, href: Option<&str>) -> Option<Transaction> {
	let href = href.map(str::trim).filter(|h| !h.is_empty());
	let spans = selected_ranges(state);
	if spans.is_empty() {
		return None;
	}
	let build = || -> Result<Transaction, StepError> {
		let mut tr = state.tr();
		tr.set_origin(Origin::Command);
		for &(from, to) in &spans {
			tr.set_link(from, to, href)?;
		}
		tr.set_selection(state.selection);
		Ok(tr)
	};
	match build() {
		Ok(tr) => {
			debug!(ranges = spans.len(), linked = href.is_some(), "set link");
			Some(tr)
		}
		Err(error) => {
			warn!(%error, "setting link failed");
			None
		}
	}
}

/// Inserts an image block at the cursor, replacing any selection.
///
/// An empty body paragraph is replaced by the image. A cursor inside text
/// splits the block around the image; the title is never split. The cursor
/// ends in the text block after the image, which is created when missing.
pub fn insert_image(state: &EditorState, src: &str, alt: &str) -> Option<Transaction> {
	let src = src.trim();
	if src.is_empty() {
		return None;
	}
	let build = || -> Result<Option<Transaction>, StepError> {
		let mut tr = state.tr();
		tr.set_origin(Origin::Command);
		let pos = delete_selection(&mut tr, state.selection)?;
		let Some(ResolvedPos::Inside { index, offset }) = tr.doc().resolve(pos) else {
			return Ok(None);
		};
		let block = &tr.doc().blocks()[index];
		let len = block.content_len();
		let replace = index > 0 && block.is_paragraph() && len == 0;
		let image = Block::image(src, alt);

		let split = index > 0 && offset > 0 && offset < len;
		let at = if replace || (index > 0 && offset == 0) { index } else { index + 1 };
		if replace {
			tr.replace_block(index, image)?;
		} else {
			if split {
				tr.split(pos, None)?;
			}
			tr.insert_block(at, image)?;
		}
		if !tr.doc().get(at + 1).is_some_and(Block::is_textblock) {
			tr.insert_block(at + 1, Block::empty_paragraph())?;
		}
		let cursor = Selection::near(tr.doc(), tr.doc().block_start(at + 1) + 1);
		tr.set_selection(cursor);
		Ok(Some(tr))
	};
	build().unwrap_or_else(|error| {
		warn!(%error, "image insertion failed");
		None
	})
}

/// Deletes the selected range and returns the collapsed cursor position.
///
/// A range spanning blocks removes the blocks in between and joins the two
/// ends, provided both ends are text blocks.
fn delete_selection(tr: &mut Transaction, selection: Selection) -> Result<Pos, StepError> {
	let (from, to) = (selection.from(), selection.to());
	if from == to {
		return Ok(from);
	}

	let resolved = (tr.doc().resolve(from), tr.doc().resolve(to));
	let (Some(ResolvedPos::Inside { index: first, .. }), Some(ResolvedPos::Inside { index: last, .. })) = resolved else {
		return Err(StepError::CrossesBlocks { from, to });
	};

	if first == last {
		tr.delete_text(from, to)?;
		return Ok(from);
	}

	// Trim the tail block first so the head positions stay valid.
	let last_start = tr.doc().content_start(last).ok_or(StepError::NotInTextblock { pos: to })?;
	tr.delete_text(last_start, to)?;
	let first_end = tr.doc().content_end(first).ok_or(StepError::NotInTextblock { pos: from })?;
	tr.delete_text(from, first_end)?;
	tr.delete_blocks(first + 1, last)?;
	tr.join(first + 1)?;
	Ok(from)
}

fn insert_newline(state: &EditorState) -> Result<Option<Transaction>, StepError> {
	let mut tr = state.tr();
	tr.set_origin(Origin::Command);
	let pos = delete_selection(&mut tr, state.selection)?;
	let Some(ResolvedPos::Inside { index, offset }) = tr.doc().resolve(pos) else {
		return Ok(None);
	};
	let block = &tr.doc().blocks()[index];
	let (kind, len) = (block.kind.clone(), block.content_len());
	let at_end = offset == len;

	match kind {
		BlockKind::CodeBlock { .. } => {
			tr.insert_text(pos, "\n", Marks::empty())?;
			tr.set_selection(Selection::point(pos + 1));
		}
		BlockKind::ListItem { .. } | BlockKind::Blockquote if len == 0 => {
			tr.set_kind(index, BlockKind::Paragraph)?;
		}
		BlockKind::Heading { .. } if at_end => {
			tr.split(pos, Some(BlockKind::Paragraph))?;
			tr.set_selection(Selection::point(pos + 2));
		}
		_ => {
			tr.split(pos, None)?;
			tr.set_selection(Selection::point(pos + 2));
		}
	}
	Ok(Some(tr))
}

fn cursor_move(state: &EditorState, target: Option<Pos>) -> Option<Transaction> {
	let target = target?;
	let mut tr = state.tr();
	tr.set_origin(Origin::Command).without_history().set_selection(Selection::point(target));
	Some(tr)
}

fn move_horizontal(state: &EditorState, forward: bool) -> Option<Transaction> {
	let doc = &state.doc;
	let selection = state.selection;
	if !selection.is_point() {
		let edge = if forward { selection.to() } else { selection.from() };
		return cursor_move(state, Some(edge));
	}

	let Some(ResolvedPos::Inside { index, offset }) = doc.resolve(selection.head) else {
		return None;
	};
	let len = doc.blocks()[index].content_len();
	let target = match (forward, offset) {
		(true, o) if o < len => Some(selection.head + 1),
		(true, _) => (index + 1..doc.len()).find_map(|i| doc.content_start(i)),
		(false, o) if o > 0 => Some(selection.head - 1),
		(false, _) => (0..index).rev().find_map(|i| doc.content_end(i)),
	};
	cursor_move(state, target)
}

fn move_vertical(state: &EditorState, forward: bool) -> Option<Transaction> {
	let doc = &state.doc;
	let Some(ResolvedPos::Inside { index, offset }) = doc.resolve(state.selection.head) else {
		return None;
	};
	let next = if forward {
		(index + 1..doc.len()).find(|&i| doc.blocks()[i].is_textblock())
	} else {
		(0..index).rev().find(|&i| doc.blocks()[i].is_textblock())
	};
	let target = next.and_then(|i| {
		let start = doc.content_start(i)?;
		Some(start + offset.min(doc.blocks()[i].content_len()))
	});
	cursor_move(state, target)
}

fn delete_backward(state: &EditorState) -> Result<Option<Transaction>, StepError> {
	let mut tr = state.tr();
	tr.set_origin(Origin::Command);
	let selection = state.selection;

	if !selection.is_point() {
		let pos = delete_selection(&mut tr, selection)?;
		tr.set_selection(Selection::point(pos));
		return Ok(Some(tr));
	}

	let pos = selection.head;
	let Some(ResolvedPos::Inside { index, offset }) = state.doc.resolve(pos) else {
		return Ok(None);
	};

	if offset > 0 {
		tr.delete_text(pos - 1, pos)?;
		return Ok(Some(tr));
	}
	if index == 0 {
		return Ok(None);
	}

	let current = &state.doc.blocks()[index];
	let previous = &state.doc.blocks()[index - 1];
	if matches!(current.kind, BlockKind::ListItem { .. } | BlockKind::Blockquote) {
		tr.set_kind(index, BlockKind::Paragraph)?;
	} else if previous.is_leaf() {
		tr.delete_blocks(index - 1, index)?;
	} else {
		tr.join(index)?;
	}
	Ok(Some(tr))
}

/// Block indices touched by the selection.
fn selected_blocks(state: &EditorState) -> Option<std::ops::RangeInclusive<usize>> {
	let first = state.doc.resolve(state.selection.from())?.block_index()?;
	let last = state.doc.resolve(state.selection.to())?.block_index()?;
	Some(first..=last)
}

/// The non-empty text ranges of a range selection, one per text block.
fn selected_ranges(state: &EditorState) -> Vec<(Pos, Pos)> {
	let selection = state.selection;
	if selection.is_point() {
		return Vec::new();
	}
	let Some(blocks) = selected_blocks(state) else {
		return Vec::new();
	};
	let doc = &state.doc;
	blocks
		.filter_map(|i| {
			let start = doc.content_start(i)?;
			let end = doc.content_end(i)?;
			Some((selection.from().max(start), selection.to().min(end)))
		})
		.filter(|(from, to)| from < to)
		.collect()
}

fn toggle_mark(state: &EditorState, mark: Mark) -> Result<Option<Transaction>, StepError> {
	let selection = state.selection;
	let spans = selected_ranges(state);
	if spans.is_empty() {
		return Ok(None);
	}

	let doc = &state.doc;
	let covered = spans.iter().all(|&(from, to)| {
		let Some(ResolvedPos::Inside { index, offset }) = doc.resolve(from) else {
			return false;
		};
		doc.blocks()[index].has_mark(offset, offset + (to - from), mark)
	});

	let mut tr = state.tr();
	tr.set_origin(Origin::Command);
	for (from, to) in spans {
		tr.set_mark(from, to, mark, !covered)?;
	}
	tr.set_selection(selection);
	Ok(Some(tr))
}

fn toggle_block_kind(state: &EditorState, kind: BlockKind) -> Result<Option<Transaction>, StepError> {
	let Some(blocks) = selected_blocks(state) else {
		return Ok(None);
	};
	let doc = &state.doc;
	let all_match = blocks.clone().all(|i| doc.blocks()[i].kind == kind);
	let target = if all_match && kind != BlockKind::Paragraph { BlockKind::Paragraph } else { kind };

	let mut tr = state.tr();
	tr.set_origin(Origin::Command);
	for i in blocks.filter(|&i| doc.blocks()[i].is_textblock()) {
		tr.set_kind(i, target.clone())?;
	}
	Ok(Some(tr))
}

fn insert_separator(state: &EditorState) -> Result<Option<Transaction>, StepError> {
	let doc = &state.doc;
	let Some(index) = doc.resolve(state.selection.head).and_then(|r| r.block_index()) else {
		return Ok(None);
	};

	let mut tr = state.tr();
	tr.set_origin(Origin::Command);
	tr.insert_block(index + 1, Block::separator())?;
	if !tr.doc().get(index + 2).is_some_and(Block::is_textblock) {
		tr.insert_block(index + 2, Block::empty_paragraph())?;
	}
	let cursor = Selection::near(tr.doc(), tr.doc().block_start(index + 2) + 1);
	tr.set_selection(cursor);
	Ok(Some(tr))
}
