//! Markdown shortcuts applied while typing.
//!
//! When the text typed at the start of a paragraph or heading completes one of
//! the patterns below, the typed marker is removed and the block changes kind:
//!
//! | Typed           | Result                 |
//! |-----------------|------------------------|
//! | `# ` .. `###### ` | heading of that rank |
//! | `- ` or `* `    | bullet list item       |
//! | `1. `           | ordered list item      |
//! | `> `            | blockquote             |
//! | ```` ```lang ```` + space | code block   |
//! | `---`           | separator              |

use std::sync::LazyLock;

use folio_primitives::{Block, BlockKind, Origin, ResolvedPos, Selection, StepError, Transaction};
use regex::Regex;
use tracing::{debug, warn};

use crate::plugin::Plugin;
use crate::state::EditorState;

/// Name used as the origin of input rule transactions.
pub const PLUGIN_NAME: &str = "input_rules";

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6}) $").expect("valid input rule"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-*] $").expect("valid input rule"));
static ORDERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\. $").expect("valid input rule"));
static QUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^> $").expect("valid input rule"));
static FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```([A-Za-z0-9_+-]*) $").expect("valid input rule"));

/// What a matched rule turns the block into.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
	Kind(BlockKind),
	Separator,
}

/// Plugin applying Markdown shortcuts.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputRules;

impl Plugin for InputRules {
	fn name(&self) -> &'static str {
		PLUGIN_NAME
	}

	fn handle_text_input(&self, state: &EditorState, text: &str) -> Option<Transaction> {
		if !state.selection.is_point() {
			return None;
		}
		let pos = state.selection.head;
		let Some(ResolvedPos::Inside { index, offset }) = state.doc.resolve(pos) else {
			return None;
		};
		let block = &state.doc.blocks()[index];
		if !matches!(block.kind, BlockKind::Paragraph | BlockKind::Heading { .. }) {
			return None;
		}

		let before: String = block.text_content().chars().take(offset).collect();
		let typed = before + text;
		let rule = match_rule(&typed)?;
		let at_end = offset == block.content_len();

		match apply_rule(state, index, rule, at_end) {
			Ok(tr) => {
				debug!(index, typed = %typed, "input rule matched");
				tr
			}
			Err(error) => {
				warn!(%error, "input rule failed");
				None
			}
		}
	}
}

fn match_rule(typed: &str) -> Option<Rule> {
	if let Some(caps) = HEADING.captures(typed) {
		let level = u8::try_from(caps[1].len()).ok()?;
		return Some(Rule::Kind(BlockKind::Heading { level }));
	}
	if BULLET.is_match(typed) {
		return Some(Rule::Kind(BlockKind::ListItem { ordered: false }));
	}
	if ORDERED.is_match(typed) {
		return Some(Rule::Kind(BlockKind::ListItem { ordered: true }));
	}
	if QUOTE.is_match(typed) {
		return Some(Rule::Kind(BlockKind::Blockquote));
	}
	if let Some(caps) = FENCE.captures(typed) {
		let language = Some(caps[1].to_string()).filter(|l| !l.is_empty());
		return Some(Rule::Kind(BlockKind::CodeBlock { language }));
	}
	(typed == "---").then_some(Rule::Separator)
}

fn apply_rule(state: &EditorState, index: usize, rule: Rule, at_end: bool) -> Result<Option<Transaction>, StepError> {
	let doc = &state.doc;
	let start = doc.content_start(index).ok_or(StepError::NotInTextblock {
		pos: state.selection.head,
	})?;

	let mut tr = state.tr();
	tr.set_origin(Origin::Plugin(PLUGIN_NAME));

	match rule {
		Rule::Kind(kind) => {
			tr.delete_text(start, state.selection.head)?;
			if doc.blocks()[index].kind == kind {
				return Ok(Some(tr));
			}
			tr.set_kind(index, kind)?;
			tr.set_selection(Selection::point(start));
		}
		// A separator only replaces a block holding nothing but the marker.
		Rule::Separator if at_end => {
			tr.replace_block(index, Block::separator())?;
			if !tr.doc().get(index + 1).is_some_and(Block::is_textblock) {
				tr.insert_block(index + 1, Block::empty_paragraph())?;
			}
			let cursor = Selection::near(tr.doc(), tr.doc().block_start(index + 1) + 1);
			tr.set_selection(cursor);
		}
		Rule::Separator => return Ok(None),
	}
	Ok(Some(tr))
}

#[cfg(test)]
mod tests {
	use folio_primitives::Document;
	use pretty_assertions::assert_eq;

	use super::*;

	fn typed(blocks: Vec<Block>, cursor: usize, text: &str) -> Option<EditorState> {
		let state = EditorState {
			doc: Document::from_blocks(blocks),
			selection: Selection::point(cursor),
			focused: false,
		};
		InputRules.handle_text_input(&state, text).map(|tr| state.apply(&tr))
	}

	#[test]
	fn hash_space_makes_heading() {
		let next = typed(vec![Block::paragraph("##")], 3, " ").unwrap();
		assert_eq!(next.doc.blocks(), &[Block::heading(2, "")]);
		assert_eq!(next.selection, Selection::point(1));
	}

	#[test]
	fn heading_rule_keeps_trailing_text() {
		// "#Title" with the cursor after '#'.
		let next = typed(vec![Block::paragraph("#Title")], 2, " ").unwrap();
		assert_eq!(next.doc.blocks(), &[Block::heading(1, "Title")]);
	}

	#[test]
	fn list_and_quote_rules() {
		let bullet = typed(vec![Block::paragraph("-")], 2, " ").unwrap();
		assert_eq!(bullet.doc.blocks(), &[Block::list_item(false, "")]);

		let star = typed(vec![Block::paragraph("*")], 2, " ").unwrap();
		assert_eq!(star.doc.blocks(), &[Block::list_item(false, "")]);

		let ordered = typed(vec![Block::paragraph("12.")], 4, " ").unwrap();
		assert_eq!(ordered.doc.blocks(), &[Block::list_item(true, "")]);

		let quote = typed(vec![Block::paragraph(">")], 2, " ").unwrap();
		assert_eq!(quote.doc.blocks(), &[Block::blockquote("")]);
	}

	#[test]
	fn fence_rule_reads_language() {
		let next = typed(vec![Block::paragraph("```rust")], 8, " ").unwrap();
		assert_eq!(next.doc.blocks(), &[Block::code_block(Some("rust".into()), "")]);

		let bare = typed(vec![Block::paragraph("```")], 4, " ").unwrap();
		assert_eq!(bare.doc.blocks(), &[Block::code_block(None, "")]);
	}

	#[test]
	fn dashes_become_separator() {
		let next = typed(vec![Block::title("T"), Block::paragraph("--")], 6, "-").unwrap();
		assert_eq!(
			next.doc.blocks(),
			&[Block::title("T"), Block::separator(), Block::empty_paragraph()]
		);
		assert_eq!(next.doc.resolve(next.selection.head), Some(ResolvedPos::Inside { index: 2, offset: 0 }));
	}

	#[test]
	fn dashes_before_text_do_not_match() {
		assert!(typed(vec![Block::paragraph("--x")], 3, "-").is_none());
	}

	#[test]
	fn rules_need_marker_at_block_start() {
		assert!(typed(vec![Block::paragraph("a #")], 4, " ").is_none());
		assert!(typed(vec![Block::paragraph("#")], 2, "x").is_none());
	}

	#[test]
	fn rules_skip_code_and_lists() {
		assert!(typed(vec![Block::code_block(None, "#")], 2, " ").is_none());
		assert!(typed(vec![Block::list_item(false, "#")], 2, " ").is_none());
	}

	#[test]
	fn same_kind_only_strips_marker() {
		let next = typed(vec![Block::heading(2, "##")], 3, " ").unwrap();
		assert_eq!(next.doc.blocks(), &[Block::heading(2, "")]);
	}
}
