//! Block nodes and their inline content.
//!
//! A post is a flat sequence of [`Block`]s. Text blocks carry a run of
//! [`Span`]s; leaf blocks (separators and images) carry no inline content and
//! occupy a single position.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::mark::{Mark, Marks};

#[cfg(test)]
mod tests;

/// Inline content storage. Most blocks hold a single span.
pub type Content = SmallVec<[Span; 1]>;

/// A run of text sharing one set of marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
	/// The text of the run.
	pub text: String,
	/// Marks applied to every character of the run.
	#[serde(default, skip_serializing_if = "Marks::is_empty")]
	pub marks: Marks,
	/// Link target, if the run is part of a link.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub link: Option<String>,
}

impl Span {
	/// Creates an unmarked span.
	pub fn plain(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			marks: Marks::empty(),
			link: None,
		}
	}

	/// Creates a span with the given marks.
	pub fn marked(text: impl Into<String>, marks: Marks) -> Self {
		Self {
			text: text.into(),
			marks,
			link: None,
		}
	}

	/// Returns this span with a link target.
	pub fn with_link(mut self, href: impl Into<String>) -> Self {
		self.link = Some(href.into());
		self
	}

	/// Returns the length in characters.
	pub fn char_len(&self) -> usize {
		self.text.chars().count()
	}

	fn same_format(&self, other: &Span) -> bool {
		self.marks == other.marks && self.link == other.link
	}
}

/// The type of a block and its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
	/// Heading with a rank from 1 to 6.
	Heading {
		/// Heading rank.
		level: u8,
	},
	/// Plain paragraph.
	Paragraph,
	/// Content-free horizontal rule.
	Separator,
	/// Preformatted code.
	CodeBlock {
		/// Fence info string.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		language: Option<String>,
	},
	/// Quoted paragraph.
	Blockquote,
	/// One item of a bullet or ordered list.
	ListItem {
		/// Whether the item belongs to a numbered list.
		ordered: bool,
	},
	/// Standalone image.
	Image {
		/// Image source URL.
		src: String,
		/// Alternative text.
		#[serde(default)]
		alt: String,
	},
}

impl BlockKind {
	/// Returns true for blocks without inline content.
	pub fn is_leaf(&self) -> bool {
		matches!(self, BlockKind::Separator | BlockKind::Image { .. })
	}

	/// Returns true for blocks holding inline content.
	pub fn is_textblock(&self) -> bool {
		!self.is_leaf()
	}

	/// Returns the snake_case name of this kind.
	pub fn name(&self) -> &'static str {
		match self {
			BlockKind::Heading { .. } => "heading",
			BlockKind::Paragraph => "paragraph",
			BlockKind::Separator => "separator",
			BlockKind::CodeBlock { .. } => "code_block",
			BlockKind::Blockquote => "blockquote",
			BlockKind::ListItem { .. } => "list_item",
			BlockKind::Image { .. } => "image",
		}
	}
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
	/// Block type and attributes.
	pub kind: BlockKind,
	/// Inline content; always empty for leaf blocks.
	#[serde(default, skip_serializing_if = "SmallVec::is_empty")]
	content: Content,
}

impl Block {
	/// Creates a block with the given kind and content.
	///
	/// Content passed to a leaf kind is discarded.
	pub fn new(kind: BlockKind, content: impl IntoIterator<Item = Span>) -> Self {
		let mut block = Self {
			content: if kind.is_leaf() { Content::new() } else { content.into_iter().collect() },
			kind,
		};
		block.normalize();
		block
	}

	/// Creates a heading of the given rank holding plain text.
	pub fn heading(level: u8, text: impl Into<String>) -> Self {
		Self::new(BlockKind::Heading { level }, [Span::plain(text)])
	}

	/// Creates a rank-1 title heading holding plain text.
	pub fn title(text: impl Into<String>) -> Self {
		Self::heading(1, text)
	}

	/// Creates a paragraph holding plain text.
	pub fn paragraph(text: impl Into<String>) -> Self {
		Self::new(BlockKind::Paragraph, [Span::plain(text)])
	}

	/// Creates an empty paragraph.
	pub fn empty_paragraph() -> Self {
		Self::new(BlockKind::Paragraph, [])
	}

	/// Creates a separator.
	pub fn separator() -> Self {
		Self::new(BlockKind::Separator, [])
	}

	/// Creates a code block.
	pub fn code_block(language: Option<String>, code: impl Into<String>) -> Self {
		Self::new(BlockKind::CodeBlock { language }, [Span::plain(code)])
	}

	/// Creates a blockquote holding plain text.
	pub fn blockquote(text: impl Into<String>) -> Self {
		Self::new(BlockKind::Blockquote, [Span::plain(text)])
	}

	/// Creates a list item holding plain text.
	pub fn list_item(ordered: bool, text: impl Into<String>) -> Self {
		Self::new(BlockKind::ListItem { ordered }, [Span::plain(text)])
	}

	/// Creates an image block.
	pub fn image(src: impl Into<String>, alt: impl Into<String>) -> Self {
		Self::new(
			BlockKind::Image {
				src: src.into(),
				alt: alt.into(),
			},
			[],
		)
	}

	/// Returns the inline spans.
	pub fn content(&self) -> &[Span] {
		&self.content
	}

	/// Returns true if this block is a heading of rank 1.
	pub fn is_title(&self) -> bool {
		matches!(self.kind, BlockKind::Heading { level: 1 })
	}

	/// Returns true for separators.
	pub fn is_separator(&self) -> bool {
		matches!(self.kind, BlockKind::Separator)
	}

	/// Returns true for paragraphs.
	pub fn is_paragraph(&self) -> bool {
		matches!(self.kind, BlockKind::Paragraph)
	}

	/// Returns true for blocks without inline content.
	pub fn is_leaf(&self) -> bool {
		self.kind.is_leaf()
	}

	/// Returns true for blocks holding inline content.
	pub fn is_textblock(&self) -> bool {
		self.kind.is_textblock()
	}

	/// Concatenated plain text of all spans.
	pub fn text_content(&self) -> String {
		self.content.iter().map(|s| s.text.as_str()).collect()
	}

	/// Length of the inline content in characters.
	pub fn content_len(&self) -> usize {
		self.content.iter().map(Span::char_len).sum()
	}

	/// Number of positions this block occupies in the document.
	///
	/// Leaf blocks take one position; text blocks take their content plus an
	/// opening and a closing token.
	pub fn node_size(&self) -> usize {
		if self.is_leaf() { 1 } else { self.content_len() + 2 }
	}

	/// Marks of the character before `offset`, inherited by text typed there.
	pub fn marks_at(&self, offset: usize) -> Marks {
		let mut seen = 0;
		let mut marks = Marks::empty();
		for span in &self.content {
			if seen >= offset {
				break;
			}
			marks = span.marks;
			seen += span.char_len();
		}
		marks
	}

	/// Returns true if every character in `[from, to)` carries `mark`.
	///
	/// An empty range checks the marks inherited at `from`.
	pub fn has_mark(&self, from: usize, to: usize, mark: Mark) -> bool {
		if from >= to {
			return self.marks_at(from).contains(mark.flag());
		}
		let mut seen = 0;
		for span in &self.content {
			let len = span.char_len();
			let (start, end) = (seen, seen + len);
			seen = end;
			if end <= from || start >= to {
				continue;
			}
			if !span.marks.contains(mark.flag()) {
				return false;
			}
		}
		true
	}

	/// Inserts `text` with `marks` at character `offset`.
	pub(crate) fn insert_text(&mut self, offset: usize, text: &str, marks: Marks) {
		let right = split_content(&mut self.content, offset);
		self.content.push(Span::marked(text, marks));
		self.content.extend(right);
		self.normalize();
	}

	/// Removes characters in `[from, to)`.
	pub(crate) fn delete_text(&mut self, from: usize, to: usize) {
		let mut right = split_content(&mut self.content, from);
		let tail = split_content(&mut right, to - from);
		self.content.extend(tail);
		self.normalize();
	}

	/// Splits the content at `offset`, returning everything after it.
	pub(crate) fn split_off(&mut self, offset: usize) -> Content {
		let right = split_content(&mut self.content, offset);
		self.normalize();
		right
	}

	/// Appends spans to the end of the content.
	pub(crate) fn append(&mut self, spans: impl IntoIterator<Item = Span>) {
		self.content.extend(spans);
		self.normalize();
	}

	/// Adds or removes `mark` over `[from, to)`.
	pub(crate) fn set_mark(&mut self, from: usize, to: usize, mark: Mark, on: bool) {
		let mut middle = split_content(&mut self.content, from);
		let tail = split_content(&mut middle, to - from);
		for span in &mut middle {
			span.marks.set(mark.flag(), on);
		}
		self.content.extend(middle);
		self.content.extend(tail);
		self.normalize();
	}

	/// Sets or clears the link target over `[from, to)`.
	pub(crate) fn set_link(&mut self, from: usize, to: usize, href: Option<&str>) {
		let mut middle = split_content(&mut self.content, from);
		let tail = split_content(&mut middle, to - from);
		for span in &mut middle {
			span.link = href.map(str::to_string);
		}
		self.content.extend(middle);
		self.content.extend(tail);
		self.normalize();
	}

	/// Link target shared by every character in `[from, to)`, if any.
	pub fn link_in(&self, from: usize, to: usize) -> Option<&str> {
		let mut seen = 0;
		let mut target = None;
		for span in &self.content {
			let (start, end) = (seen, seen + span.char_len());
			seen = end;
			if end <= from || start >= to {
				continue;
			}
			match (target, span.link.as_deref()) {
				(_, None) => return None,
				(None, Some(href)) => target = Some(href),
				(Some(a), Some(b)) if a != b => return None,
				_ => {}
			}
		}
		target
	}

	/// Takes the inline content, leaving the block empty.
	pub(crate) fn take_content(&mut self) -> Content {
		std::mem::take(&mut self.content)
	}

	/// Merges adjacent spans with the same format and drops empty ones.
	fn normalize(&mut self) {
		let mut merged = Content::new();
		for span in self.content.drain(..) {
			if span.text.is_empty() {
				continue;
			}
			if let Some(last) = merged.last_mut()
				&& last.same_format(&span)
			{
				last.text.push_str(&span.text);
				continue;
			}
			merged.push(span);
		}
		self.content = merged;
	}
}

/// Splits `content` at character `offset`, leaving the left half in place.
fn split_content(content: &mut Content, offset: usize) -> Content {
	let mut seen = 0;
	let mut right = Content::new();
	let mut split_index = content.len();

	for (i, span) in content.iter_mut().enumerate() {
		let len = span.char_len();
		if seen + len <= offset {
			seen += len;
			continue;
		}
		let local = offset - seen;
		let byte = span.text.char_indices().nth(local).map_or(span.text.len(), |(b, _)| b);
		let tail = span.text.split_off(byte);
		right.push(Span {
			text: tail,
			marks: span.marks,
			link: span.link.clone(),
		});
		split_index = i + 1;
		break;
	}

	right.extend(content.drain(split_index..));
	right
}
