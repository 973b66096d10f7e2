use folio_primitives::{Block, BlockKind, Document, Marks, Span};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use tracing::trace;

/// Parses CommonMark (with strikethrough) into a block document.
///
/// Nested structure is flattened: every list item and quoted paragraph
/// becomes its own block. Raw HTML is dropped.
pub fn from_markdown(src: &str) -> Document {
	let mut builder = Builder::default();
	for event in Parser::new_ext(src, Options::ENABLE_STRIKETHROUGH) {
		builder.event(event);
	}
	builder.finish()
}

#[derive(Default)]
struct Builder {
	blocks: Vec<Block>,
	/// Block being filled with inline content.
	current: Option<(BlockKind, Vec<Span>)>,
	marks: Marks,
	link: Option<String>,
	/// Alt text of an image being read.
	image: Option<(String, String)>,
	lists: Vec<bool>,
	quote_depth: usize,
}

impl Builder {
	fn event(&mut self, event: Event<'_>) {
		match event {
			Event::Start(tag) => self.start(tag),
			Event::End(tag) => self.end(tag),
			Event::Text(text) => self.text(&text),
			Event::Code(code) => {
				let marks = self.marks | Marks::CODE;
				self.push_span(&code, marks);
			}
			Event::SoftBreak | Event::HardBreak => self.text(" "),
			Event::Rule => {
				self.flush();
				self.blocks.push(Block::separator());
			}
			other => trace!(?other, "skipping markdown event"),
		}
	}

	fn start(&mut self, tag: Tag<'_>) {
		match tag {
			Tag::Heading { level, .. } => self.open(BlockKind::Heading { level: level as u8 }),
			Tag::Paragraph => {
				// Tight list items carry their text without a paragraph.
				match &mut self.current {
					None => {
						let kind = if self.quote_depth > 0 { BlockKind::Blockquote } else { BlockKind::Paragraph };
						self.open(kind);
					}
					// Later paragraphs of a loose item join the first.
					Some((BlockKind::ListItem { .. }, spans)) if !spans.is_empty() => spans.push(Span::plain(" ")),
					Some(_) => {}
				}
			}
			Tag::BlockQuote(_) => {
				self.flush();
				self.quote_depth += 1;
			}
			Tag::CodeBlock(kind) => {
				let language = match kind {
					CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
					CodeBlockKind::Indented => None,
				};
				self.open(BlockKind::CodeBlock { language });
			}
			Tag::List(start) => {
				self.flush();
				self.lists.push(start.is_some());
			}
			Tag::Item => {
				let ordered = self.lists.last().copied().unwrap_or(false);
				self.open(BlockKind::ListItem { ordered });
			}
			Tag::Emphasis => self.marks |= Marks::ITALIC,
			Tag::Strong => self.marks |= Marks::BOLD,
			Tag::Strikethrough => self.marks |= Marks::STRIKE,
			Tag::Link { dest_url, .. } => self.link = Some(dest_url.to_string()),
			Tag::Image { dest_url, .. } => self.image = Some((dest_url.to_string(), String::new())),
			_ => {}
		}
	}

	fn end(&mut self, tag: TagEnd) {
		match tag {
			TagEnd::Heading(_) | TagEnd::CodeBlock | TagEnd::Item => self.flush(),
			TagEnd::Paragraph => {
				// Inside a list item the paragraph ends with the item.
				if !matches!(self.current, Some((BlockKind::ListItem { .. }, _))) {
					self.flush();
				}
			}
			TagEnd::BlockQuote(_) => {
				self.flush();
				self.quote_depth = self.quote_depth.saturating_sub(1);
			}
			TagEnd::List(_) => {
				self.lists.pop();
			}
			TagEnd::Emphasis => self.marks.remove(Marks::ITALIC),
			TagEnd::Strong => self.marks.remove(Marks::BOLD),
			TagEnd::Strikethrough => self.marks.remove(Marks::STRIKE),
			TagEnd::Link => self.link = None,
			TagEnd::Image => self.close_image(),
			_ => {}
		}
	}

	fn open(&mut self, kind: BlockKind) {
		self.flush();
		self.current = Some((kind, Vec::new()));
	}

	fn text(&mut self, text: &str) {
		if let Some((_, alt)) = &mut self.image {
			alt.push_str(text);
			return;
		}
		let marks = self.marks;
		self.push_span(text, marks);
	}

	fn push_span(&mut self, text: &str, marks: Marks) {
		if self.current.is_none() {
			self.open(BlockKind::Paragraph);
		}
		let mut span = Span::marked(text, marks);
		span.link = self.link.clone();
		if let Some((_, spans)) = &mut self.current {
			spans.push(span);
		}
	}

	/// Images are blocks, so an image splits the surrounding text block.
	fn close_image(&mut self) {
		let Some((src, alt)) = self.image.take() else {
			return;
		};
		let kind = match self.current.take() {
			Some((kind, spans)) => {
				if spans.iter().any(|s| !s.text.is_empty()) {
					self.current = Some((kind.clone(), spans));
					self.flush();
				}
				Some(kind)
			}
			None => None,
		};
		self.blocks.push(Block::image(src, alt));
		if let Some(kind) = kind {
			self.current = Some((kind, Vec::new()));
		}
	}

	/// Finishes the current block. Blocks left empty after an image split are
	/// dropped.
	fn flush(&mut self) {
		let Some((kind, spans)) = self.current.take() else {
			return;
		};
		let mut block = Block::new(kind, spans);
		if let BlockKind::CodeBlock { language } = &block.kind {
			let code = block.text_content();
			let code = code.strip_suffix('\n').unwrap_or(&code).to_string();
			block = Block::code_block(language.clone(), code);
		}
		let after_image = self.blocks.last().is_some_and(|b| matches!(b.kind, BlockKind::Image { .. }));
		if block.content_len() == 0 && after_image && !matches!(block.kind, BlockKind::CodeBlock { .. }) {
			return;
		}
		self.blocks.push(block);
	}

	fn finish(mut self) -> Document {
		self.flush();
		Document::from_blocks(self.blocks)
	}
}
