use folio_primitives::{Block, BlockKind, Document, Marks, Span};

/// Renders `doc` as CommonMark.
///
/// Headings use ATX style, code blocks are fenced, and bullet items use `-`.
/// Empty text blocks other than code blocks are dropped.
pub fn to_markdown(doc: &Document) -> String {
	let mut out = String::new();
	let mut previous: Option<&BlockKind> = None;
	let mut ordinal = 0;

	for block in doc.blocks() {
		if block.is_textblock() && block.content_len() == 0 && !matches!(block.kind, BlockKind::CodeBlock { .. }) {
			continue;
		}

		let same_list = matches!(
			(previous, &block.kind),
			(Some(BlockKind::ListItem { ordered: a }), BlockKind::ListItem { ordered: b }) if a == b
		);
		ordinal = if same_list { ordinal + 1 } else { 1 };

		if !out.is_empty() {
			out.push_str(if same_list { "\n" } else { "\n\n" });
		}
		write_block(&mut out, block, ordinal);
		previous = Some(&block.kind);
	}

	if !out.is_empty() {
		out.push('\n');
	}
	out
}

fn write_block(out: &mut String, block: &Block, ordinal: usize) {
	match &block.kind {
		BlockKind::Heading { level } => {
			out.push_str(&"#".repeat(usize::from(*level).clamp(1, 6)));
			out.push(' ');
			out.push_str(&protect_edge_whitespace(&render_inline(block.content())));
		}
		BlockKind::Paragraph => out.push_str(&render_line(block.content())),
		BlockKind::Separator => out.push_str("---"),
		BlockKind::CodeBlock { language } => {
			let code = block.text_content();
			let fence = if code.contains("```") { "~~~" } else { "```" };
			out.push_str(fence);
			out.push_str(language.as_deref().unwrap_or_default());
			out.push('\n');
			out.push_str(&code);
			if !code.is_empty() {
				out.push('\n');
			}
			out.push_str(fence);
		}
		BlockKind::Blockquote => {
			let quoted = render_line(block.content());
			for (i, line) in quoted.lines().enumerate() {
				if i > 0 {
					out.push('\n');
				}
				out.push_str("> ");
				out.push_str(line);
			}
		}
		BlockKind::ListItem { ordered } => {
			if *ordered {
				out.push_str(&format!("{ordinal}. "));
			} else {
				out.push_str("- ");
			}
			out.push_str(&render_line(block.content()));
		}
		BlockKind::Image { src, alt } => {
			out.push_str(&format!("![{}]({src})", escape_text(alt)));
		}
	}
}

/// Renders the content of a block that starts its own line, so that the text
/// cannot be read back as block syntax.
fn render_line(spans: &[Span]) -> String {
	protect_edge_whitespace(&escape_block_start(render_inline(spans)))
}

fn render_inline(spans: &[Span]) -> String {
	let mut out = String::new();
	for span in spans {
		// Emphasis delimiters must hug the text, so edge whitespace goes outside.
		let inner = span.text.trim();
		if inner.is_empty() || (span.marks.is_empty() && span.link.is_none()) {
			out.push_str(&escape_text(&span.text));
			continue;
		}
		let lead = &span.text[..span.text.len() - span.text.trim_start().len()];
		let trail = &span.text[span.text.trim_end().len()..];

		let mut text = if span.marks.contains(Marks::CODE) {
			let tick = if inner.contains('`') { "``" } else { "`" };
			format!("{tick}{inner}{tick}")
		} else {
			escape_text(inner)
		};
		if span.marks.contains(Marks::ITALIC) {
			text = format!("*{text}*");
		}
		if span.marks.contains(Marks::BOLD) {
			text = format!("**{text}**");
		}
		if span.marks.contains(Marks::STRIKE) {
			text = format!("~~{text}~~");
		}
		if let Some(href) = &span.link {
			text = format!("[{text}]({href})");
		}

		out.push_str(lead);
		out.push_str(&text);
		out.push_str(trail);
	}
	out
}

fn escape_text(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		if matches!(c, '\\' | '*' | '_' | '`' | '~' | '[' | ']' | '<' | '&' | '#') {
			escaped.push('\\');
		}
		escaped.push(c);
	}
	escaped
}

/// Escapes a line that would otherwise open a list, quote, or rule.
///
/// Heading markers never need this here: `#` is escaped everywhere.
fn escape_block_start(mut line: String) -> String {
	if let Some(digits) = ordered_marker_len(&line) {
		// "1. text" becomes "1\. text"
		line.insert(digits, '\\');
	} else if line.starts_with(['>', '-', '+', '=']) {
		line.insert(0, '\\');
	}
	line
}

fn ordered_marker_len(line: &str) -> Option<usize> {
	let digits = line.chars().take_while(char::is_ascii_digit).count();
	let rest = line[digits..].strip_prefix(['.', ')'])?;
	(digits > 0 && (rest.is_empty() || rest.starts_with([' ', '\t']))).then_some(digits)
}

/// Writes whitespace at either end of a line as character references.
///
/// The parser strips edge whitespace from paragraphs and headings, and four
/// leading spaces would open an indented code block.
fn protect_edge_whitespace(line: &str) -> String {
	let body = line.trim_matches([' ', '\t']);
	if body.len() == line.len() {
		return line.to_string();
	}
	let lead = &line[..line.len() - line.trim_start_matches([' ', '\t']).len()];
	let trail = &line[lead.len() + body.len()..];
	let entity = |c: char| if c == '\t' { "&#9;" } else { "&#32;" };

	let mut out = String::with_capacity(line.len() + 8);
	out.extend(lead.chars().map(entity));
	out.push_str(body);
	out.extend(trail.chars().map(entity));
	out
}
