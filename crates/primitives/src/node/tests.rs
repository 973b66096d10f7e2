use super::*;

fn bold(text: &str) -> Span {
	Span::marked(text, Marks::BOLD)
}

#[test]
fn sizes() {
	assert_eq!(Block::separator().node_size(), 1);
	assert_eq!(Block::image("a.png", "a").node_size(), 1);
	assert_eq!(Block::empty_paragraph().node_size(), 2);
	assert_eq!(Block::title("héllo").node_size(), 7);
}

#[test]
fn leaf_discards_content() {
	let block = Block::new(BlockKind::Separator, [Span::plain("x")]);
	assert!(block.content().is_empty());
}

#[test]
fn empty_spans_dropped() {
	let block = Block::paragraph("");
	assert!(block.content().is_empty());
	assert_eq!(block.text_content(), "");
}

#[test]
fn insert_text_in_middle() {
	let mut block = Block::paragraph("helo");
	block.insert_text(3, "l", Marks::empty());
	assert_eq!(block.text_content(), "hello");
	assert_eq!(block.content().len(), 1);
}

#[test]
fn insert_marked_text_splits_span() {
	let mut block = Block::paragraph("ab");
	block.insert_text(1, "X", Marks::BOLD);
	assert_eq!(block.content(), &[Span::plain("a"), bold("X"), Span::plain("b")]);
}

#[test]
fn delete_across_spans_merges_neighbours() {
	let mut block = Block::new(BlockKind::Paragraph, [Span::plain("ab"), bold("XY"), Span::plain("cd")]);
	block.delete_text(1, 5);
	assert_eq!(block.content(), &[Span::plain("ad")]);
}

#[test]
fn split_off_multibyte() {
	let mut block = Block::paragraph("añb");
	let right = block.split_off(2);
	assert_eq!(block.text_content(), "añ");
	assert_eq!(right.as_slice(), &[Span::plain("b")]);
}

#[test]
fn split_at_end_is_empty() {
	let mut block = Block::title("Title");
	let right = block.split_off(5);
	assert!(right.is_empty());
	assert_eq!(block.text_content(), "Title");
}

#[test]
fn set_mark_over_range() {
	let mut block = Block::paragraph("hello");
	block.set_mark(1, 3, Mark::Bold, true);
	assert_eq!(block.content(), &[Span::plain("h"), bold("el"), Span::plain("lo")]);
	assert!(block.has_mark(1, 3, Mark::Bold));
	assert!(!block.has_mark(0, 3, Mark::Bold));

	block.set_mark(0, 5, Mark::Bold, false);
	assert_eq!(block.content(), &[Span::plain("hello")]);
}

#[test]
fn marks_at_inherits_previous_character() {
	let block = Block::new(BlockKind::Paragraph, [bold("ab"), Span::plain("cd")]);
	assert_eq!(block.marks_at(0), Marks::empty());
	assert_eq!(block.marks_at(2), Marks::BOLD);
	assert_eq!(block.marks_at(3), Marks::empty());
}

#[test]
fn links_do_not_merge_with_plain_text() {
	let block = Block::new(
		BlockKind::Paragraph,
		[Span::plain("see "), Span::plain("docs").with_link("https://example.com")],
	);
	assert_eq!(block.content().len(), 2);
}

#[test]
fn serializes_with_type_tag() {
	let json = serde_json::to_value(Block::title("Hi")).unwrap();
	assert_eq!(json["kind"]["type"], "heading");
	assert_eq!(json["kind"]["level"], 1);
	assert_eq!(json["content"][0]["text"], "Hi");

	let back: Block = serde_json::from_value(json).unwrap();
	assert!(back.is_title());
}
