use pretty_assertions::assert_eq;

use super::*;

#[test]
fn title_is_first_rank_one_heading_trimmed() {
	let doc = Document::from_blocks([Block::paragraph("intro"), Block::title("  Real Title "), Block::title("Second")]);
	assert_eq!(extract_title(&doc), "Real Title");
	assert_eq!(extract_title(&Document::new()), "");
}

#[test]
fn body_drops_title_only() {
	let doc = Document::from_blocks([Block::title("T"), Block::separator(), Block::paragraph("x")]);
	assert_eq!(extract_body(&doc).blocks(), &[Block::separator(), Block::paragraph("x")]);
}

#[test]
fn empty_body_becomes_empty_paragraph() {
	let doc = Document::from_blocks([Block::title("T")]);
	assert_eq!(extract_body(&doc).blocks(), &[Block::empty_paragraph()]);
}

#[test]
fn slug_generation() {
	assert_eq!(generate_slug("Hello World"), "hello-world");
	assert_eq!(generate_slug("  Rust & Go: 2024!  "), "rust-go-2024");
	assert_eq!(generate_slug("snake_case title"), "snake-case-title");
	assert_eq!(generate_slug("--Leading and trailing--"), "leading-and-trailing");
	assert_eq!(generate_slug("Café"), "caf");
	assert_eq!(generate_slug("!!!"), "");
}

#[test]
fn tags_are_normalized() {
	let mut tags = Tags::new();
	assert!(tags.add(" Rust "));
	assert!(!tags.add("rust"));
	assert!(!tags.add("   "));
	assert!(tags.add("Editors"));
	assert_eq!(tags.as_slice(), &["rust".to_string(), "editors".to_string()]);

	assert!(tags.remove("rust"));
	assert!(!tags.remove("rust"));
	assert_eq!(tags.pop(), Some("editors".to_string()));
	assert_eq!(tags.pop(), None);
	assert!(tags.is_empty());
}

#[test]
fn tags_collect_through_add() {
	let tags: Tags = ["A", "a", "b", ""].into_iter().collect();
	assert_eq!(tags.to_vec(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn save_builds_draft() {
	let doc = Document::from_blocks([
		Block::title("  Hello, World!  "),
		Block::separator(),
		Block::paragraph("Body"),
	]);
	let tags: Tags = ["Rust"].into_iter().collect();
	let draft = prepare_save(&doc, &tags, true).unwrap();
	assert_eq!(
		draft,
		PostDraft {
			title: "Hello, World!".into(),
			slug: "hello-world".into(),
			tags: vec!["rust".into()],
			content: "Body\n".into(),
			published: true,
		}
	);
	assert!(draft.to_json().unwrap().contains("\"slug\": \"hello-world\""));
}

#[test]
fn save_requires_title() {
	let doc = Document::from_blocks([Block::title("   "), Block::paragraph("x")]);
	assert_eq!(prepare_save(&doc, &Tags::new(), false), Err(SaveError::TitleRequired));
	assert_eq!(SaveError::TitleRequired.to_string(), "Title is required");
}

#[test]
fn save_keeps_separators_inside_body() {
	let doc = Document::from_blocks([
		Block::title("T"),
		Block::separator(),
		Block::paragraph("a"),
		Block::separator(),
		Block::paragraph("b"),
	]);
	let draft = prepare_save(&doc, &Tags::new(), false).unwrap();
	assert_eq!(draft.content, "a\n\n---\n\nb\n");
}
