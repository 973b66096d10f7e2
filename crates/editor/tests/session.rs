#![allow(unused_crate_dependencies)]

use folio_editor::{Action, EditorConfig, EditorSession, title_enforcer};
use folio_primitives::{Block, Document, Key, KeyCode, ResolvedPos, Selection};
use proptest::prelude::*;

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[derive(Debug, Clone)]
enum Op {
	Type(char),
	Key(KeyCode),
	Action(Action),
	Select(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		4 => prop::sample::select(vec!['a', 'b', ' ', '#', '-', '>', '1', '.', '`']).prop_map(Op::Type),
		3 => prop::sample::select(vec![
			KeyCode::Enter,
			KeyCode::Backspace,
			KeyCode::Left,
			KeyCode::Right,
			KeyCode::Up,
			KeyCode::Down,
		])
		.prop_map(Op::Key),
		2 => prop::sample::select(vec![
			Action::Undo,
			Action::Redo,
			Action::ToggleBold,
			Action::Heading1,
			Action::Heading2,
			Action::Paragraph,
			Action::BulletList,
			Action::Blockquote,
			Action::CodeBlock,
			Action::InsertSeparator,
		])
		.prop_map(Op::Action),
		1 => (0usize..40, 0usize..40).prop_map(|(a, h)| Op::Select(a, h)),
	]
}

proptest! {
	#[test]
	fn title_survives_any_edit_sequence(ops in prop::collection::vec(op(), 1..60)) {
		let mut session = EditorSession::new(EditorConfig::default()).unwrap();
		for op in ops {
			match op {
				Op::Type(c) => {
					session.handle_key(Key::char(c));
				}
				Op::Key(code) => {
					session.handle_key(Key::new(code));
				}
				Op::Action(action) => {
					session.run_action(action);
				}
				Op::Select(anchor, head) => session.set_selection(Selection::single(anchor, head)),
			}

			let doc = session.doc();
			prop_assert!(doc.first().is_some_and(Block::is_title), "{:?}", doc);
			prop_assert!(session.selection().is_valid_in(doc));
			prop_assert!(title_enforcer::enforce_title(doc).is_none());
		}
	}

	#[test]
	fn repair_is_idempotent(texts in prop::collection::vec("[a-z ]{0,6}", 0..5), leading_separator: bool) {
		let mut blocks: Vec<Block> = texts.iter().map(|t| Block::paragraph(t.as_str())).collect();
		if leading_separator {
			blocks.insert(0, Block::separator());
		}
		let once = title_enforcer::repair(Document::from_blocks(blocks));
		prop_assert!(once.first().is_some_and(Block::is_title));
		prop_assert_eq!(title_enforcer::repair(once.clone()), once);
	}
}

#[test]
fn writing_a_post_end_to_end() {
	init_tracing();
	let mut session = EditorSession::new(EditorConfig::default()).unwrap();

	for c in "My Title".chars() {
		session.handle_key(Key::char(c));
	}
	session.handle_key(Key::new(KeyCode::Enter));
	for c in "Hello **there**".chars() {
		session.handle_key(Key::char(c));
	}
	session.tags_mut().add("Intro");

	let draft = session.prepare_save(true).unwrap();
	assert_eq!(draft.title, "My Title");
	assert_eq!(draft.slug, "my-title");
	assert_eq!(draft.tags, vec!["intro".to_string()]);
	// Typed asterisks are text, not formatting.
	assert_eq!(draft.content, "Hello \\*\\*there\\*\\*\n");
	assert!(draft.published);
}

#[test]
fn confirm_from_title_relocates_cursor() {
	init_tracing();
	let doc = Document::from_blocks([Block::title("My Title"), Block::paragraph("Body text")]);
	let at_title_end = Selection::point(doc.content_end(0).unwrap());

	let (doc, selection) = title_enforcer::confirm_from_title(&doc, at_title_end).unwrap();
	assert_eq!(
		doc.blocks(),
		&[
			Block::title("My Title"),
			Block::separator(),
			Block::empty_paragraph(),
			Block::paragraph("Body text"),
		]
	);
	assert_eq!(doc.resolve(selection.head), Some(ResolvedPos::Inside { index: 2, offset: 0 }));
}

#[test]
fn reopened_post_round_trips_through_markdown() {
	init_tracing();
	let session = EditorSession::from_post(
		EditorConfig::default(),
		"Notes",
		"Some *emphasis*.\n\n- one\n- two\n\n---\n\n```sh\nls\n```\n",
	)
	.unwrap();
	let draft = session.prepare_save(false).unwrap();
	let reopened = EditorSession::from_post(EditorConfig::default(), &draft.title, &draft.content).unwrap();
	assert_eq!(reopened.doc(), session.doc());
}
