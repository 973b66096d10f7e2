use folio_primitives::{KeyCode, Modifiers, ResolvedPos};
use pretty_assertions::assert_eq;

use super::*;

fn session() -> EditorSession {
	EditorSession::new(EditorConfig::default()).unwrap()
}

fn type_keys(session: &mut EditorSession, text: &str) {
	for c in text.chars() {
		assert!(session.handle_key(Key::char(c)), "typing {c:?}");
	}
}

fn press(session: &mut EditorSession, code: KeyCode) -> bool {
	session.handle_key(Key::new(code))
}

fn cursor(session: &EditorSession) -> Option<ResolvedPos> {
	session.doc().resolve(session.selection().head)
}

#[test]
fn blank_session_starts_in_title() {
	let s = session();
	assert_eq!(s.doc().blocks(), &[Block::title(""), Block::empty_paragraph()]);
	assert_eq!(cursor(&s), Some(ResolvedPos::Inside { index: 0, offset: 0 }));
	assert!(!s.history().can_undo());
}

#[test]
fn enter_from_title_moves_into_body() {
	let mut s = session();
	type_keys(&mut s, "My Title");
	assert!(press(&mut s, KeyCode::Enter));

	assert_eq!(
		s.doc().blocks(),
		&[
			Block::title("My Title"),
			Block::separator(),
			Block::empty_paragraph(),
			Block::empty_paragraph(),
		]
	);
	assert_eq!(cursor(&s), Some(ResolvedPos::Inside { index: 2, offset: 0 }));
	assert!(s.state().focused);

	type_keys(&mut s, "Body");
	assert_eq!(s.title(), "My Title");
	assert_eq!(s.to_markdown(), "# My Title\n\n---\n\nBody\n");
}

#[test]
fn right_arrow_at_title_end_inserts_separator_once() {
	let mut s = session();
	type_keys(&mut s, "T");
	assert!(press(&mut s, KeyCode::Right));
	// Back to the title end and out again: the separator is reused.
	assert!(press(&mut s, KeyCode::Left));
	assert_eq!(cursor(&s), Some(ResolvedPos::Inside { index: 0, offset: 1 }));
	assert!(press(&mut s, KeyCode::Down));

	assert_eq!(
		s.doc().blocks(),
		&[
			Block::title("T"),
			Block::separator(),
			Block::empty_paragraph(),
			Block::empty_paragraph(),
		]
	);
}

#[test]
fn enter_mid_title_splits_like_any_heading() {
	let mut s = session();
	type_keys(&mut s, "AB");
	assert!(press(&mut s, KeyCode::Left));
	assert!(press(&mut s, KeyCode::Enter));
	// The split keeps heading kind; the title stays first.
	assert_eq!(s.doc().blocks()[0], Block::title("A"));
	assert_eq!(s.doc().blocks()[1], Block::title("B"));
}

#[test]
fn title_exit_is_one_undo_step() {
	let mut s = session();
	type_keys(&mut s, "Hi");
	press(&mut s, KeyCode::Enter);
	assert!(s.undo());
	assert_eq!(s.doc().blocks(), &[Block::title("Hi"), Block::empty_paragraph()]);
	assert_eq!(cursor(&s), Some(ResolvedPos::Inside { index: 0, offset: 2 }));

	assert!(s.redo());
	assert_eq!(
		s.doc().blocks(),
		&[
			Block::title("Hi"),
			Block::separator(),
			Block::empty_paragraph(),
			Block::empty_paragraph(),
		]
	);
}

#[test]
fn new_edit_clears_redo() {
	let mut s = session();
	type_keys(&mut s, "ab");
	assert!(s.run_action(Action::Undo));
	assert!(s.history().can_redo());
	type_keys(&mut s, "c");
	assert!(!s.history().can_redo());
	assert!(!s.redo());
}

#[test]
fn undo_keys_are_bound() {
	let mut s = session();
	type_keys(&mut s, "x");
	assert!(s.handle_key(Key::char('z').with(Modifiers::CTRL)));
	assert_eq!(s.title(), "");
	assert!(s.handle_key(Key::char('y').with(Modifiers::CTRL)));
	assert_eq!(s.title(), "x");
}

#[test]
fn list_shortcut_in_title_is_coerced_back() {
	let mut s = session();
	type_keys(&mut s, "- ");
	assert_eq!(s.doc().blocks()[0], Block::title(""));
	assert_eq!(cursor(&s), Some(ResolvedPos::Inside { index: 0, offset: 0 }));
}

#[test]
fn heading_action_on_title_keeps_title() {
	let mut s = session();
	type_keys(&mut s, "Post");
	assert!(s.run_action(Action::Heading2));
	assert_eq!(s.doc().blocks()[0], Block::title("Post"));
}

#[test]
fn dispatch_commits_repaired_document() {
	let mut s = session();
	let mut tr = s.state().tr();
	tr.replace_all(vec![Block::paragraph("oops")]).unwrap();
	s.dispatch(tr);

	assert_eq!(s.doc().blocks(), &[Block::title("oops")]);
	assert_eq!(s.history().undo_len(), 1);
	assert!(s.undo());
	assert_eq!(s.doc().blocks(), &[Block::title(""), Block::empty_paragraph()]);
}

#[test]
fn emptied_document_regains_title() {
	let mut s = session();
	let mut tr = s.state().tr();
	tr.replace_all(Vec::new()).unwrap();
	s.dispatch(tr);
	assert_eq!(s.doc().blocks(), &[Block::title("")]);
}

#[test]
fn input_rules_in_body() {
	let mut s = session();
	type_keys(&mut s, "T");
	press(&mut s, KeyCode::Enter);
	type_keys(&mut s, "## Section");
	assert_eq!(s.doc().blocks()[2], Block::heading(2, "Section"));
}

#[test]
fn input_rules_can_be_disabled() {
	let config = EditorConfig {
		input_rules: false,
		..EditorConfig::default()
	};
	let mut s = EditorSession::new(config).unwrap();
	type_keys(&mut s, "T");
	press(&mut s, KeyCode::Enter);
	type_keys(&mut s, "## x");
	assert_eq!(s.doc().blocks()[2], Block::paragraph("## x"));
}

#[test]
fn unbound_command_chords_are_ignored() {
	let mut s = session();
	assert!(!s.handle_key(Key::char('q').with(Modifiers::CTRL)));
	// Bold without a selection has nothing to apply to.
	assert!(!s.handle_key(Key::char('b').with(Modifiers::CTRL)));
	assert!(!s.history().can_undo());
}

#[test]
fn backspace_at_body_start_removes_separator() {
	let mut s = session();
	type_keys(&mut s, "T");
	press(&mut s, KeyCode::Enter);
	assert!(press(&mut s, KeyCode::Backspace));
	assert_eq!(
		s.doc().blocks(),
		&[Block::title("T"), Block::empty_paragraph(), Block::empty_paragraph()]
	);
	assert!(press(&mut s, KeyCode::Backspace));
	assert_eq!(s.doc().blocks(), &[Block::title("T"), Block::empty_paragraph()]);
	assert_eq!(cursor(&s), Some(ResolvedPos::Inside { index: 0, offset: 1 }));
}

#[test]
fn from_post_lays_out_title_separator_body() {
	let s = EditorSession::from_post(EditorConfig::default(), " Hello ", "---\n\nFirst para\n\n## Sec\n").unwrap();
	assert_eq!(
		s.doc().blocks(),
		&[
			Block::title("Hello"),
			Block::separator(),
			Block::paragraph("First para"),
			Block::heading(2, "Sec"),
		]
	);
	assert_eq!(cursor(&s), Some(ResolvedPos::Inside { index: 0, offset: 0 }));
	assert!(!s.history().can_undo());
}

#[test]
fn from_post_with_empty_body() {
	let s = EditorSession::from_post(EditorConfig::default(), "Hello", "").unwrap();
	assert_eq!(
		s.doc().blocks(),
		&[Block::title("Hello"), Block::separator(), Block::empty_paragraph()]
	);
}

#[test]
fn from_markdown_coerces_first_block() {
	let s = EditorSession::from_markdown(EditorConfig::default(), "Intro text\n\nMore\n").unwrap();
	assert_eq!(s.doc().blocks(), &[Block::title("Intro text"), Block::paragraph("More")]);
}

#[test]
fn save_through_session() {
	let mut s = EditorSession::from_post(EditorConfig::default(), "Hello World", "Body").unwrap();
	s.tags_mut().add("Rust");
	let draft = s.prepare_save(false).unwrap();
	assert_eq!(draft.slug, "hello-world");
	assert_eq!(draft.tags, vec!["rust".to_string()]);
	assert_eq!(draft.content, "Body\n");
	assert!(!draft.published);

	assert_eq!(session().prepare_save(true), Err(SaveError::TitleRequired));
}

#[test]
fn placeholder_shows_while_body_is_blank() {
	let mut s = session();
	assert_eq!(s.placeholder(), Some("Start writing your post..."));
	type_keys(&mut s, "T");
	press(&mut s, KeyCode::Enter);
	assert!(s.placeholder().is_some());
	type_keys(&mut s, "x");
	assert_eq!(s.placeholder(), None);
}

#[test]
fn custom_keymap_from_config() {
	let mut config = EditorConfig::default();
	config.keys.insert("enter".into(), "none".into());
	let mut s = EditorSession::new(config).unwrap();
	type_keys(&mut s, "T");
	assert!(!press(&mut s, KeyCode::Enter));
	assert_eq!(s.doc().len(), 2);
}

#[test]
fn invalid_key_config_fails_session() {
	let mut config = EditorConfig::default();
	config.keys.insert("enter".into(), "fly".into());
	assert!(matches!(EditorSession::new(config), Err(ConfigError::UnknownAction { .. })));
}

/// Appends an empty paragraph after every transaction, never settling.
struct Restless;

impl Plugin for Restless {
	fn name(&self) -> &'static str {
		"restless"
	}

	fn append_transaction(&self, _: &[Transaction], _: &EditorState, new: &EditorState) -> Option<Transaction> {
		let mut tr = new.tr();
		tr.insert_block(new.doc.len(), Block::empty_paragraph()).ok()?;
		Some(tr)
	}
}

#[test]
fn append_rounds_are_bounded() {
	let config = EditorConfig {
		append_rounds: 3,
		..EditorConfig::default()
	};
	let mut s = EditorSession::new(config).unwrap();
	s.add_plugin(Box::new(Restless));
	type_keys(&mut s, "x");
	assert_eq!(s.doc().len(), 2 + 3);
	assert_eq!(s.history().undo_len(), 1);
}

#[test]
fn links_and_images_reach_saved_markdown() {
	let mut s = EditorSession::from_post(EditorConfig::default(), "T", "Hello world").unwrap();
	// Body content starts at 5: title (3) and separator (1) come first.
	s.set_selection(Selection::single(5, 10));
	assert!(s.set_link(Some("https://example.com")));
	s.set_selection(Selection::point(16));
	assert!(s.insert_image("a.png", "pic"));

	let draft = s.prepare_save(false).unwrap();
	assert_eq!(draft.content, "[Hello](https://example.com) world\n\n![pic](a.png)\n");
	assert_eq!(s.history().undo_len(), 2);

	assert!(s.undo());
	assert!(s.undo());
	assert_eq!(s.body().blocks(), &[Block::separator(), Block::paragraph("Hello world")]);
}

#[test]
fn link_without_selection_is_ignored() {
	let mut s = session();
	assert!(!s.set_link(Some("https://example.com")));
	assert!(!s.insert_image("", "nothing"));
	assert!(!s.history().can_undo());
}
