//! The editing session of one post.
//!
//! [`EditorSession`] owns the committed [`EditorState`] and routes every input
//! through the same pipeline:
//!
//! 1. Keys resolve to [`Action`]s through the keymap; unbound printable keys
//!    become text input.
//! 2. Plugins get the first chance to handle the action or text. Otherwise the
//!    default command in [`commands`](crate::commands) builds the transaction.
//! 3. [`dispatch`](EditorSession::dispatch) applies the transaction to a
//!    staging state, then runs append rounds: every plugin may append a
//!    corrective transaction, until a round appends nothing or the configured
//!    round limit is hit.
//! 4. The staging state is committed as a whole and recorded as one undo step.

use folio_primitives::{Block, Document, Key, Origin, Selection, StepError, Transaction};
use tracing::{debug, trace, warn};

use crate::action::Action;
use crate::commands;
use crate::config::{ConfigError, EditorConfig};
use crate::history::{History, Snapshot};
use crate::input_rules::InputRules;
use crate::keymap::Keymap;
use crate::markdown;
use crate::plugin::Plugin;
use crate::post::{self, PostDraft, SaveError, Tags};
use crate::state::EditorState;
use crate::title_enforcer::TitleEnforcer;

#[cfg(test)]
mod tests;

/// A post being edited.
pub struct EditorSession {
	state: EditorState,
	plugins: Vec<Box<dyn Plugin>>,
	keymap: Keymap,
	history: History,
	tags: Tags,
	config: EditorConfig,
}

impl std::fmt::Debug for EditorSession {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let plugins: Vec<_> = self.plugins.iter().map(|p| p.name()).collect();
		f.debug_struct("EditorSession")
			.field("state", &self.state)
			.field("plugins", &plugins)
			.field("history", &self.history)
			.field("tags", &self.tags)
			.finish_non_exhaustive()
	}
}

impl EditorSession {
	/// Starts a blank post: an empty title followed by an empty paragraph.
	pub fn new(config: EditorConfig) -> Result<Self, ConfigError> {
		let keymap = config.keymap()?;
		let mut plugins: Vec<Box<dyn Plugin>> = Vec::new();
		if config.input_rules {
			plugins.push(Box::new(InputRules));
		}
		plugins.push(Box::new(TitleEnforcer));

		Ok(Self {
			state: EditorState::blank(),
			plugins,
			keymap,
			history: History::new(config.history_depth),
			tags: Tags::new(),
			config,
		})
	}

	/// Opens a saved post for editing.
	///
	/// The document is laid out as title, separator, body. Separators and
	/// empty paragraphs leading the stored body are dropped, and an empty body
	/// becomes one empty paragraph.
	pub fn from_post(config: EditorConfig, title: &str, body_markdown: &str) -> Result<Self, ConfigError> {
		let body = markdown::from_markdown(body_markdown);
		let mut blocks = vec![Block::title(title.trim()), Block::separator()];
		blocks.extend(
			body.into_blocks()
				.into_iter()
				.skip_while(|b| b.is_separator() || (b.is_paragraph() && b.content_len() == 0)),
		);
		if blocks.len() == 2 {
			blocks.push(Block::empty_paragraph());
		}

		let mut session = Self::new(config)?;
		session.load(Document::from_blocks(blocks));
		Ok(session)
	}

	/// Opens a Markdown draft. Its first block becomes the title.
	pub fn from_markdown(config: EditorConfig, src: &str) -> Result<Self, ConfigError> {
		let mut session = Self::new(config)?;
		session.load(markdown::from_markdown(src));
		Ok(session)
	}

	/// Replaces the document without recording history, then repairs it.
	pub fn load(&mut self, doc: Document) {
		let mut tr = self.state.tr();
		let blocks = doc.into_blocks();
		let count = blocks.len();
		if let Err(error) = tr.replace_all(blocks) {
			warn!(%error, "failed to load document");
			return;
		}
		tr.set_origin(Origin::Load)
			.without_history()
			.set_selection(Selection::point(0));
		debug!(blocks = count, "loading document");
		self.dispatch(tr);
		self.history.clear();
	}

	/// Registers an additional plugin. It runs after the built-in ones.
	pub fn add_plugin(&mut self, plugin: Box<dyn Plugin>) {
		self.plugins.push(plugin);
	}

	/// Applies `tr` and every appended correction as one commit.
	pub fn dispatch(&mut self, tr: Transaction) {
		let before = self.state.clone();
		let mut staged = before.apply(&tr);
		let record = tr.adds_to_history() && tr.doc_changed();
		let origin = tr.origin();

		let mut applied = vec![tr];
		let mut seen = 0;
		let rounds = self.config.append_rounds.max(1);
		for round in 0..rounds {
			let fresh = applied.len();
			let mut appended = false;
			for plugin in &self.plugins {
				let Some(extra) = plugin.append_transaction(&applied[seen..], &before, &staged) else {
					continue;
				};
				trace!(plugin = plugin.name(), round, steps = extra.steps().len(), "appended transaction");
				staged = staged.apply(&extra);
				applied.push(extra);
				appended = true;
			}
			seen = fresh;
			if !appended {
				break;
			}
			if round + 1 == rounds {
				warn!(rounds, "append rounds exhausted before plugins settled");
			}
		}

		if record {
			self.history.record(Snapshot::of(&before));
		}
		debug!(
			?origin,
			appended = applied.len() - 1,
			blocks = staged.doc.len(),
			cursor = staged.selection.head,
			"committed transaction"
		);
		self.state = staged;
	}

	/// Runs a named action. Returns true if anything handled it.
	pub fn run_action(&mut self, action: Action) -> bool {
		match action {
			Action::Undo => return self.undo(),
			Action::Redo => return self.redo(),
			_ => {}
		}

		let claimed = self.plugins.iter().find_map(|p| {
			let tr = p.handle_action(&self.state, action)?;
			trace!(plugin = p.name(), %action, "plugin handled action");
			Some(tr)
		});
		let Some(tr) = claimed.or_else(|| commands::run(&self.state, action)) else {
			trace!(%action, "action not applicable");
			return false;
		};
		self.dispatch(tr);
		true
	}

	/// Handles a key press: bound keys run their action, printable keys type.
	pub fn handle_key(&mut self, key: Key) -> bool {
		if let Some(action) = self.keymap.lookup(&key) {
			return self.run_action(action);
		}
		match key.text_input() {
			Some(c) => self.insert_text(c.encode_utf8(&mut [0; 4])),
			None => false,
		}
	}

	/// Types `text` at the cursor.
	pub fn insert_text(&mut self, text: &str) -> bool {
		if text.is_empty() {
			return false;
		}
		let claimed = self.plugins.iter().find_map(|p| p.handle_text_input(&self.state, text));
		let Some(tr) = claimed.or_else(|| commands::insert_text(&self.state, text)) else {
			return false;
		};
		self.dispatch(tr);
		true
	}

	/// Links the selected text to `href`, or unlinks it with `None`.
	pub fn set_link(&mut self, href: Option<&str>) -> bool {
		let Some(tr) = commands::set_link(&self.state, href) else {
			return false;
		};
		self.dispatch(tr);
		true
	}

	/// Inserts an image block at the cursor.
	pub fn insert_image(&mut self, src: &str, alt: &str) -> bool {
		let Some(tr) = commands::insert_image(&self.state, src, alt) else {
			return false;
		};
		self.dispatch(tr);
		true
	}

	/// Reverts the last committed edit.
	pub fn undo(&mut self) -> bool {
		let Some(previous) = self.history.undo(Snapshot::of(&self.state)) else {
			return false;
		};
		self.restore(previous)
	}

	/// Reapplies the last reverted edit.
	pub fn redo(&mut self) -> bool {
		let Some(next) = self.history.redo(Snapshot::of(&self.state)) else {
			return false;
		};
		self.restore(next)
	}

	fn restore(&mut self, snapshot: Snapshot) -> bool {
		let build = || -> Result<Transaction, StepError> {
			let mut tr = self.state.tr();
			tr.replace_all(snapshot.doc.into_blocks())?;
			tr.set_origin(Origin::History)
				.without_history()
				.set_selection(snapshot.selection);
			Ok(tr)
		};
		match build() {
			Ok(tr) => {
				self.dispatch(tr);
				true
			}
			Err(error) => {
				warn!(%error, "failed to restore history snapshot");
				false
			}
		}
	}

	/// Moves the selection, snapping it onto text positions.
	pub fn set_selection(&mut self, selection: Selection) {
		self.state.selection = selection.snapped(&self.state.doc);
	}

	pub fn state(&self) -> &EditorState {
		&self.state
	}

	pub fn doc(&self) -> &Document {
		&self.state.doc
	}

	pub fn selection(&self) -> Selection {
		self.state.selection
	}

	pub fn history(&self) -> &History {
		&self.history
	}

	pub fn keymap(&self) -> &Keymap {
		&self.keymap
	}

	pub fn config(&self) -> &EditorConfig {
		&self.config
	}

	/// Trimmed title text.
	pub fn title(&self) -> String {
		post::extract_title(&self.state.doc)
	}

	/// The document without its title.
	pub fn body(&self) -> Document {
		post::extract_body(&self.state.doc)
	}

	/// Placeholder to show while the body holds no text.
	pub fn placeholder(&self) -> Option<&str> {
		let body = self.body();
		let blank = body.blocks().iter().all(|b| b.is_separator() || (b.is_textblock() && b.content_len() == 0));
		blank.then_some(self.config.placeholder.as_str())
	}

	/// The whole document, title included, as Markdown.
	pub fn to_markdown(&self) -> String {
		markdown::to_markdown(&self.state.doc)
	}

	pub fn tags(&self) -> &Tags {
		&self.tags
	}

	pub fn tags_mut(&mut self) -> &mut Tags {
		&mut self.tags
	}

	/// Builds the post to save.
	pub fn prepare_save(&self, publish: bool) -> Result<PostDraft, SaveError> {
		post::prepare_save(&self.state.doc, &self.tags, publish)
	}
}
