//! Key scripts for driving a session without a terminal.
//!
//! A script holds one step per line. A line is either a key chord in the
//! keymap's notation (`enter`, `ctrl-b`, `ctrl-shift-z`) or `type ` followed
//! by literal text, kept as written up to the line end. Leading indentation
//! is ignored. Blank lines and lines starting with `#` are skipped.

use folio_editor::EditorSession;
use folio_primitives::{Key, KeyParseError};
use thiserror::Error;
use tracing::{debug, trace};


/// One scripted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	/// A key press routed through the keymap.
	Key(Key),
	/// Text typed at the cursor, one character at a time.
	Type(String),
}

/// A script line could not be parsed.
#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
	/// 1-based line number.
	pub line: usize,
	#[source]
	pub source: KeyParseError,
}

/// Parses a whole script.
pub fn parse(src: &str) -> Result<Vec<Step>, ScriptError> {
	let mut steps = Vec::new();
	for (i, raw) in src.lines().enumerate() {
		let line = raw.trim_start();
		if let Some(text) = line.strip_prefix("type ") {
			steps.push(Step::Type(text.trim_end_matches(['\r', '\n']).to_string()));
			continue;
		}
		let line = line.trim_end();
		if line == "type" {
			steps.push(Step::Type(String::new()));
			continue;
		}
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		let key = line.parse().map_err(|source| ScriptError { line: i + 1, source })?;
		steps.push(Step::Key(key));
	}
	Ok(steps)
}

/// Feeds `steps` into `session`. Returns how many steps changed or moved anything.
pub fn run(session: &mut EditorSession, steps: &[Step]) -> usize {
	let mut handled = 0;
	for step in steps {
		let applied = match step {
			Step::Key(key) => session.handle_key(*key),
			Step::Type(text) => text.chars().fold(false, |any, c| session.handle_key(Key::char(c)) | any),
		};
		trace!(?step, applied, "script step");
		handled += usize::from(applied);
	}
	debug!(steps = steps.len(), handled, "script finished");
	handled
}
