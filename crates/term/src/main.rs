mod cli;
mod script;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use folio_editor::{EditorConfig, EditorSession};
use folio_primitives::ResolvedPos;
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
	setup_tracing();
	let cli = Cli::parse();

	let config = match &cli.config {
		Some(path) => EditorConfig::load(path)?,
		None => EditorConfig::default(),
	};

	match cli.command {
		Command::Draft { file, tags, publish } => draft(config, &file, &tags, publish),
		Command::Replay { script, input } => replay(config, &script, input.as_deref()),
	}
}

/// Logs to stderr, filtered by `FOLIO_LOG` (warnings only by default).
fn setup_tracing() {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.init();
}

fn read(path: &Path) -> anyhow::Result<String> {
	std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn draft(config: EditorConfig, file: &Path, tags: &[String], publish: bool) -> anyhow::Result<()> {
	let src = read(file)?;
	let mut session = EditorSession::from_markdown(config, &src)?;
	for tag in tags {
		session.tags_mut().add(tag);
	}
	info!(path = %file.display(), blocks = session.doc().len(), "loaded draft");

	let post = session
		.prepare_save(publish)
		.with_context(|| format!("cannot save {}", file.display()))?;
	println!("{}", post.to_json()?);
	Ok(())
}

fn replay(config: EditorConfig, script_path: &Path, input: Option<&Path>) -> anyhow::Result<()> {
	let steps = script::parse(&read(script_path)?).with_context(|| format!("invalid script {}", script_path.display()))?;
	let mut session = match input {
		Some(path) => EditorSession::from_markdown(config, &read(path)?)?,
		None => EditorSession::new(config)?,
	};
	debug!(steps = steps.len(), "replaying script");
	script::run(&mut session, &steps);

	print!("{}", session.to_markdown());
	match session.doc().resolve(session.selection().head) {
		Some(ResolvedPos::Inside { index, offset }) => println!("cursor: block {index}, offset {offset}"),
		Some(ResolvedPos::Boundary { index }) => println!("cursor: before block {index}"),
		None => println!("cursor: {}", session.selection().head),
	}
	Ok(())
}
