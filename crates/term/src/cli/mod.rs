//! Command-line interface.

use std::path::PathBuf;

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{Parser, Subcommand};

/// Returns the help styles.
fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().bold())
		.usage(AnsiColor::Green.on_default().bold())
		.literal(AnsiColor::Cyan.on_default().bold())
		.placeholder(AnsiColor::Cyan.on_default())
}

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "A block editor for blog posts")]
#[command(version)]
#[command(styles = cli_styles())]
/// Command-line arguments.
pub struct Cli {
	/// Editor configuration file (TOML)
	#[arg(long, short = 'c', global = true, value_name = "PATH")]
	pub config: Option<PathBuf>,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Load a Markdown draft and print the post that would be saved
	Draft {
		/// Markdown file; its first heading becomes the title
		file: PathBuf,

		/// Tag to attach (repeatable)
		#[arg(long = "tag", short = 't', value_name = "TAG")]
		tags: Vec<String>,

		/// Mark the post as published
		#[arg(long)]
		publish: bool,
	},
	/// Run a key script against a session and print the resulting document
	Replay {
		/// Script with one key (e.g. `ctrl-b`, `enter`) or `type <text>` per line
		script: PathBuf,

		/// Markdown draft to start from (blank post if omitted)
		#[arg(long, short = 'i', value_name = "FILE")]
		input: Option<PathBuf>,
	},
}
