#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Post editing engine.
//!
//! This crate drives the editing of a single blog post: a document whose first
//! block is always a rank-1 title heading, optionally followed by a separator
//! and the post body.
//!
//! # Main Types
//!
//! - [`EditorSession`] - Document, selection, plugins, history, and tags of one post
//! - [`TitleEnforcer`] - Plugin keeping the title at the top and guiding the cursor into the body
//! - [`Keymap`] - Key to [`Action`] bindings
//! - [`EditorConfig`] - TOML-backed session configuration
//!
//! # Architecture
//!
//! ```text
//! EditorSession
//! ├── state: EditorState        // Document, selection, focus
//! ├── plugins: Vec<Box<dyn Plugin>>
//! │   ├── InputRules             // Markdown shortcuts while typing
//! │   └── TitleEnforcer          // Title shape and title exit
//! ├── keymap: Keymap
//! └── history: History           // Snapshot undo/redo
//! ```
//!
//! Every edit is a [`Transaction`](folio_primitives::Transaction). After a
//! transaction applies, plugins may append corrective transactions; the whole
//! group commits at once and forms one undo step.

/// Named editor actions.
pub mod action;
/// Default editing commands.
pub mod commands;
/// Session configuration.
pub mod config;
/// Snapshot undo and redo.
pub mod history;
/// Markdown shortcuts applied while typing.
pub mod input_rules;
/// Key bindings.
pub mod keymap;
/// Markdown import and export.
pub mod markdown;
pub mod plugin;
/// Title, body, slug, and tag handling for saving posts.
pub mod post;
/// The editing session.
pub mod session;
pub mod state;
/// Title enforcement plugin.
pub mod title_enforcer;

pub use action::Action;
pub use config::{ConfigError, EditorConfig};
pub use history::{History, Snapshot};
pub use input_rules::InputRules;
pub use keymap::Keymap;
pub use plugin::Plugin;
pub use post::{PostDraft, SaveError, Tags};
pub use session::EditorSession;
pub use state::EditorState;
pub use title_enforcer::TitleEnforcer;
