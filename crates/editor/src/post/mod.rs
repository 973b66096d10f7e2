//! Turning an edited document into a saveable post.
//!
//! The title is the text of the first rank-1 heading. The body is everything
//! else. Saving derives a URL slug from the title and serializes the result as
//! the JSON payload accepted by the post store.

use std::sync::LazyLock;

use folio_primitives::{Block, Document};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::markdown;

mod tags;

#[cfg(test)]
mod tests;

pub use tags::Tags;

/// Errors preventing a post from being saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
	#[error("Title is required")]
	TitleRequired,
}

/// A post ready to be handed to the post store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
	/// Trimmed title text.
	pub title: String,
	/// URL slug derived from the title.
	pub slug: String,
	/// Normalized tags.
	pub tags: Vec<String>,
	/// Body as Markdown.
	pub content: String,
	/// Whether the post goes live immediately.
	pub published: bool,
}

impl PostDraft {
	/// Serializes the draft as pretty-printed JSON.
	pub fn to_json(&self) -> serde_json::Result<String> {
		serde_json::to_string_pretty(self)
	}
}

/// Trimmed text of the first rank-1 heading, or an empty string.
pub fn extract_title(doc: &Document) -> String {
	doc.blocks()
		.iter()
		.find(|b| b.is_title())
		.map(|b| b.text_content().trim().to_string())
		.unwrap_or_default()
}

/// The document without its first rank-1 heading.
///
/// An empty body becomes a single empty paragraph.
pub fn extract_body(doc: &Document) -> Document {
	let mut blocks = doc.blocks().to_vec();
	if let Some(index) = blocks.iter().position(Block::is_title) {
		blocks.remove(index);
	}
	if blocks.is_empty() {
		blocks.push(Block::empty_paragraph());
	}
	Document::from_blocks(blocks)
}

/// Builds the saved form of `doc`.
///
/// The separator between title and body is layout, not content, so separators
/// leading the body are left out of the saved Markdown.
pub fn prepare_save(doc: &Document, tags: &Tags, publish: bool) -> Result<PostDraft, SaveError> {
	let title = extract_title(doc);
	if title.is_empty() {
		return Err(SaveError::TitleRequired);
	}

	let body = extract_body(doc);
	let content: Document = body.into_blocks().into_iter().skip_while(Block::is_separator).collect();

	Ok(PostDraft {
		slug: generate_slug(&title),
		title,
		tags: tags.to_vec(),
		content: markdown::to_markdown(&content),
		published: publish,
	})
}

static SLUG_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid slug pattern"));
static SLUG_DASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_-]+").expect("valid slug pattern"));

/// Derives a URL slug from a title.
///
/// Lowercases, drops everything but ASCII word characters, whitespace, and
/// hyphens, then collapses separator runs into single hyphens.
pub fn generate_slug(title: &str) -> String {
	let lower = title.to_lowercase();
	let stripped = SLUG_STRIP.replace_all(lower.trim(), "");
	let dashed = SLUG_DASHES.replace_all(&stripped, "-");
	dashed.trim_matches('-').to_string()
}
