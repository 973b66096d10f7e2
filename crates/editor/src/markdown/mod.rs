//! Markdown import and export.
//!
//! Posts are stored as Markdown. Export follows the conventions of the post
//! store (ATX headings, fenced code, `-` bullets); import goes through
//! `pulldown-cmark`.

mod export;
mod import;


pub use export::to_markdown;
pub use import::from_markdown;
