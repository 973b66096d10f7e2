//! Core types for post editing: blocks, positions, selections, and transactions.

/// Block document and positional addressing.
pub mod document;
/// Step errors.
pub mod error;
/// Key event types.
pub mod key;
/// Inline mark flags.
pub mod mark;
/// Block and inline span types.
pub mod node;
/// Cursor and range selections over document positions.
pub mod selection;
/// Atomic edits built from steps.
pub mod transaction;

pub use document::{Document, Pos, ResolvedPos};
pub use error::StepError;
pub use key::{Key, KeyCode, KeyParseError, Modifiers};
pub use mark::{Mark, Marks};
pub use node::{Block, BlockKind, Span};
pub use selection::Selection;
pub use transaction::{Bias, Origin, Step, StepMap, Transaction};
