use serde::{Deserialize, Serialize};

/// An ordered, deduplicated list of lowercase tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a tag after trimming and lowercasing it.
	///
	/// Returns false for empty input and for tags already present.
	pub fn add(&mut self, tag: &str) -> bool {
		let tag = tag.trim().to_lowercase();
		if tag.is_empty() || self.0.contains(&tag) {
			return false;
		}
		self.0.push(tag);
		true
	}

	/// Removes `tag` if present.
	pub fn remove(&mut self, tag: &str) -> bool {
		let before = self.0.len();
		self.0.retain(|t| t != tag);
		self.0.len() != before
	}

	/// Removes and returns the most recently added tag.
	pub fn pop(&mut self) -> Option<String> {
		self.0.pop()
	}

	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	pub fn to_vec(&self) -> Vec<String> {
		self.0.clone()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl<S: AsRef<str>> FromIterator<S> for Tags {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut tags = Self::new();
		for tag in iter {
			tags.add(tag.as_ref());
		}
		tags
	}
}
