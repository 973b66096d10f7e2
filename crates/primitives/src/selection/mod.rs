use crate::document::{Document, Pos, ResolvedPos};

#[cfg(test)]
mod tests;

/// A selection defined by anchor and head positions.
///
/// The anchor is the fixed end, and the head moves during selection extension.
/// A point selection (anchor equals head) is the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
	/// The fixed end of the selection.
	pub anchor: Pos,
	/// The moving end of the selection (cursor position).
	pub head: Pos,
}

impl Selection {
	/// Creates a selection from anchor to head.
	pub fn single(anchor: Pos, head: Pos) -> Self {
		Self { anchor, head }
	}

	/// Creates a point selection (cursor).
	pub fn point(pos: Pos) -> Self {
		Self::single(pos, pos)
	}

	/// Returns the smaller of anchor and head.
	#[inline]
	pub fn from(&self) -> Pos {
		self.anchor.min(self.head)
	}

	/// Returns the larger of anchor and head.
	#[inline]
	pub fn to(&self) -> Pos {
		self.anchor.max(self.head)
	}

	/// Returns true if anchor and head coincide.
	#[inline]
	pub fn is_point(&self) -> bool {
		self.anchor == self.head
	}

	/// Transforms both ends with `f`.
	pub fn map(self, mut f: impl FnMut(Pos) -> Pos) -> Self {
		Self::single(f(self.anchor), f(self.head))
	}

	/// Clamps both ends to `[0, max]`.
	pub fn clamp(self, max: Pos) -> Self {
		self.map(|p| p.min(max))
	}

	/// Returns true if both ends resolve inside text blocks of `doc`.
	pub fn is_valid_in(&self, doc: &Document) -> bool {
		[self.anchor, self.head]
			.into_iter()
			.all(|p| matches!(doc.resolve(p), Some(ResolvedPos::Inside { .. })))
	}

	/// Returns a point selection at the text position nearest to `pos`.
	///
	/// Positions already inside a text block are kept. Block boundaries search
	/// forward for the start of the next text block, then backward for the end
	/// of the previous one. A document without text blocks yields position 0.
	pub fn near(doc: &Document, pos: Pos) -> Self {
		let pos = pos.min(doc.content_size());
		let boundary = match doc.resolve(pos) {
			Some(ResolvedPos::Inside { .. }) => return Self::point(pos),
			Some(ResolvedPos::Boundary { index }) => index,
			None => doc.len(),
		};

		let forward = (boundary..doc.len()).find_map(|i| doc.content_start(i));
		let backward = || (0..boundary).rev().find_map(|i| doc.content_end(i));
		Self::point(forward.or_else(backward).unwrap_or(0))
	}

	/// Maps this selection into `doc`, snapping invalid ends to the nearest
	/// text position.
	pub fn snapped(self, doc: &Document) -> Self {
		if self.is_valid_in(doc) {
			return self;
		}
		let head = Self::near(doc, self.head).head;
		if self.is_point() {
			return Self::point(head);
		}
		let anchor = Self::near(doc, self.anchor).head;
		Self::single(anchor, head)
	}
}
