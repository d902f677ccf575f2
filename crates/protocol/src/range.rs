//! Inclusive pagination windows over ordered message lists.
//!
//! On the wire a range is a `{start, end}` object (the `range` field of a
//! `get` command and the `default_range` field of a `hello` reply). In
//! routes and bookmarks it travels as a compact `"start-end"` token; the
//! codec here converts between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inclusive `[start, end]` window over an ordered list of messages.
///
/// Invariant: `end >= start`. The decoder enforces this by substituting
/// [`Range::ZERO`] for anything it cannot make sense of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
	pub start: u32,
	pub end: u32,
}

impl Range {
	/// Fallback produced when a range token cannot be parsed. Treated by
	/// callers as "no valid range", never as an error.
	pub const ZERO: Range = Range { start: 0, end: 0 };

	/// Builds a window. The `end >= start` invariant is the caller's to
	/// uphold here; only [`Range::decode`] enforces it on untrusted input.
	pub fn new(start: u32, end: u32) -> Self {
		debug_assert!(end >= start, "inverted range window {start}-{end}");
		Self { start, end }
	}

	/// Parses a `"start-end"` token.
	///
	/// Splits on the first `-`. Missing separator, non-numeric parts,
	/// inverted windows, and windows too wide to represent all decode to
	/// [`Range::ZERO`].
	pub fn decode(token: &str) -> Range {
		let Some((start, end)) = token.split_once('-') else {
			return Range::ZERO;
		};
		match (start.parse(), end.parse()) {
			// `end - start` must stay below u32::MAX so the width (+1) fits
			(Ok(start), Ok(end)) if end >= start && end - start < u32::MAX => Range { start, end },
			_ => Range::ZERO,
		}
	}

	/// Renders the compact `"start-end"` token form.
	pub fn encode(&self) -> String {
		format!("{}-{}", self.start, self.end)
	}

	/// Number of messages the window covers (at least 1). Saturates rather
	/// than overflowing on extreme or inverted windows.
	pub fn width(&self) -> u32 {
		self.end.saturating_sub(self.start).saturating_add(1)
	}

	/// The next window of equal width, regardless of how many messages the
	/// current page actually returned.
	///
	/// A window that cannot advance without overflowing collapses to
	/// [`Range::ZERO`], the same "no valid range" fallback a malformed token
	/// decodes to.
	pub fn next(&self) -> Range {
		let width = self.width();
		match (self.start.checked_add(width), self.end.checked_add(width)) {
			(Some(start), Some(end)) => Range { start, end },
			_ => Range::ZERO,
		}
	}
}

impl fmt::Display for Range {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.start, self.end)
	}
}
