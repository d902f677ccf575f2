//! Server-to-client reply payloads.
//!
//! Relays differ wildly in which optional features they support, so almost
//! every field here is defaulted. Thread listings, board listings, and
//! message bodies stay as raw [`serde_json::Value`]s: the core hands them to
//! the rendering layer verbatim and does not define their shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::range::Range;
use crate::types::SessionToken;

/// Reply to a `hello` command: the server's capability advertisement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HelloResponse {
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub desc: String,
	/// Message body formats the server can produce, e.g. `html`, `text`.
	#[serde(default)]
	pub format: Vec<String>,
	/// List types the server answers `list` commands for.
	#[serde(default)]
	pub lists: Vec<String>,
	/// Optional-feature flags, e.g. `avatars`, `range`, `imageboard`.
	#[serde(default)]
	pub options: Vec<String>,
	/// Server software identifier.
	#[serde(default)]
	pub server: String,
	/// Protocol version the server speaks.
	#[serde(default)]
	pub version: u32,
	#[serde(default)]
	pub icon: String,
	#[serde(default)]
	pub access: AccessInfo,
	/// Page window the server suggests when the `range` option is set.
	#[serde(default)]
	pub default_range: Option<Range>,
}

/// Which commands are gated behind login (`user`) and which are open to
/// anyone (`guest`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessInfo {
	#[serde(default)]
	pub guest: Vec<String>,
	#[serde(default)]
	pub user: Vec<String>,
}

/// Reply to a successful `login` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
	/// Canonical username; servers may normalize what the user typed.
	#[serde(default)]
	pub username: Option<String>,
	pub session: SessionToken,
}

/// Reply to `list type=thread` (and `type=bookmark`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadListResponse {
	#[serde(default)]
	pub query: Option<String>,
	#[serde(default)]
	pub threads: Vec<Value>,
}

/// Reply to `list type=board`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardListResponse {
	#[serde(default)]
	pub boards: Vec<Value>,
}

/// Reply to a `get` command: one page of a thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreadResponse {
	#[serde(default)]
	pub id: String,
	#[serde(default)]
	pub title: Option<String>,
	/// Window this page actually covers, when the server paginates.
	#[serde(default)]
	pub range: Option<Range>,
	#[serde(default)]
	pub closed: bool,
	#[serde(default)]
	pub filter: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
	#[serde(default)]
	pub board: Option<String>,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub messages: Vec<Value>,
	/// Server hint that messages exist past this page.
	#[serde(default)]
	pub more: bool,
}

/// Error reply body. The `{cmd: "error", wrt: "session"}` shape is the
/// distinguished "your session is invalid" signal; anything else is a plain
/// domain error whose `error` text is for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorEnvelope {
	#[serde(default)]
	pub cmd: Option<String>,
	/// What the error is with regard to, e.g. `session`.
	#[serde(default)]
	pub wrt: Option<String>,
	#[serde(default)]
	pub error: Option<String>,
}

impl ErrorEnvelope {
	/// True for the server's session-invalidation signal.
	pub fn is_session_invalid(&self) -> bool {
		self.cmd.as_deref() == Some("error") && self.wrt.as_deref() == Some("session")
	}

	/// Display text, empty when the server sent none.
	pub fn message(&self) -> &str {
		self.error.as_deref().unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn hello_defaults_everything_a_relay_omits() {
		let hello: HelloResponse = serde_json::from_value(json!({
			"name": "ETI Relay",
			"options": ["range", "tags"],
			"default_range": {"start": 1, "end": 50}
		}))
		.unwrap();
		assert_eq!(hello.name, "ETI Relay");
		assert!(hello.lists.is_empty());
		assert!(hello.access.user.is_empty());
		assert_eq!(hello.default_range, Some(Range::new(1, 50)));
	}

	#[test]
	fn session_invalidation_signal_is_distinguished() {
		let invalid: ErrorEnvelope =
			serde_json::from_value(json!({"cmd": "error", "wrt": "session"})).unwrap();
		assert!(invalid.is_session_invalid());

		let domain: ErrorEnvelope =
			serde_json::from_value(json!({"error": "No results: ong"})).unwrap();
		assert!(!domain.is_session_invalid());
		assert_eq!(domain.message(), "No results: ong");
	}
}
