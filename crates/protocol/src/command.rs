//! Client-to-server command envelopes.
//!
//! Commands are a closed set tagged by the `cmd` field. The reserved
//! `session` field is deliberately NOT part of these types: the client stamps
//! it onto the serialized object just before transmission, so a command value
//! can never carry a token for the wrong server.

use serde::{Deserialize, Serialize};

use crate::range::Range;

/// Reserved top-level field the client merges a session token under.
pub const SESSION_FIELD: &str = "session";

/// Login wire-format version. Version 0 is plaintext username/password;
/// nonzero versions are reserved by the protocol for future schemes.
pub const LOGIN_VERSION: u32 = 0;

/// A structured request sent to the server, tagged by its `cmd` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "lowercase")]
pub enum Command {
	Hello,
	Login {
		username: String,
		password: String,
		version: u32,
	},
	Logout,
	List {
		#[serde(rename = "type")]
		kind: ListKind,
		#[serde(skip_serializing_if = "Option::is_none")]
		query: Option<String>,
	},
	Get {
		id: String,
		format: MessageFormat,
		#[serde(skip_serializing_if = "Option::is_none")]
		range: Option<Range>,
	},
}

impl Command {
	/// Builds a version-0 login command.
	pub fn login(username: impl Into<String>, password: impl Into<String>) -> Self {
		Command::Login {
			username: username.into(),
			password: password.into(),
			version: LOGIN_VERSION,
		}
	}

	pub fn list_threads(query: Option<String>) -> Self {
		Command::List {
			kind: ListKind::Thread,
			query,
		}
	}

	pub fn list_boards() -> Self {
		Command::List {
			kind: ListKind::Board,
			query: None,
		}
	}

	pub fn list_bookmarks() -> Self {
		Command::List {
			kind: ListKind::Bookmark,
			query: None,
		}
	}

	/// Builds an HTML-format `get` for a thread, optionally windowed.
	pub fn get(id: impl Into<String>, range: Option<Range>) -> Self {
		Command::Get {
			id: id.into(),
			format: MessageFormat::Html,
			range,
		}
	}

	/// The wire tag, for log fields.
	pub fn name(&self) -> &'static str {
		match self {
			Command::Hello => "hello",
			Command::Login { .. } => "login",
			Command::Logout => "logout",
			Command::List { .. } => "list",
			Command::Get { .. } => "get",
		}
	}
}

/// What a `list` command enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
	Thread,
	Board,
	Bookmark,
}

/// Message body format requested by a `get` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
	Html,
	Text,
}
