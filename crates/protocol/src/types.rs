//! Shared scalar types of the protocol.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque credential issued by a server on successful login.
///
/// A token is only ever valid against the server that issued it; the client
/// keys its persistence by server address for that reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
	pub fn new(token: impl Into<String>) -> Self {
		Self(token.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<String> for SessionToken {
	fn from(token: String) -> Self {
		Self(token)
	}
}

impl From<&str> for SessionToken {
	fn from(token: &str) -> Self {
		Self(token.to_owned())
	}
}

impl fmt::Display for SessionToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
