//! Normalized per-server state derived from capability negotiation.

use std::collections::BTreeSet;

use bbs_protocol::{Range, SessionToken};
use serde::{Deserialize, Serialize};

/// Which optional server features are active, as this client understands
/// them.
///
/// Recomputed in full on every `hello`; never patched field by field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
	/// Image-board mode. Mutually exclusive with every other feature flag:
	/// this client treats imageboards as a distinct, minimally-supported mode.
	pub imageboard: bool,
	pub avatars: bool,
	pub user_titles: bool,
	pub signatures: bool,
	pub tags: bool,
	/// Server paginates `get` replies and accepts a `range` field.
	pub range: bool,
	/// Listing/reading is gated behind login and no stored session exists.
	pub requires_login: bool,
}

/// Command access rules by privilege level, as sets for membership tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessMap {
	#[serde(default)]
	pub guest: BTreeSet<String>,
	#[serde(default)]
	pub user: BTreeSet<String>,
}

/// Everything the client knows about one server.
///
/// `address` is the stable identity key: persistence, session ownership, and
/// connection state are all partitioned by it. Instances are produced whole
/// by [`negotiate`](crate::negotiate::negotiate) and mutated only by the
/// session lifecycle (login/logout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerDescriptor {
	pub address: String,
	pub name: String,
	pub description: String,
	pub protocol_version: u32,
	pub server_version: String,
	pub icon: String,
	/// Message body formats the server offers.
	#[serde(default)]
	pub formats: Vec<String>,
	pub option_flags: BTreeSet<String>,
	pub list_types: BTreeSet<String>,
	pub access_rules: AccessMap,
	pub layout: Layout,
	/// View the client should land on after connecting.
	pub home_route: String,
	#[serde(default)]
	pub default_range: Option<Range>,
	/// Session token issued by this server, when one is held.
	#[serde(default)]
	pub session: Option<SessionToken>,
	#[serde(default)]
	pub user: Option<String>,
}
