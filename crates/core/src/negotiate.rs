//! Capability negotiation: deriving a [`ServerDescriptor`] from a raw
//! `hello` reply.

use bbs_protocol::{HelloResponse, SessionToken};
use tracing::debug;

use crate::descriptor::{AccessMap, Layout, ServerDescriptor};
use crate::navigate::routes;

/// Derives the full descriptor for the server at `address` from its `hello`
/// reply and any session token previously stored for that address.
///
/// Pure and idempotent: same inputs, same descriptor, no side effects. The
/// image-board check runs first and short-circuits every other optional
/// feature; this client does not support imageboards with avatars and the
/// like.
pub fn negotiate(
	address: &str,
	hello: &HelloResponse,
	stored_session: Option<SessionToken>,
) -> ServerDescriptor {
	let has_option = |flag: &str| hello.options.iter().any(|o| o == flag);

	let mut layout = Layout::default();
	let mut default_range = None;

	if has_option("imageboard") {
		layout.imageboard = true;
	} else {
		layout.avatars = has_option("avatars");
		layout.user_titles = has_option("usertitles");
		layout.signatures = has_option("signatures");
		layout.tags = has_option("tags");
		if has_option("range") {
			layout.range = true;
			default_range = hello.default_range;
		}
	}

	// Home view. Boards only when the server both flags the option and
	// actually answers board lists; otherwise the all-threads list.
	let home_route = if has_option("boards") && hello.lists.iter().any(|l| l == "board") {
		routes::BOARDS
	} else {
		routes::THREADS
	};

	// Does this server gate reading behind login? If so, a stored session
	// satisfies it; otherwise the user has to log in before anything works.
	let gated = hello.access.user.iter().any(|c| c == "list" || c == "get");
	let mut session = None;
	if gated {
		match stored_session {
			Some(token) => session = Some(token),
			None => layout.requires_login = true,
		}
	}

	debug!(
		target: "bbs.negotiate",
		%address,
		home = home_route,
		requires_login = layout.requires_login,
		"negotiated server layout"
	);

	ServerDescriptor {
		address: address.to_owned(),
		name: hello.name.clone(),
		description: hello.desc.clone(),
		protocol_version: hello.version,
		server_version: hello.server.clone(),
		icon: hello.icon.clone(),
		formats: hello.format.clone(),
		option_flags: hello.options.iter().cloned().collect(),
		list_types: hello.lists.iter().cloned().collect(),
		access_rules: AccessMap {
			guest: hello.access.guest.iter().cloned().collect(),
			user: hello.access.user.iter().cloned().collect(),
		},
		layout,
		home_route: home_route.to_owned(),
		default_range,
		session,
		user: None,
	}
}
