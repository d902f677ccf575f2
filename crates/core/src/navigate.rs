//! Navigation seam between the client core and whatever renders views.
//!
//! The core never renders; when it needs the user to be somewhere else (pick
//! a server, log back in, land on the home view) it asks the injected
//! [`Navigator`]. The presentation layer maps routes to its own views.

use parking_lot::Mutex;

/// Well-known home route paths chosen during capability negotiation.
pub mod routes {
	/// Home for servers that advertise board support.
	pub const BOARDS: &str = "/boards";
	/// Fallback home: the all-threads list (empty query).
	pub const THREADS: &str = "/threads/";
}

/// Views the core can steer the presentation layer toward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
	/// Server-selection view; target of every not-connected recovery.
	ServerList,
	/// Login form for the active server.
	Login,
	/// A server-relative view path, e.g. a negotiated home route.
	View(String),
}

/// Implemented by the presentation layer.
pub trait Navigator: Send + Sync {
	fn goto(&self, route: Route);
}

/// Navigator that just records requested routes.
///
/// Useful for composition roots without views and for asserting on the
/// client's recovery redirects in tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
	visited: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
	pub fn new() -> Self {
		Self::default()
	}

	/// All routes requested so far, in order.
	pub fn visited(&self) -> Vec<Route> {
		self.visited.lock().clone()
	}

	pub fn last(&self) -> Option<Route> {
		self.visited.lock().last().cloned()
	}
}

impl Navigator for RecordingNavigator {
	fn goto(&self, route: Route) {
		self.visited.lock().push(route);
	}
}
