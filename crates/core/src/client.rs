//! The protocol façade: command transmission, session stamping, and the
//! session-invalidation interceptor.

use std::sync::Arc;

use bbs_protocol::{
	BoardListResponse, Command, ErrorEnvelope, HelloResponse, LoginResponse, Range, SessionToken,
	ThreadListResponse, ThreadResponse, SESSION_FIELD,
};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::descriptor::ServerDescriptor;
use crate::error::{BbsError, Result};
use crate::navigate::{Navigator, Route};
use crate::store::ConnectionStore;
use crate::transport::{Transport, TransportReply};

/// Mutable connection triple plus the active descriptor. Exactly one per
/// client; state is partitioned per server address by the store, not here.
#[derive(Debug, Clone, Default)]
struct ClientState {
	address: Option<String>,
	session: Option<SessionToken>,
	user: Option<String>,
	server: Option<ServerDescriptor>,
}

/// Stateful client for one BBS connection at a time.
///
/// Construct exactly one at the composition root and share it by [`Arc`].
/// Each [`send`](Self::send) is a single request/response exchange: the
/// session token (when held) is stamped onto the outgoing command, and the
/// distinguished `{cmd: "error", wrt: "session"}` rejection is intercepted
/// here - session state is cleared locally and in the store, the navigator is
/// pointed at the login view, and the caller sees
/// [`BbsError::SessionInvalid`] instead of a domain error.
pub struct ProtocolClient {
	transport: Arc<dyn Transport>,
	store: Arc<Mutex<ConnectionStore>>,
	navigator: Arc<dyn Navigator>,
	state: Mutex<ClientState>,
}

impl ProtocolClient {
	pub fn new(
		transport: Arc<dyn Transport>,
		store: Arc<Mutex<ConnectionStore>>,
		navigator: Arc<dyn Navigator>,
	) -> Self {
		Self {
			transport,
			store,
			navigator,
			state: Mutex::new(ClientState::default()),
		}
	}

	/// True iff an active server address is set.
	pub fn is_connected(&self) -> bool {
		self.state.lock().address.is_some()
	}

	pub fn address(&self) -> Option<String> {
		self.state.lock().address.clone()
	}

	pub fn session(&self) -> Option<SessionToken> {
		self.state.lock().session.clone()
	}

	pub fn user(&self) -> Option<String> {
		self.state.lock().user.clone()
	}

	/// Snapshot of the active server descriptor.
	pub fn server(&self) -> Option<ServerDescriptor> {
		self.state.lock().server.clone()
	}

	/// Points the client at a server. Used by the session lifecycle on
	/// connect and on restore; not part of the caller-facing surface.
	pub(crate) fn set_connection(
		&self,
		address: String,
		session: Option<SessionToken>,
		server: Option<ServerDescriptor>,
	) {
		let mut state = self.state.lock();
		state.address = Some(address);
		state.session = session;
		state.user = server.as_ref().and_then(|s| s.user.clone());
		state.server = server;
	}

	/// Records a fresh login on the active connection.
	pub(crate) fn set_credentials(&self, user: String, session: SessionToken) {
		let mut state = self.state.lock();
		if let Some(server) = state.server.as_mut() {
			server.user = Some(user.clone());
			server.session = Some(session.clone());
			server.layout.requires_login = false;
		}
		state.user = Some(user);
		state.session = Some(session);
	}

	/// Sends a raw `hello` to an arbitrary address, outside any connection.
	///
	/// Used to probe candidate servers for the selection view; no session is
	/// stamped and client state is untouched.
	pub async fn probe(&self, address: &str) -> Result<HelloResponse> {
		let body = serde_json::to_value(Command::Hello)?;
		match self.transport.exchange(address, body).await? {
			TransportReply::Accepted(reply) => Ok(serde_json::from_value(reply)?),
			TransportReply::Rejected(reply) => {
				let envelope: ErrorEnvelope = serde_json::from_value(reply).unwrap_or_default();
				Err(BbsError::Domain(envelope))
			}
		}
	}

	/// Sends one command to the active server and returns the reply body
	/// verbatim.
	///
	/// Disconnected sends never reach the transport: the navigator is pointed
	/// back at server selection and [`BbsError::NotConnected`] is returned.
	/// No retry is performed; each call is exactly one exchange.
	pub async fn send(&self, command: Command) -> Result<Value> {
		let (address, session) = {
			let state = self.state.lock();
			(state.address.clone(), state.session.clone())
		};

		let Some(address) = address else {
			warn!(target: "bbs.client", command = command.name(), "send attempted while disconnected");
			self.navigator.goto(Route::ServerList);
			return Err(BbsError::NotConnected);
		};

		let mut body = serde_json::to_value(&command)?;
		if let (Some(token), Some(object)) = (&session, body.as_object_mut()) {
			object.insert(SESSION_FIELD.to_owned(), Value::String(token.as_str().to_owned()));
		}

		debug!(target: "bbs.client", command = command.name(), %address, "sending command");
		match self.transport.exchange(&address, body).await? {
			TransportReply::Accepted(reply) => Ok(reply),
			TransportReply::Rejected(reply) => {
				let envelope: ErrorEnvelope = serde_json::from_value(reply).unwrap_or_default();
				if envelope.is_session_invalid() {
					// Interceptor short-circuit: the caller's domain-error
					// handling never sees this shape.
					self.invalidate_session(&address);
					Err(BbsError::SessionInvalid)
				} else {
					Err(BbsError::Domain(envelope))
				}
			}
		}
	}

	/// Logs in on the active server. State and persistence updates belong to
	/// [`SessionLifecycle::on_login_success`](crate::lifecycle::SessionLifecycle::on_login_success).
	pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
		let reply = self.send(Command::login(username, password)).await?;
		Ok(serde_json::from_value(reply)?)
	}

	/// Ends the session on both sides: sends `logout`, then drops the local
	/// and persisted tokens for the active server.
	pub async fn logout(&self) -> Result<()> {
		let address = self.address();
		self.send(Command::Logout).await?;
		if let Some(address) = address {
			self.clear_session_state(&address);
		}
		Ok(())
	}

	pub async fn list_threads(&self, query: Option<&str>) -> Result<ThreadListResponse> {
		let reply = self.send(Command::list_threads(query.map(str::to_owned))).await?;
		Ok(serde_json::from_value(reply)?)
	}

	pub async fn list_boards(&self) -> Result<BoardListResponse> {
		let reply = self.send(Command::list_boards()).await?;
		Ok(serde_json::from_value(reply)?)
	}

	/// Fetches one page of a thread.
	///
	/// A range is attached only when the active server advertises range
	/// support; when the caller passes none, the server's default range is
	/// used.
	pub async fn get_thread(&self, id: &str, range: Option<Range>) -> Result<ThreadResponse> {
		let range = {
			let state = self.state.lock();
			match state.server.as_ref() {
				Some(server) if server.layout.range => range.or(server.default_range),
				_ => None,
			}
		};
		let reply = self.send(Command::get(id, range)).await?;
		Ok(serde_json::from_value(reply)?)
	}

	/// Session-invalidation recovery: clear local and persisted session state
	/// for the server the rejected command was addressed to, then force the
	/// login view.
	fn invalidate_session(&self, address: &str) {
		info!(target: "bbs.session", %address, "server rejected session token; forcing re-login");
		self.clear_session_state(address);
		self.navigator.goto(Route::Login);
	}

	fn clear_session_state(&self, address: &str) {
		{
			let mut state = self.state.lock();
			state.session = None;
			state.user = None;
			if let Some(server) = state.server.as_mut() {
				server.session = None;
				server.user = None;
			}
		}
		self.clear_persisted_session(address);
	}

	fn clear_persisted_session(&self, address: &str) {
		if let Err(err) = self.store.lock().clear_session(address) {
			warn!(target: "bbs.store", %address, error = %err, "failed to clear persisted session");
		}
	}
}
