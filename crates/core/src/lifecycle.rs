//! Startup restore, connect, and login bookkeeping around the client.
//!
//! The lifecycle owns the transitions the presentation layer triggers: prime
//! the client from persistence at startup, adopt a freshly negotiated server,
//! and record a successful login. Its three persistence writes are
//! independent (see [`crate::store`]); a crash between them can leave a
//! last-address with no saved session, which the restore path tolerates.

use std::sync::Arc;

use bbs_protocol::SessionToken;
use parking_lot::Mutex;
use tracing::info;

use crate::client::ProtocolClient;
use crate::descriptor::ServerDescriptor;
use crate::error::Result;
use crate::navigate::{Navigator, Route};
use crate::negotiate;
use crate::store::{ConnectionStore, PersistedConnection};

/// Orchestrates restore-on-start, connect, and login-success transitions.
pub struct SessionLifecycle {
	client: Arc<ProtocolClient>,
	store: Arc<Mutex<ConnectionStore>>,
	navigator: Arc<dyn Navigator>,
}

impl SessionLifecycle {
	pub fn new(
		client: Arc<ProtocolClient>,
		store: Arc<Mutex<ConnectionStore>>,
		navigator: Arc<dyn Navigator>,
	) -> Self {
		Self {
			client,
			store,
			navigator,
		}
	}

	/// Re-primes the client from the previous run's persisted connection.
	///
	/// Does not navigate and does not touch the network; the restored
	/// descriptor (with its home route) is simply active again.
	pub fn restore_on_start(&self) -> Option<PersistedConnection> {
		let restored = self.store.lock().load_last_connection()?;
		info!(target: "bbs.session", address = %restored.address, "restoring previous connection");
		self.client.set_connection(
			restored.address.clone(),
			restored.session.clone(),
			restored.server.clone(),
		);
		Some(restored)
	}

	/// Probes `address` and negotiates its capabilities against any session
	/// token already stored for it.
	pub async fn negotiate(&self, address: &str) -> Result<ServerDescriptor> {
		let hello = self.client.probe(address).await?;
		let stored = self.store.lock().session_for(address);
		Ok(negotiate::negotiate(address, &hello, stored))
	}

	/// Adopts a negotiated descriptor as the active connection.
	///
	/// Servers that still require login get the login view and nothing is
	/// persisted yet - the connection only becomes the durable "last" one
	/// once it is actually usable.
	pub fn connect(&self, descriptor: ServerDescriptor) -> Result<()> {
		let address = descriptor.address.clone();
		let requires_login = descriptor.layout.requires_login;
		let home = descriptor.home_route.clone();

		self.client.set_connection(
			address.clone(),
			descriptor.session.clone(),
			Some(descriptor.clone()),
		);

		if requires_login {
			self.navigator.goto(Route::Login);
		} else {
			self.navigator.goto(Route::View(home));
			let mut store = self.store.lock();
			store.mark_as_last(&address)?;
			store.save_server_data(&descriptor)?;
		}
		Ok(())
	}

	/// Records a successful login: credentials on the client, navigation to
	/// the home route, then all three durable writes (session, descriptor
	/// snapshot, last address) regardless of what `connect` already wrote.
	pub fn on_login_success(
		&self,
		username: &str,
		token: SessionToken,
		descriptor: &ServerDescriptor,
	) -> Result<()> {
		let mut descriptor = descriptor.clone();
		descriptor.session = Some(token.clone());
		descriptor.user = Some(username.to_owned());
		descriptor.layout.requires_login = false;

		self.client.set_credentials(username.to_owned(), token.clone());
		self.navigator.goto(Route::View(descriptor.home_route.clone()));

		info!(target: "bbs.session", address = %descriptor.address, user = username, "login recorded");
		let mut store = self.store.lock();
		store.save_session(&descriptor.address, token)?;
		store.save_server_data(&descriptor)?;
		store.mark_as_last(&descriptor.address)?;
		Ok(())
	}
}
