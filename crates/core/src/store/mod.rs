//! Durable record of known servers, their session tokens, and the last-used
//! connection.
//!
//! One JSON file under the user's config directory, keyed by server address.
//! Each mutating operation is an independent write-through: no transaction
//! spans `save_session`/`save_server_data`/`mark_as_last`, so callers must
//! not assume the three land together. Nothing here expires; session
//! invalidation is purely server-driven.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use bbs_protocol::SessionToken;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::descriptor::ServerDescriptor;
use crate::error::Result;

#[cfg(test)]
mod tests;

const CONNECTION_SCHEMA_VERSION: u32 = 1;

/// On-disk format of the connection store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionFile {
	pub schema: u32,
	/// Address of the most recently used server.
	#[serde(default)]
	pub last_address: Option<String>,
	/// Session token per server address.
	#[serde(default)]
	pub sessions: HashMap<String, SessionToken>,
	/// Cached capability descriptor per server address.
	#[serde(default)]
	pub servers: HashMap<String, ServerDescriptor>,
}

impl Default for ConnectionFile {
	fn default() -> Self {
		Self {
			schema: CONNECTION_SCHEMA_VERSION,
			last_address: None,
			sessions: HashMap::new(),
			servers: HashMap::new(),
		}
	}
}

/// The bundle restored at process start: the last-used server plus whatever
/// was persisted for it.
#[derive(Debug, Clone)]
pub struct PersistedConnection {
	pub address: String,
	pub session: Option<SessionToken>,
	pub server: Option<ServerDescriptor>,
}

/// File-backed store of sessions and server descriptors.
#[derive(Debug)]
pub struct ConnectionStore {
	path: PathBuf,
	file: ConnectionFile,
}

impl ConnectionStore {
	/// Opens the store at `path`. A missing, unreadable, or schema-mismatched
	/// file loads as empty rather than failing; first write recreates it.
	pub fn open(path: PathBuf) -> Self {
		let file: ConnectionFile = fs::read_to_string(&path)
			.ok()
			.and_then(|content| serde_json::from_str(&content).ok())
			.unwrap_or_default();
		let file = if file.schema == CONNECTION_SCHEMA_VERSION {
			file
		} else {
			warn!(
				target: "bbs.store",
				found = file.schema,
				expected = CONNECTION_SCHEMA_VERSION,
				"connection store schema mismatch; starting empty"
			);
			ConnectionFile::default()
		};
		Self { path, file }
	}

	/// Opens the store at the default per-user config path.
	pub fn open_default() -> Self {
		Self::open(default_store_path())
	}

	/// The previously saved connection bundle, if any server was marked last.
	pub fn load_last_connection(&self) -> Option<PersistedConnection> {
		let address = self.file.last_address.clone()?;
		Some(PersistedConnection {
			session: self.file.sessions.get(&address).cloned(),
			server: self.file.servers.get(&address).cloned(),
			address,
		})
	}

	/// Session token stored for `address`, if any.
	pub fn session_for(&self, address: &str) -> Option<SessionToken> {
		self.file.sessions.get(address).cloned()
	}

	/// Cached descriptor stored for `address`, if any.
	pub fn server_data_for(&self, address: &str) -> Option<ServerDescriptor> {
		self.file.servers.get(address).cloned()
	}

	/// Stores the session token issued by the server at `address`.
	pub fn save_session(&mut self, address: &str, token: SessionToken) -> Result<()> {
		self.file.sessions.insert(address.to_owned(), token);
		self.save()
	}

	/// Caches a descriptor snapshot, keyed by its address.
	pub fn save_server_data(&mut self, descriptor: &ServerDescriptor) -> Result<()> {
		self.file
			.servers
			.insert(descriptor.address.clone(), descriptor.clone());
		self.save()
	}

	/// Marks `address` as the connection to restore on next start.
	pub fn mark_as_last(&mut self, address: &str) -> Result<()> {
		self.file.last_address = Some(address.to_owned());
		self.save()
	}

	/// Drops the session token for `address` only; cached server data stays.
	pub fn clear_session(&mut self, address: &str) -> Result<()> {
		if self.file.sessions.remove(address).is_some() {
			debug!(target: "bbs.store", %address, "cleared persisted session");
			self.save()?;
		}
		Ok(())
	}

	fn save(&self) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		let json = serde_json::to_string_pretty(&self.file)?;
		fs::write(&self.path, json)?;
		Ok(())
	}
}

fn default_store_path() -> PathBuf {
	std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
		.unwrap_or_else(|| PathBuf::from("."))
		.join("bbs/client/connections.json")
}
