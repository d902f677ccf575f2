//! Error taxonomy for the client core.
//!
//! Nothing here is fatal: `NotConnected` and `SessionInvalid` are recovered
//! inside [`ProtocolClient::send`](crate::client::ProtocolClient::send) (the
//! caller only sees which recovery ran), and `Domain` hands the server's
//! error body back as data for the caller to display.

use bbs_protocol::ErrorEnvelope;
use thiserror::Error;

pub type Result<T, E = BbsError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BbsError {
	/// A command was sent with no active server address. The client has
	/// already redirected to the server-selection view.
	#[error("not connected to a server")]
	NotConnected,

	/// The server rejected our session token. The client has already cleared
	/// local and persisted session state and redirected to the login view;
	/// a caller's domain-error arm never matches this.
	#[error("session invalid; re-login required")]
	SessionInvalid,

	/// Any other server-reported error, surfaced verbatim.
	#[error("server error: {}", .0.message())]
	Domain(ErrorEnvelope),

	#[error("transport failure: {0}")]
	Transport(#[from] crate::transport::TransportError),

	/// A command or reply failed to (de)serialize.
	#[error("protocol codec error: {0}")]
	Codec(#[from] serde_json::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
