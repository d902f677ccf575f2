//! Transport seam between the client and a server address.
//!
//! A transport performs exactly one request/response exchange per call: no
//! retries, no coalescing, and any timeout policy belongs to the transport
//! implementation, not the client core.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

mod fake;
mod http;

pub use fake::FakeTransport;
pub use http::HttpTransport;

/// Outcome of one exchange. Both arms carry the JSON reply body verbatim:
/// the server reports domain errors (including session invalidation) as a
/// rejected exchange with a JSON body, which the client inspects.
#[derive(Debug, Clone)]
pub enum TransportReply {
	Accepted(Value),
	Rejected(Value),
}

/// A JSON request/response exchange with a server address.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn exchange(&self, address: &str, command: Value) -> Result<TransportReply, TransportError>;
}

/// Failures below the protocol: the exchange itself did not complete with a
/// JSON body either way.
#[derive(Debug, Error)]
pub enum TransportError {
	#[error("http error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("server reply was not valid JSON: {0}")]
	Decode(#[from] serde_json::Error),
}
