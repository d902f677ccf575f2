//! JSON-over-HTTP transport backed by reqwest.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{Transport, TransportError, TransportReply};

/// POSTs each command to the server address as a JSON body.
///
/// A 2xx status is an accepted exchange; any other status with a JSON body is
/// a rejected one (the BBS protocol reports errors that way). Timeouts, if
/// wanted, are configured on the underlying [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
	http: reqwest::Client,
}

impl HttpTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Wraps a preconfigured client (proxies, timeouts, user agent).
	pub fn with_client(http: reqwest::Client) -> Self {
		Self { http }
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn exchange(&self, address: &str, command: Value) -> Result<TransportReply, TransportError> {
		let response = self.http.post(address).json(&command).send().await?;
		let status = response.status();
		let body: Value = serde_json::from_slice(&response.bytes().await?)?;

		debug!(target: "bbs.transport", %address, %status, "exchange complete");
		if status.is_success() {
			Ok(TransportReply::Accepted(body))
		} else {
			Ok(TransportReply::Rejected(body))
		}
	}
}
