//! In-memory transport for exercising the client without a server.
//!
//! Scripted replies are consumed in FIFO order and every outgoing exchange is
//! recorded, so a test can both drive the client and assert on exactly what
//! crossed the wire.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{Transport, TransportError, TransportReply};

/// A scripted, recording [`Transport`].
///
/// Running out of script is a test bug and panics with the command that had
/// no reply.
#[derive(Debug, Default)]
pub struct FakeTransport {
	script: Mutex<VecDeque<TransportReply>>,
	sent: Mutex<Vec<(String, Value)>>,
}

impl FakeTransport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues an accepted exchange carrying `body`.
	pub fn push_accept(&self, body: Value) {
		self.script.lock().push_back(TransportReply::Accepted(body));
	}

	/// Queues a rejected exchange carrying `body`.
	pub fn push_reject(&self, body: Value) {
		self.script.lock().push_back(TransportReply::Rejected(body));
	}

	/// Every `(address, command)` pair exchanged so far, in order.
	pub fn sent(&self) -> Vec<(String, Value)> {
		self.sent.lock().clone()
	}

	/// Number of exchanges performed.
	pub fn exchange_count(&self) -> usize {
		self.sent.lock().len()
	}
}

#[async_trait]
impl Transport for FakeTransport {
	async fn exchange(&self, address: &str, command: Value) -> Result<TransportReply, TransportError> {
		self.sent.lock().push((address.to_owned(), command.clone()));
		let reply = self.script.lock().pop_front();
		match reply {
			Some(reply) => Ok(reply),
			None => panic!("FakeTransport script exhausted; unexpected command: {command}"),
		}
	}
}
