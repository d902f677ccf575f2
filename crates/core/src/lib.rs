//! Client core for the BBS relay JSON protocol.
//!
//! This crate is the connection/session/capability-negotiation core of a BBS
//! client. It discovers what a server supports ([`negotiate`]), keeps session
//! state alive across process restarts ([`store`]), stamps session tokens
//! onto outgoing commands and intercepts server-side session invalidation
//! ([`client`]), and orchestrates restore/connect/login transitions
//! ([`lifecycle`]).
//!
//! Everything presentational is an external collaborator: views implement
//! [`Navigator`] and call into the core with plain data. The core never
//! renders anything and never installs a tracing subscriber.
//!
//! # Composition
//!
//! Build exactly one [`ProtocolClient`] at the application's composition root
//! and share it by `Arc`; there is no global instance.
//!
//! ```ignore
//! let store = Arc::new(Mutex::new(ConnectionStore::open_default()));
//! let navigator: Arc<dyn Navigator> = Arc::new(MyViews::new());
//! let client = Arc::new(ProtocolClient::new(
//!     Arc::new(HttpTransport::new()),
//!     Arc::clone(&store),
//!     Arc::clone(&navigator),
//! ));
//! let lifecycle = SessionLifecycle::new(client, store, navigator);
//! lifecycle.restore_on_start();
//! ```

pub mod client;
pub mod descriptor;
pub mod error;
pub mod lifecycle;
pub mod navigate;
pub mod negotiate;
pub mod store;
pub mod transport;

pub use bbs_protocol as protocol;

pub use client::ProtocolClient;
pub use descriptor::{AccessMap, Layout, ServerDescriptor};
pub use error::{BbsError, Result};
pub use lifecycle::SessionLifecycle;
pub use navigate::{Navigator, RecordingNavigator, Route};
pub use store::{ConnectionStore, PersistedConnection};
pub use transport::{FakeTransport, HttpTransport, Transport, TransportError, TransportReply};
