//! Wire types for the BBS relay JSON protocol.
//!
//! This crate contains the serde-serializable types exchanged with a BBS
//! relay server over JSON/HTTP. These types represent the "protocol layer" -
//! the shapes of data as they appear on the wire.
//!
//! Types in this crate are:
//! * Pure data: no behavior beyond serialization/deserialization, apart from
//!   the range token codec which is part of the wire format itself
//! * Tolerant: relays omit fields for features they do not support, so reply
//!   fields default rather than fail
//!
//! The stateful client built on top of these types lives in `bbs-rs`.

pub mod command;
pub mod range;
pub mod response;
pub mod types;

pub use command::*;
pub use range::*;
pub use response::*;
pub use types::*;
