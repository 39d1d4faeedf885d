//! Core types shared across the heroes client toolkit.
//!
//! This crate holds the pieces the data-access and search crates are built
//! around:
//!
//! - [`Hero`], the wire-level resource record
//! - [`TransportError`], the one error kind the toolkit recovers from
//! - [`MessageLog`] and [`MessageSink`], the append-only diagnostic log that
//!   surfaces operation outcomes to the user interface
//!
//! Nothing here performs I/O. The transport itself is supplied to the other
//! crates as a `tower::Service`, and the message sink is supplied as a
//! [`MessageSink`] implementation, so both seams can be replaced wholesale in
//! tests.

pub mod error;
pub mod hero;
pub mod messages;

pub use error::TransportError;
pub use hero::Hero;
pub use messages::{MessageLog, MessageSink};
