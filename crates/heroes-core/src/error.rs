//! Error type for transport-level failures.

use thiserror::Error;

/// A failure while talking to the backend.
///
/// This is the only error kind the toolkit recovers from: every variant is
/// eligible for the fallback-and-log policy applied by the data-access layer.
/// Anything else (programming errors, panics) is out of scope and propagates
/// normally.
///
/// The type is `Clone` so a recovery path can both record the error and hand
/// it back alongside the substituted fallback value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be constructed (for example, the configured
    /// collection URL does not parse).
    #[error("request could not be built: {0}")]
    Request(String),

    /// The connection failed before a response was produced.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// Returns the HTTP status code, if this failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }

    /// Returns `true` for failures that never reached the server.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
