//! The resource record served by the heroes collection endpoint.

use serde::{Deserialize, Serialize};

/// A single hero record.
///
/// The `id` is assigned by the server and never changes once issued; the
/// `name` is the only mutable field. On the wire this is the JSON object
/// `{"id": <number>, "name": "<string>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hero {
    /// Server-assigned unique identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
}

impl Hero {
    /// Creates a hero record with the given id and name.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
