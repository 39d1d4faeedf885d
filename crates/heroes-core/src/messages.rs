//! Append-only diagnostic message log.
//!
//! Operation outcomes are surfaced to the user interface as human-readable
//! strings. The log is process-local and grows without bound; that is an
//! accepted limitation of its scope, and [`MessageLog::clear`] exists for
//! callers that want to reset it.

use std::sync::{Arc, Mutex, MutexGuard};

/// Capability for appending diagnostic messages.
///
/// The data-access layer writes one entry per notable operation outcome
/// through this seam. [`MessageLog`] is the stock implementation; tests and
/// embedders can substitute their own.
pub trait MessageSink: Send + Sync {
    /// Appends one message.
    fn add(&self, message: String);
}

/// Shared, append-only list of diagnostic messages.
///
/// Handles are cheap to clone and append to the same underlying list, so the
/// UI can keep one handle for display while the data-access layer writes
/// through another.
#[derive(Clone, Default)]
pub struct MessageLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one message.
    pub fn add(&self, message: impl Into<String>) {
        self.lock().push(message.into());
    }

    /// Returns a copy of every entry, oldest first.
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of entries recorded so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // The log is only ever appended to or copied out; a poisoned lock cannot
    // leave an entry half-written, so recover the guard instead of panicking.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MessageSink for MessageLog {
    fn add(&self, message: String) {
        MessageLog::add(self, message);
    }
}
