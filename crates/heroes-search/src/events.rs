//! Events emitted by the search pipeline.

use std::sync::Arc;
use std::time::Instant;

/// Events emitted as terms move through the pipeline.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// A term survived the quiescence and change filters and a fetch was
    /// started for it.
    Forwarded {
        /// Name of the pipeline instance.
        pipeline: String,
        /// The forwarded term.
        term: String,
        /// When the event occurred.
        timestamp: Instant,
    },

    /// A term survived the quiescence filter but equalled the previously
    /// forwarded term, so no fetch was started.
    DuplicateSuppressed {
        /// Name of the pipeline instance.
        pipeline: String,
        /// The suppressed term.
        term: String,
        /// When the event occurred.
        timestamp: Instant,
    },

    /// A fetch completed for the newest forwarded term and its result was
    /// delivered downstream.
    Delivered {
        /// Name of the pipeline instance.
        pipeline: String,
        /// The term the result belongs to.
        term: String,
        /// When the event occurred.
        timestamp: Instant,
    },

    /// A fetch completed after a newer term had superseded it; its result was
    /// dropped without delivery.
    StaleDiscarded {
        /// Name of the pipeline instance.
        pipeline: String,
        /// The superseded term.
        term: String,
        /// When the event occurred.
        timestamp: Instant,
    },

    /// A fetch for the newest term failed; the fallback value was delivered
    /// in its place and the pipeline kept running.
    FetchFailed {
        /// Name of the pipeline instance.
        pipeline: String,
        /// The term whose fetch failed.
        term: String,
        /// Rendered error message.
        error: String,
        /// When the event occurred.
        timestamp: Instant,
    },
}

impl SearchEvent {
    /// Returns the type of event as a short label.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Forwarded { .. } => "forwarded",
            Self::DuplicateSuppressed { .. } => "duplicate_suppressed",
            Self::Delivered { .. } => "delivered",
            Self::StaleDiscarded { .. } => "stale_discarded",
            Self::FetchFailed { .. } => "fetch_failed",
        }
    }

    /// Returns the term this event refers to.
    pub fn term(&self) -> &str {
        match self {
            Self::Forwarded { term, .. }
            | Self::DuplicateSuppressed { term, .. }
            | Self::Delivered { term, .. }
            | Self::StaleDiscarded { term, .. }
            | Self::FetchFailed { term, .. } => term,
        }
    }

    /// Returns the name of the pipeline instance that emitted this event.
    pub fn pipeline(&self) -> &str {
        match self {
            Self::Forwarded { pipeline, .. }
            | Self::DuplicateSuppressed { pipeline, .. }
            | Self::Delivered { pipeline, .. }
            | Self::StaleDiscarded { pipeline, .. }
            | Self::FetchFailed { pipeline, .. } => pipeline,
        }
    }
}

type Listener = Arc<dyn Fn(&SearchEvent) + Send + Sync>;

/// Registered event listeners.
#[derive(Clone, Default)]
pub(crate) struct Listeners {
    inner: Vec<Listener>,
}

impl Listeners {
    pub(crate) fn add<F>(&mut self, listener: F)
    where
        F: Fn(&SearchEvent) + Send + Sync + 'static,
    {
        self.inner.push(Arc::new(listener));
    }

    /// Emits an event to all registered listeners.
    ///
    /// A panicking listener is caught so the remaining listeners still run.
    pub(crate) fn emit(&self, event: &SearchEvent) {
        for listener in &self.inner {
            let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| listener(event)));
        }
    }
}
