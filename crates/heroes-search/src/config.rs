//! Configuration for the search pipeline.

use crate::events::{Listeners, SearchEvent};
use crate::{SearchInput, SearchResults};
use std::fmt;
use std::time::Duration;
use tower::Service;

/// Quiet period applied when none is configured.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Configuration for a pipeline instance.
pub struct SearchConfig {
    pub(crate) name: String,
    pub(crate) quiet_period: Duration,
    pub(crate) listeners: Listeners,
}

/// Builder for a [`SearchPipeline`](crate::SearchPipeline).
pub struct SearchConfigBuilder {
    name: String,
    quiet_period: Duration,
    listeners: Listeners,
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            name: "search".to_string(),
            quiet_period: DEFAULT_QUIET_PERIOD,
            listeners: Listeners::default(),
        }
    }

    /// Sets the name of this pipeline instance (used in events and metrics).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the quiescence interval: input must stop arriving for this long
    /// before the most recent term is forwarded to the fetch service.
    pub fn quiet_period(mut self, period: Duration) -> Self {
        self.quiet_period = period;
        self
    }

    /// Adds an event listener.
    pub fn on_event<F>(mut self, listener: F) -> Self
    where
        F: Fn(&SearchEvent) + Send + Sync + 'static,
    {
        self.listeners.add(listener);
        self
    }

    /// Builds the pipeline around the given fetch service and starts its
    /// driver task on the current tokio runtime.
    ///
    /// Returns the push handle and the result stream.
    pub fn build<S, R, E>(self, fetcher: S) -> (SearchInput, SearchResults<R>)
    where
        S: Service<String, Response = R, Error = E> + Clone + Send + 'static,
        S::Future: Send,
        R: Default + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        let config = SearchConfig {
            name: self.name,
            quiet_period: self.quiet_period,
            listeners: self.listeners,
        };
        crate::launch(config, fetcher)
    }
}
