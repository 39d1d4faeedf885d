//! Configuration for the hero client.

use crate::HeroClient;
use heroes_core::{MessageLog, MessageSink};
use std::sync::Arc;

/// Collection URL applied when none is configured.
///
/// Origin-form (leading slash) so it parses as an `http::Uri` path; a real
/// deployment can configure an absolute URL instead.
pub const DEFAULT_HEROES_URL: &str = "/api/heroes";

/// Configuration for a [`HeroClient`].
pub struct HeroClientConfig {
    pub(crate) name: String,
    pub(crate) heroes_url: String,
    pub(crate) sink: Arc<dyn MessageSink>,
}

/// Builder for constructing a [`HeroClient`].
pub struct HeroClientConfigBuilder {
    name: String,
    heroes_url: String,
    sink: Option<Arc<dyn MessageSink>>,
}

impl Default for HeroClientConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeroClientConfigBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            name: "hero-client".to_string(),
            heroes_url: DEFAULT_HEROES_URL.to_string(),
            sink: None,
        }
    }

    /// Sets the source name used to prefix diagnostic entries.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the collection endpoint URL.
    pub fn collection_url(mut self, url: impl Into<String>) -> Self {
        self.heroes_url = url.into();
        self
    }

    /// Sets the diagnostic message sink.
    ///
    /// Pass a clone of your [`MessageLog`] to keep a readable handle; when no
    /// sink is configured a fresh, unobserved log is used.
    pub fn message_sink<M>(mut self, sink: M) -> Self
    where
        M: MessageSink + 'static,
    {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Builds the client around the given transport.
    pub fn build<S>(self, transport: S) -> HeroClient<S> {
        let config = HeroClientConfig {
            name: self.name,
            heroes_url: self.heroes_url,
            sink: self
                .sink
                .unwrap_or_else(|| Arc::new(MessageLog::new())),
        };
        HeroClient::new_with_config(transport, config)
    }
}
