//! Fault-tolerant data access for the heroes collection.
//!
//! [`HeroClient`] performs the read/update operations of a single REST
//! collection over any Tower HTTP transport, normalizing every transport
//! failure into a safe fallback value plus one diagnostic log entry. Calling
//! UI code never needs its own failure branch: each operation resolves to a
//! [`Recovered`] carrying a usable value either way.
//!
//! # Overview
//!
//! The transport seam is `tower::Service<http::Request<Vec<u8>>>`, so a real
//! HTTP stack, an in-memory mock, or a `tower::service_fn` closure are all
//! interchangeable:
//!
//! ```rust
//! use heroes_client::HeroClient;
//! use heroes_core::{MessageLog, TransportError};
//!
//! # async fn example() {
//! let log = MessageLog::new();
//!
//! let transport = tower::service_fn(|_req: http::Request<Vec<u8>>| async {
//!     Err::<http::Response<Vec<u8>>, _>(TransportError::Connection("refused".into()))
//! });
//!
//! let client = HeroClient::builder()
//!     .message_sink(log.clone())
//!     .build(transport);
//!
//! // Transport failures degrade to the fallback value plus one log entry.
//! let heroes = client.get_heroes().await.into_value();
//! assert!(heroes.is_empty());
//! assert!(log.snapshot()[0].ends_with("get_heroes failed: connection failed: refused"));
//! # }
//! ```
//!
//! # Error policy
//!
//! All transport failures are masked at this layer: list fetches degrade to
//! empty, single-record fetches to absent, writes to no-ops. A "not found"
//! is indistinguishable from a network error in the resulting shape. The
//! blanket swallow is deliberate; systems that need to distinguish retryable
//! from terminal failures should inspect [`Recovered::error`].

mod config;
mod recovered;
mod search;

pub use config::{DEFAULT_HEROES_URL, HeroClientConfig, HeroClientConfigBuilder};
pub use recovered::Recovered;
pub use search::SearchHeroes;

use heroes_core::{Hero, TransportError};
use http::{Method, Request, Response, header};
use std::sync::Arc;
use tower::{Service, ServiceExt};

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter};

#[cfg(feature = "metrics")]
use std::sync::Once;

#[cfg(feature = "metrics")]
static METRICS_INIT: Once = Once::new();

/// Request type a heroes transport accepts.
pub type HttpRequest = Request<Vec<u8>>;

/// Response type a heroes transport produces.
pub type HttpResponse = Response<Vec<u8>>;

/// Data-access wrapper for the heroes collection.
///
/// See the [module-level documentation](crate) for the error policy.
pub struct HeroClient<S> {
    transport: S,
    config: Arc<HeroClientConfig>,
}

impl<S> HeroClient<S> {
    /// Creates a client with default configuration.
    pub fn new(transport: S) -> Self {
        HeroClientConfigBuilder::new().build(transport)
    }

    pub(crate) fn new_with_config(transport: S, config: HeroClientConfig) -> Self {
        #[cfg(feature = "metrics")]
        METRICS_INIT.call_once(|| {
            describe_counter!(
                "hero_client_operations_total",
                "Data-access operations by outcome"
            );
        });

        Self {
            transport,
            config: Arc::new(config),
        }
    }
}

impl HeroClient<()> {
    /// Creates a new builder for configuring a client.
    pub fn builder() -> HeroClientConfigBuilder {
        HeroClientConfigBuilder::new()
    }
}

impl<S: Clone> Clone for HeroClient<S> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> HeroClient<S>
where
    S: Service<HttpRequest, Response = HttpResponse, Error = TransportError> + Clone,
{
    /// Fetches every hero in the collection.
    ///
    /// Falls back to the empty list on transport failure.
    pub async fn get_heroes(&self) -> Recovered<Vec<Hero>> {
        let attempt = async {
            let body = self
                .send(Method::GET, self.config.heroes_url.clone(), None)
                .await?;
            let heroes: Vec<Hero> = decode(&body)?;
            self.log("fetched heroes");
            Ok(heroes)
        }
        .await;
        self.recover("get_heroes", Vec::new(), attempt)
    }

    /// Fetches one hero by id.
    ///
    /// Falls back to `None` on transport failure; a 404 and a network error
    /// produce the same shape.
    pub async fn get_hero(&self, id: u64) -> Recovered<Option<Hero>> {
        let attempt = async {
            let url = format!("{}/{id}", self.config.heroes_url);
            let body = self.send(Method::GET, url, None).await?;
            let hero: Hero = decode(&body)?;
            self.log(format!("fetched hero id={id}"));
            Ok(Some(hero))
        }
        .await;
        let operation = format!("get_hero id={id}");
        self.recover(&operation, None, attempt)
    }

    /// Replaces a hero record on the server.
    ///
    /// Issues a `PUT` of the full record to the collection endpoint with a
    /// JSON content type. Falls back to a no-op on transport failure.
    pub async fn update_hero(&self, hero: &Hero) -> Recovered<()> {
        let attempt = async {
            let body = encode(hero)?;
            self.send(Method::PUT, self.config.heroes_url.clone(), Some(body))
                .await?;
            self.log(format!("updated hero id={}", hero.id));
            Ok(())
        }
        .await;
        self.recover("update_hero", (), attempt)
    }

    /// Creates a hero; the server assigns the id and echoes the record.
    ///
    /// Falls back to `None` on transport failure.
    pub async fn add_hero(&self, name: &str) -> Recovered<Option<Hero>> {
        let attempt = async {
            let body = encode(&serde_json::json!({ "name": name }))?;
            let response = self
                .send(Method::POST, self.config.heroes_url.clone(), Some(body))
                .await?;
            let hero: Hero = decode(&response)?;
            self.log(format!("added hero id={}", hero.id));
            Ok(Some(hero))
        }
        .await;
        self.recover("add_hero", None, attempt)
    }

    /// Deletes a hero by id.
    ///
    /// Falls back to a no-op on transport failure.
    pub async fn delete_hero(&self, id: u64) -> Recovered<()> {
        let attempt = async {
            let url = format!("{}/{id}", self.config.heroes_url);
            self.send(Method::DELETE, url, None).await?;
            self.log(format!("deleted hero id={id}"));
            Ok(())
        }
        .await;
        self.recover("delete_hero", (), attempt)
    }

    /// Fetches heroes whose name matches the term.
    ///
    /// A blank term resolves to the empty list without touching the backend;
    /// the endpoint itself is free to treat an empty query differently.
    /// Falls back to the empty list on transport failure.
    pub async fn search_heroes(&self, term: &str) -> Recovered<Vec<Hero>> {
        if term.trim().is_empty() {
            return Recovered::Ok(Vec::new());
        }
        let attempt = async {
            let url = format!(
                "{}/?name={}",
                self.config.heroes_url,
                urlencoding::encode(term)
            );
            let body = self.send(Method::GET, url, None).await?;
            let heroes: Vec<Hero> = decode(&body)?;
            if heroes.is_empty() {
                self.log(format!("no heroes matching \"{term}\""));
            } else {
                self.log(format!("found heroes matching \"{term}\""));
            }
            Ok(heroes)
        }
        .await;
        self.recover("search_heroes", Vec::new(), attempt)
    }

    /// Issues one request and returns the response body on success status.
    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, TransportError> {
        let mut request = Request::builder().method(method).uri(url.as_str());
        if body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(body.unwrap_or_default())
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let response = self.transport.clone().oneshot(request).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        Ok(response.into_body())
    }

    /// Shared recovery policy: every failed operation is logged once and
    /// resolved to its fallback value.
    fn recover<T>(
        &self,
        operation: &str,
        fallback: T,
        attempt: Result<T, TransportError>,
    ) -> Recovered<T> {
        match attempt {
            Ok(value) => {
                #[cfg(feature = "metrics")]
                counter!(
                    "hero_client_operations_total",
                    "client" => self.config.name.clone(),
                    "result" => "ok"
                )
                .increment(1);

                Recovered::Ok(value)
            }
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    client = %self.config.name,
                    operation = operation,
                    error = %error,
                    "operation failed; substituting fallback"
                );

                #[cfg(feature = "metrics")]
                counter!(
                    "hero_client_operations_total",
                    "client" => self.config.name.clone(),
                    "result" => "fallback"
                )
                .increment(1);

                self.log(format!("{operation} failed: {error}"));
                Recovered::Fallback {
                    value: fallback,
                    error,
                }
            }
        }
    }

    fn log(&self, message: impl Into<String>) {
        let message = message.into();

        #[cfg(feature = "tracing")]
        tracing::debug!(client = %self.config.name, "{}", message);

        self.config
            .sink
            .add(format!("{}: {}", self.config.name, message));
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, TransportError> {
    serde_json::from_slice(body).map_err(|e| TransportError::Decode(e.to_string()))
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, TransportError> {
    serde_json::to_vec(value).map_err(|e| TransportError::Request(e.to_string()))
}
