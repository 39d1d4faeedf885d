//! Search-as-you-type pipeline for Tower fetch services.
//!
//! Turns a bursty, high-frequency stream of raw search terms into a
//! well-behaved sequence of fetches and results:
//!
//! 1. **Quiescence filter**: a term is forwarded only once input has stopped
//!    arriving for the configured quiet period (300 ms by default); only the
//!    most recent term of each burst survives.
//! 2. **Change filter**: a surviving term equal to the previously forwarded
//!    term is suppressed, so unchanged input never refetches.
//! 3. **Latest-wins fetch**: each surviving term starts an asynchronous
//!    fetch; if a newer term is forwarded while an older fetch is still in
//!    flight, the older result is discarded when it eventually arrives.
//!
//! A fetch failure does not terminate the pipeline: the fallback value
//! (`Default::default()`) is delivered for the failed term and the pipeline
//! keeps processing input.
//!
//! # Example
//!
//! ```rust
//! use futures::StreamExt;
//! use heroes_search::SearchPipeline;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let fetcher = tower::service_fn(|term: String| async move {
//!     Ok::<_, std::convert::Infallible>(vec![format!("match for {term}")])
//! });
//!
//! let (input, mut results) = SearchPipeline::builder()
//!     .quiet_period(Duration::from_millis(300))
//!     .build(fetcher);
//!
//! // Push raw keystrokes at any rate; only settled terms reach the fetcher.
//! input.push("b");
//! input.push("ba");
//!
//! if let Some(matches) = results.next().await {
//!     println!("{matches:?}");
//! }
//! # }
//! ```
//!
//! # Cancellation
//!
//! Superseded fetches are cancelled cooperatively: the pipeline stops
//! listening for their completion and never applies their result, even when
//! the underlying operation cannot be aborted. A fetch that never completes
//! occupies its slot indefinitely; no timeout is imposed here.

mod config;
mod events;

pub use config::{DEFAULT_QUIET_PERIOD, SearchConfig, SearchConfigBuilder};
pub use events::SearchEvent;

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::time;
use tower::{Service, ServiceExt};

#[cfg(feature = "metrics")]
use metrics::{counter, describe_counter};

#[cfg(feature = "metrics")]
use std::sync::Once;

#[cfg(feature = "metrics")]
static METRICS_INIT: Once = Once::new();

/// Entry point for building a search pipeline.
///
/// See the [module-level documentation](crate) for the transformation chain.
pub struct SearchPipeline;

impl SearchPipeline {
    /// Creates a new builder for configuring a pipeline.
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::new()
    }

    /// Builds a pipeline with default settings around the given fetch
    /// service and starts it on the current tokio runtime.
    pub fn spawn<S, R, E>(fetcher: S) -> (SearchInput, SearchResults<R>)
    where
        S: Service<String, Response = R, Error = E> + Clone + Send + 'static,
        S::Future: Send,
        R: Default + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        SearchConfigBuilder::new().build(fetcher)
    }
}

/// Push handle for raw search terms.
///
/// `push` never blocks and may be called at arbitrary frequency, including
/// with empty strings; the pipeline, not the caller, decides what survives.
/// Dropping every handle closes the input; the pipeline then drains any
/// pending term and in-flight fetch before ending the result stream.
#[derive(Clone)]
pub struct SearchInput {
    tx: mpsc::UnboundedSender<String>,
}

impl SearchInput {
    /// Pushes one raw term into the pipeline.
    ///
    /// Terms pushed after the result stream has been dropped are discarded.
    pub fn push(&self, term: impl Into<String>) {
        let _ = self.tx.send(term.into());
    }
}

/// Stream of results, one per surviving term.
///
/// Dropping the stream stops the pipeline.
pub struct SearchResults<R> {
    rx: mpsc::UnboundedReceiver<R>,
}

impl<R> SearchResults<R> {
    /// Receives the next result, or `None` once the pipeline has shut down.
    pub async fn recv(&mut self) -> Option<R> {
        self.rx.recv().await
    }
}

impl<R> futures::Stream for SearchResults<R> {
    type Item = R;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

/// A completed fetch, stamped with the generation it was issued under.
struct Fetched<R, E> {
    generation: u64,
    term: String,
    result: Result<R, E>,
}

pub(crate) fn launch<S, R, E>(config: SearchConfig, fetcher: S) -> (SearchInput, SearchResults<R>)
where
    S: Service<String, Response = R, Error = E> + Clone + Send + 'static,
    S::Future: Send,
    R: Default + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    #[cfg(feature = "metrics")]
    METRICS_INIT.call_once(|| {
        describe_counter!(
            "search_pipeline_events_total",
            "Pipeline outcomes (forwarded, suppressed, delivered, discarded, failed) by event type"
        );
    });

    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (out_tx, out_rx) = mpsc::unbounded_channel();

    tokio::spawn(drive(fetcher, Arc::new(config), input_rx, out_tx));

    (SearchInput { tx: input_tx }, SearchResults { rx: out_rx })
}

fn emit(config: &SearchConfig, event: SearchEvent) {
    #[cfg(feature = "metrics")]
    counter!(
        "search_pipeline_events_total",
        "pipeline" => config.name.clone(),
        "event" => event.event_type()
    )
    .increment(1);

    config.listeners.emit(&event);
}

/// Driver loop: owns the pending slot, the last-forwarded term, and the
/// generation counter; multiplexes input, the quiescence timer, and fetch
/// completions.
async fn drive<S, R, E>(
    fetcher: S,
    config: Arc<SearchConfig>,
    mut input: mpsc::UnboundedReceiver<String>,
    out: mpsc::UnboundedSender<R>,
) where
    S: Service<String, Response = R, Error = E> + Clone + Send + 'static,
    S::Future: Send,
    R: Default + Send + 'static,
    E: fmt::Display + Send + 'static,
{
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Fetched<R, E>>();

    let mut pending: Option<String> = None;
    let mut last_forwarded: Option<String> = None;
    let mut generation: u64 = 0;
    let mut in_flight: usize = 0;
    let mut input_open = true;

    let mut timer = std::pin::pin!(time::sleep(config.quiet_period));

    loop {
        if !input_open && pending.is_none() && in_flight == 0 {
            break;
        }

        tokio::select! {
            biased;

            received = input.recv(), if input_open => match received {
                Some(term) => {
                    // One-slot buffer: each keystroke replaces the pending
                    // term and re-arms the quiescence timer.
                    pending = Some(term);
                    timer.as_mut().reset(time::Instant::now() + config.quiet_period);
                }
                None => input_open = false,
            },

            () = timer.as_mut(), if pending.is_some() => {
                let Some(term) = pending.take() else { continue };

                if last_forwarded.as_deref() == Some(term.as_str()) {
                    emit(&config, SearchEvent::DuplicateSuppressed {
                        pipeline: config.name.clone(),
                        term,
                        timestamp: Instant::now(),
                    });
                    continue;
                }

                generation += 1;
                in_flight += 1;
                last_forwarded = Some(term.clone());

                #[cfg(feature = "tracing")]
                tracing::debug!(pipeline = %config.name, term = %term, "forwarding term to fetch");

                emit(&config, SearchEvent::Forwarded {
                    pipeline: config.name.clone(),
                    term: term.clone(),
                    timestamp: Instant::now(),
                });

                let fetcher = fetcher.clone();
                let done = done_tx.clone();
                let stamped = generation;
                tokio::spawn(async move {
                    let result = fetcher.oneshot(term.clone()).await;
                    let _ = done.send(Fetched { generation: stamped, term, result });
                });
            },

            Some(fetched) = done_rx.recv(), if in_flight > 0 => {
                in_flight -= 1;

                // Latest-wins: only the newest generation's result is applied.
                if fetched.generation != generation {
                    emit(&config, SearchEvent::StaleDiscarded {
                        pipeline: config.name.clone(),
                        term: fetched.term,
                        timestamp: Instant::now(),
                    });
                    continue;
                }

                let delivered = match fetched.result {
                    Ok(value) => {
                        emit(&config, SearchEvent::Delivered {
                            pipeline: config.name.clone(),
                            term: fetched.term,
                            timestamp: Instant::now(),
                        });
                        out.send(value)
                    }
                    Err(error) => {
                        let message = error.to_string();

                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            pipeline = %config.name,
                            term = %fetched.term,
                            error = %message,
                            "fetch failed; delivering fallback"
                        );

                        emit(&config, SearchEvent::FetchFailed {
                            pipeline: config.name.clone(),
                            term: fetched.term,
                            error: message,
                            timestamp: Instant::now(),
                        });
                        out.send(R::default())
                    }
                };

                if delivered.is_err() {
                    // Result stream dropped; nobody is listening anymore.
                    break;
                }
            },
        }
    }
}
