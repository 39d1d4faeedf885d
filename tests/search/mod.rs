//! Comprehensive tests for heroes-search, organized into:
//!
//! - **debounce**: the quiescence filter
//! - **distinct**: the change filter
//! - **latest_wins**: supersession of in-flight fetches
//! - **recovery**: fallback delivery on fetch failure
//! - **lifecycle**: input/stream shutdown behavior

mod lifecycle;

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::service_fn;

/// Quiet period used across this suite; short enough to keep the suite fast,
/// long enough that back-to-back pushes land well inside one window.
pub const QUIET: Duration = Duration::from_millis(25);

/// A pause comfortably longer than [`QUIET`].
pub const SETTLE: Duration = Duration::from_millis(100);

/// Fetcher double that records each forwarded term and echoes it back as a
/// single-element result list.
pub fn recording_fetcher(
    calls: Arc<Mutex<Vec<String>>>,
) -> impl tower::Service<String, Response = Vec<String>, Error = std::convert::Infallible, Future: Send>
+ Clone
+ Send
+ 'static {
    service_fn(move |term: String| {
        let calls = Arc::clone(&calls);
        async move {
            calls.lock().unwrap().push(term.clone());
            Ok::<_, std::convert::Infallible>(vec![term])
        }
    })
}
