//! Comprehensive tests for heroes-client, organized into:
//!
//! - **operations**: request shapes and success logging per operation
//! - **recovery**: the fallback-and-log policy under transport failure

mod recovery;

use heroes_client::{HttpRequest, HttpResponse};
use heroes_core::TransportError;
use http::header;
use std::sync::{Arc, Mutex};
use tower::service_fn;

/// One request as seen by a test transport.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub uri: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

pub fn respond(status: u16, body: &[u8]) -> HttpResponse {
    http::Response::builder()
        .status(status)
        .body(body.to_vec())
        .unwrap()
}

/// Transport double that records every request and answers with a fixed
/// status and body.
pub fn recording_transport(
    seen: Arc<Mutex<Vec<Seen>>>,
    status: u16,
    body: &'static [u8],
) -> impl tower::Service<HttpRequest, Response = HttpResponse, Error = TransportError>
+ Clone
+ Send
+ Sync
+ 'static {
    service_fn(move |req: HttpRequest| {
        let seen = Arc::clone(&seen);
        async move {
            seen.lock().unwrap().push(Seen {
                method: req.method().to_string(),
                uri: req.uri().to_string(),
                content_type: req
                    .headers()
                    .get(header::CONTENT_TYPE)
                    .map(|v| v.to_str().unwrap().to_string()),
                body: req.body().clone(),
            });
            Ok::<_, TransportError>(respond(status, body))
        }
    })
}

/// Transport double that fails every request before reaching a server.
pub fn refusing_transport()
-> impl tower::Service<HttpRequest, Response = HttpResponse, Error = TransportError>
+ Clone
+ Send
+ Sync
+ 'static {
    service_fn(|_req: HttpRequest| async {
        Err::<HttpResponse, _>(TransportError::Connection("connection refused".to_string()))
    })
}
