//! Shutdown behavior of the input handle and the result stream.

use super::{QUIET, SETTLE, recording_fetcher};
use futures::StreamExt;
use heroes_search::SearchPipeline;
use std::sync::{Arc, Mutex};
use tokio::time::sleep;

#[tokio::test]
async fn dropping_input_drains_then_ends_the_stream() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (input, mut results) = SearchPipeline::builder()
        .quiet_period(QUIET)
        .build(recording_fetcher(Arc::clone(&calls)));

    input.push("final");
    drop(input);

    assert_eq!(results.next().await.unwrap(), vec!["final"]);
    assert_eq!(results.next().await, None);
}

#[tokio::test]
async fn dropping_input_with_nothing_pending_ends_immediately() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (input, mut results) = SearchPipeline::builder()
        .quiet_period(QUIET)
        .build(recording_fetcher(Arc::clone(&calls)));

    drop(input);
    assert_eq!(results.next().await, None);
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn cloned_inputs_feed_the_same_pipeline() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (input, mut results) = SearchPipeline::builder()
        .quiet_period(QUIET)
        .build(recording_fetcher(Arc::clone(&calls)));

    let other = input.clone();
    input.push("from");
    other.push("either");

    assert_eq!(results.recv().await.unwrap(), vec!["either"]);

    // The stream stays open until *every* handle is gone.
    drop(input);
    other.push("handle");
    assert_eq!(results.recv().await.unwrap(), vec!["handle"]);

    drop(other);
    assert_eq!(results.next().await, None);
}

#[tokio::test]
async fn pushes_after_the_stream_is_dropped_are_discarded() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let (input, results) = SearchPipeline::builder()
        .quiet_period(QUIET)
        .build(recording_fetcher(Arc::clone(&calls)));

    drop(results);
    input.push("nobody-listening");
    sleep(SETTLE).await;

    // The driver may have fetched the term before noticing the closed
    // output, but pushing never panics and nothing is delivered.
    input.push("still-fine");
    sleep(SETTLE).await;
}
