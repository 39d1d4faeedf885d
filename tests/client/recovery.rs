//! The fallback-and-log policy under transport failure.

use super::{recording_transport, refusing_transport, respond};
use heroes_client::{HeroClient, HttpRequest, Recovered};
use heroes_core::{Hero, MessageLog, TransportError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::service_fn;

#[tokio::test]
async fn list_fetch_failure_yields_empty_and_one_entry() {
    let log = MessageLog::new();
    let client = HeroClient::builder()
        .message_sink(log.clone())
        .build(refusing_transport());

    let heroes = client.get_heroes().await;
    assert!(heroes.is_fallback());
    assert!(heroes.value().is_empty());

    let entries = log.snapshot();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].contains("get_heroes failed"));
}

#[tokio::test]
async fn not_found_and_network_error_share_one_shape() {
    // Same fallback value, same log pattern; callers cannot tell them apart.
    let not_found_log = MessageLog::new();
    let not_found = HeroClient::builder()
        .message_sink(not_found_log.clone())
        .build(service_fn(|_req: HttpRequest| async {
            Ok::<_, TransportError>(respond(404, b""))
        }));

    let network_log = MessageLog::new();
    let network = HeroClient::builder()
        .message_sink(network_log.clone())
        .build(refusing_transport());

    let from_404 = not_found.get_hero(99).await;
    let from_network = network.get_hero(99).await;

    assert_eq!(from_404.value(), &None);
    assert_eq!(from_network.value(), &None);
    assert!(from_404.is_fallback() && from_network.is_fallback());
    assert_eq!(not_found_log.len(), 1);
    assert_eq!(network_log.len(), 1);
    assert!(not_found_log.snapshot()[0].contains("get_hero id=99 failed"));
    assert!(network_log.snapshot()[0].contains("get_hero id=99 failed"));
}

#[tokio::test]
async fn update_failure_degrades_to_noop() {
    let log = MessageLog::new();
    let client = HeroClient::builder()
        .message_sink(log.clone())
        .build(refusing_transport());

    let outcome = client.update_hero(&Hero::new(7, "X")).await;
    assert!(outcome.is_fallback());
    assert_eq!(
        outcome.error(),
        Some(&TransportError::Connection("connection refused".to_string()))
    );
    assert!(log.snapshot()[0].contains("update_hero failed"));
}

#[tokio::test]
async fn search_failure_degrades_to_empty() {
    let log = MessageLog::new();
    let client = HeroClient::builder()
        .message_sink(log.clone())
        .build(service_fn(|_req: HttpRequest| async {
            Ok::<_, TransportError>(respond(500, b""))
        }));

    let heroes = client.search_heroes("ba").await;
    assert!(heroes.is_fallback());
    assert!(heroes.value().is_empty());
    assert!(log.snapshot()[0].ends_with("search_heroes failed: unexpected status 500"));
}

#[tokio::test]
async fn recovery_is_per_operation_not_per_client() {
    // A failure leaves the client fully usable; the next call succeeds.
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let log = MessageLog::new();

    let transport = service_fn(move |_req: HttpRequest| {
        let counter = Arc::clone(&counter);
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok::<_, TransportError>(respond(503, b""))
            } else {
                Ok(respond(200, br#"[{"id":11,"name":"Dr Nice"}]"#))
            }
        }
    });
    let client = HeroClient::builder()
        .message_sink(log.clone())
        .build(transport);

    assert!(client.get_heroes().await.is_fallback());
    let second = client.get_heroes().await;
    assert!(second.is_ok());
    assert_eq!(second.into_value(), vec![Hero::new(11, "Dr Nice")]);

    let entries = log.snapshot();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].contains("get_heroes failed"));
    assert_eq!(entries[1], "hero-client: fetched heroes");
}

#[tokio::test]
async fn recovered_error_carries_the_status() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let client = HeroClient::new(recording_transport(Arc::clone(&seen), 502, b""));

    match client.get_heroes().await {
        Recovered::Fallback { error, .. } => assert_eq!(error.status(), Some(502)),
        Recovered::Ok(_) => panic!("expected fallback"),
    }
}
