//! Hero client example: fallback-on-error data access
//!
//! This example demonstrates how every transport failure degrades to a safe
//! value plus one diagnostic log entry, so calling code never branches on
//! transport errors.
//! Run with: cargo run --example hero_client

use heroes_client::{HeroClient, HttpRequest, HttpResponse};
use heroes_core::{Hero, MessageLog, TransportError};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::service_fn;

fn ok_json(body: Vec<u8>) -> HttpResponse {
    http::Response::builder().status(200).body(body).unwrap()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    println!("=== Hero Client Example ===\n");

    let log = MessageLog::new();

    // A backend that fails every other request.
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let flaky = service_fn(move |req: HttpRequest| {
        let counter = Arc::clone(&counter);
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) % 2 == 1 {
                println!("  [backend] {} {} -> connection reset", req.method(), req.uri());
                return Err(TransportError::Connection("connection reset".to_string()));
            }
            println!("  [backend] {} {} -> 200", req.method(), req.uri());
            let roster = vec![Hero::new(11, "Dr Nice"), Hero::new(13, "Bombasto")];
            Ok(ok_json(serde_json::to_vec(&roster).unwrap()))
        }
    });

    let client = HeroClient::builder()
        .message_sink(log.clone())
        .build(flaky);

    println!("--- Fetching the collection (backend up) ---");
    let heroes = client.get_heroes().await.into_value();
    println!("Got {} heroes: {heroes:?}\n", heroes.len());

    println!("--- Fetching again (backend down) ---");
    let heroes = client.get_heroes().await;
    println!(
        "Degraded to {} heroes (fallback: {})\n",
        heroes.value().len(),
        heroes.is_fallback()
    );

    println!("--- Updating a hero (backend up) ---");
    let outcome = client.update_hero(&Hero::new(11, "Dr Nicer")).await;
    println!("Update ok: {}\n", outcome.is_ok());

    println!("--- Diagnostic message log ---");
    for entry in log.snapshot() {
        println!("  {entry}");
    }
}
