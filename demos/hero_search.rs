//! Hero search example: debounced, de-duplicated, latest-wins search
//!
//! Simulates a user typing into a search box and shows which keystrokes
//! actually reach the backend.
//! Run with: cargo run --example hero_search

use heroes_client::{HeroClient, HttpRequest, SearchHeroes};
use heroes_core::{Hero, MessageLog, TransportError};
use heroes_search::{SearchEvent, SearchPipeline};
use std::time::Duration;
use tokio::time::sleep;
use tower::service_fn;

#[tokio::main]
async fn main() {
    println!("=== Hero Search Example ===\n");

    let roster = vec![
        Hero::new(11, "Dr Nice"),
        Hero::new(13, "Bombasto"),
        Hero::new(15, "Magneta"),
        Hero::new(19, "Magma"),
    ];

    let backend = service_fn(move |req: HttpRequest| {
        let roster = roster.clone();
        async move {
            let term = req
                .uri()
                .query()
                .and_then(|q| q.strip_prefix("name="))
                .unwrap_or_default()
                .to_lowercase();
            println!("  [backend] searching for {term:?}");
            let matches: Vec<Hero> = roster
                .into_iter()
                .filter(|hero| hero.name.to_lowercase().contains(&term))
                .collect();
            Ok::<_, TransportError>(
                http::Response::builder()
                    .status(200)
                    .body(serde_json::to_vec(&matches).unwrap())
                    .unwrap(),
            )
        }
    });

    let log = MessageLog::new();
    let client = HeroClient::builder()
        .message_sink(log.clone())
        .build(backend);

    let (input, mut results) = SearchPipeline::builder()
        .quiet_period(Duration::from_millis(300))
        .on_event(|event: &SearchEvent| {
            println!("  [pipeline] {} {:?}", event.event_type(), event.term());
        })
        .build(SearchHeroes::new(client));

    println!("--- Typing \"mag\" quickly, then pausing ---");
    for keystroke in ["m", "ma", "mag"] {
        input.push(keystroke);
        sleep(Duration::from_millis(50)).await;
    }
    println!("Results: {:?}\n", results.recv().await.unwrap());

    println!("--- Retyping the same term (change filter) ---");
    input.push("mag");
    sleep(Duration::from_millis(400)).await;

    println!("\n--- Typing \"magne\" after a pause ---");
    input.push("magne");
    println!("Results: {:?}\n", results.recv().await.unwrap());

    println!("--- Diagnostic message log ---");
    for entry in log.snapshot() {
        println!("  {entry}");
    }
}
