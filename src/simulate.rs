//! Simulated collaborators for the view path: content selection, the
//! artificial processing delay, and the click coin flip.

use std::time::Duration;

use rand::Rng;

/// The fixed content catalogue a view request picks from.
pub const CONTENTS: [&str; 4] = ["sports", "entertainment", "business", "education"];

/// Uniform random pick from the catalogue.
pub fn pick_content() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..CONTENTS.len());
    CONTENTS[idx]
}

/// Simulated downstream processing failed.
#[derive(Debug, PartialEq, Eq)]
pub struct ProcessingFailed;

/// Stand-in for real request processing: sleep a random 0..max delay,
/// then fail with probability `failure_pct`%. Fail-fast, no retry.
pub async fn process_request(max_latency_ms: u64, failure_pct: u8) -> Result<(), ProcessingFailed> {
    let delay_ms = if max_latency_ms == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..max_latency_ms)
    };
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    if rand::thread_rng().gen_range(0..100u8) < failure_pct {
        return Err(ProcessingFailed);
    }
    Ok(())
}

/// One coin flip per served view: did the client also click?
pub fn clicked(click_pct: u8) -> bool {
    rand::thread_rng().gen_range(0..100u8) < click_pct
}
