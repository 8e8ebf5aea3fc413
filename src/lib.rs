pub mod config;
pub mod handlers;
pub mod limiter;
pub mod middleware;
pub mod server;
pub mod simulate;
pub mod telemetry;

use std::sync::Arc;

use tokio::sync::mpsc;

use config::Config;
use limiter::RateLimiter;
use telemetry::{CounterSnapshot, EventCounter, Pipeline, StatsStore};

/// Shared application state available to every handler via
/// `State<Arc<AppState>>`. One instance per process, built once at
/// startup; nothing here is a global.
pub struct AppState {
    /// Tunables, frozen at startup.
    pub config: Config,

    /// Process-wide view/click tally — handlers push, the drain task
    /// snapshots.
    pub counter: EventCounter,

    /// Aggregated label → {views, clicks} store, written by the drain
    /// task, read by the stats path.
    pub store: Arc<StatsStore>,

    /// Per-client admission control for the stats path.
    pub limiter: RateLimiter,

    /// Producer end of the counter → store hand-off.
    pub pipeline: Pipeline,
}

impl AppState {
    /// Build the state and its hand-off channel. The receiver must be
    /// given to [`telemetry::spawn_drain`]; until it is, view
    /// requests block once the channel fills.
    pub fn new(config: Config) -> (Arc<Self>, mpsc::Receiver<CounterSnapshot>) {
        let (pipeline, rx) = Pipeline::new(config.handoff_capacity);
        let state = Arc::new(Self {
            counter: EventCounter::new(),
            store: Arc::new(StatsStore::new()),
            limiter: RateLimiter::new(
                config.rate_limit,
                config.rate_period(),
                config.strict_window,
            ),
            pipeline,
            config,
        });
        (state, rx)
    }
}
