//! The telemetry pipeline: per-request counters, the bounded hand-off
//! to the drain task, and the aggregated stats store it writes into.

pub mod counter;
pub mod pipeline;
pub mod store;

pub use counter::{CounterSnapshot, EventCounter};
pub use pipeline::{spawn_drain, Pipeline};
pub use store::{AggregatedRecord, StatsStore};
