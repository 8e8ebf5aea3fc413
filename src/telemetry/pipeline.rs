use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::counter::CounterSnapshot;
use super::store::StatsStore;

// ─── Hand-off side ───────────────────────────────────────────────

/// Producer end of the counter → store hand-off.
///
/// The channel is bounded (default capacity 1), so the view path
/// stalls once the slot is full and only resumes when the drain task
/// has taken a snapshot. That stall is the backpressure mechanism:
/// at most `capacity` requests can complete between two drain ticks
/// without waiting. There is no timeout on the send; if the drain
/// task stops receiving, blocked senders stay blocked.
#[derive(Clone)]
pub struct Pipeline {
    tx: mpsc::Sender<CounterSnapshot>,
}

/// Drain task stopped; nothing is receiving hand-offs any more.
#[derive(Debug, PartialEq, Eq)]
pub struct PipelineClosed;

impl Pipeline {
    /// Create the hand-off channel. The receiver goes to
    /// [`spawn_drain`], the `Pipeline` into shared state.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<CounterSnapshot>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Hand one snapshot to the drain task. Awaits until the channel
    /// has room. Callers must not hold the counter lock across this.
    pub async fn submit(&self, snapshot: CounterSnapshot) -> Result<(), PipelineClosed> {
        self.tx.send(snapshot).await.map_err(|_| PipelineClosed)
    }
}

// ─── Drain side ──────────────────────────────────────────────────

/// Spawn the single long-lived drain task.
///
/// Wakes every `tick`, receives exactly one handed-off snapshot, and
/// upserts it into the store under the snapshot's label. Missed ticks
/// are skipped rather than bursted, like a ticker whose channel drops
/// stale ticks. Exits when all producers are gone.
pub fn spawn_drain(
    store: Arc<StatsStore>,
    mut rx: mpsc::Receiver<CounterSnapshot>,
    tick: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick of a tokio interval fires immediately;
        // consume it so the first drain happens one period in.
        interval.tick().await;

        loop {
            interval.tick().await;
            match rx.recv().await {
                Some(snapshot) => {
                    store.upsert(snapshot.label, snapshot.views, snapshot.clicks);
                }
                None => break,
            }
        }
    })
}

// ─── Tests ───────────────────────────────────────────────────────
