use chrono::{DateTime, Local};
use parking_lot::Mutex;

// ─── Public types ────────────────────────────────────────────────

/// Process-wide view/click tally.
/// Request handlers call `record_view` / `record_click`, the drain
/// task consumes `snapshot()`s.
///
/// One coarse mutex over the whole record: views, clicks and the
/// last-selected label are always read and written together, so any
/// snapshot is internally consistent.
pub struct EventCounter {
    inner: Mutex<Inner>,
}

/// An atomically-read copy of the counter at one point in time,
/// handed to the aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub views: u64,
    pub clicks: u64,
    pub label: String,
}

struct Inner {
    views: u64,
    clicks: u64,
    selected_key: String,
}

// ─── EventCounter impl ───────────────────────────────────────────

impl EventCounter {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                views: 0,
                clicks: 0,
                selected_key: String::new(),
            }),
        }
    }

    /// Count one served view and remember the per-second label it
    /// was served under. Returns the label for the caller's hand-off.
    pub fn record_view(&self, content: &str) -> String {
        let key = bucket_label(content, Local::now());
        let mut inner = self.inner.lock();
        inner.views += 1;
        inner.selected_key = key.clone();
        key
    }

    /// Count one simulated click.
    pub fn record_click(&self) {
        self.inner.lock().clicks += 1;
    }

    /// Read (views, clicks, label) in a single critical section.
    pub fn snapshot(&self) -> CounterSnapshot {
        let inner = self.inner.lock();
        CounterSnapshot {
            views: inner.views,
            clicks: inner.clicks,
            label: inner.selected_key.clone(),
        }
    }
}

impl Default for EventCounter {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Label computation ───────────────────────────────────────────

/// Per-second bucket key: `"<content> <Y>/<m>/<d> <H>:<M>:<S> "`.
/// The trailing space is part of the key. Two views of the same
/// content within one second map to the same label.
pub fn bucket_label(content: &str, at: DateTime<Local>) -> String {
    format!("{content} {} ", at.format("%Y/%m/%d %H:%M:%S"))
}

// ─── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    #[test]
    fn label_is_a_per_second_bucket() {
        let t = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(bucket_label("sports", t), "sports 2024/03/07 09:05:02 ");

        // Same second, different sub-second instants → same label.
        let t2 = t + chrono::Duration::milliseconds(999);
        assert_eq!(bucket_label("sports", t), bucket_label("sports", t2));

        // Next second → new bucket.
        let t3 = t + chrono::Duration::seconds(1);
        assert_ne!(bucket_label("sports", t), bucket_label("sports", t3));
    }

    #[test]
    fn snapshot_reflects_recorded_events() {
        let counter = EventCounter::new();
        let label = counter.record_view("business");
        counter.record_click();
        counter.record_click();

        let snap = counter.snapshot();
        assert_eq!(snap.views, 1);
        assert_eq!(snap.clicks, 2);
        assert_eq!(snap.label, label);
    }

    #[test]
    fn concurrent_updates_lose_nothing() {
        const THREADS: usize = 8;
        const PER_THREAD: u64 = 1_000;

        let counter = Arc::new(EventCounter::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let counter = counter.clone();
                std::thread::spawn(move || {
                    for _ in 0..PER_THREAD {
                        counter.record_view("education");
                        counter.record_click();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = counter.snapshot();
        assert_eq!(snap.views, THREADS as u64 * PER_THREAD);
        assert_eq!(snap.clicks, THREADS as u64 * PER_THREAD);
    }
}
