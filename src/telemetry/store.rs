use std::collections::HashMap;

use parking_lot::Mutex;
use serde::Serialize;

// ─── Public types ────────────────────────────────────────────────

/// One aggregated entry per label. The numeric values are serialized
/// as strings, field names capitalised, matching the wire format the
/// stats consumers already expect.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AggregatedRecord {
    #[serde(rename = "Views")]
    pub views: String,
    #[serde(rename = "Clicks")]
    pub clicks: String,
}

/// In-process label → aggregate mapping.
/// Written only by the drain task, read by the stats query path,
/// under its own mutex (separate from the counter lock).
pub struct StatsStore {
    inner: Mutex<HashMap<String, AggregatedRecord>>,
}

// ─── StatsStore impl ─────────────────────────────────────────────

impl StatsStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Upsert the aggregate under `label`. Same-second collisions for
    /// the same content overwrite: last writer wins.
    pub fn upsert(&self, label: String, views: u64, clicks: u64) {
        self.inner.lock().insert(
            label,
            AggregatedRecord {
                views: views.to_string(),
                clicks: clicks.to_string(),
            },
        );
    }

    /// Clone of the current aggregated state, for the query path.
    pub fn snapshot(&self) -> HashMap<String, AggregatedRecord> {
        self.inner.lock().clone()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }
}

impl Default for StatsStore {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_serializes_counts_as_strings() {
        let store = StatsStore::new();
        store.upsert("sports 2024/03/07 09:05:02 ".into(), 12, 7);

        let snap = store.snapshot();
        let record = &snap["sports 2024/03/07 09:05:02 "];
        assert_eq!(record.views, "12");
        assert_eq!(record.clicks, "7");

        let json = serde_json::to_string(record).unwrap();
        assert_eq!(json, r#"{"Views":"12","Clicks":"7"}"#);
    }

    #[test]
    fn same_label_last_writer_wins() {
        let store = StatsStore::new();
        let label = "business 2024/03/07 09:05:02 ";
        store.upsert(label.into(), 1, 0);
        store.upsert(label.into(), 5, 3);

        assert_eq!(store.len(), 1);
        let snap = store.snapshot();
        assert_eq!(snap[label].views, "5");
        assert_eq!(snap[label].clicks, "3");
    }
}
