//! Bounded, process-lifetime record of recent successful selections.

use std::collections::VecDeque;

use pricescout_core::LedgerEntry;
use tokio::sync::Mutex;

/// Maximum number of entries retained; older entries are evicted first.
pub const HISTORY_LIMIT: usize = 200;

/// Fixed-capacity ring buffer of [`LedgerEntry`] values in insertion order.
///
/// All access goes through one mutex, so eviction and ordering stay
/// consistent under concurrent appends and readers always see a whole
/// snapshot. Share it between tasks with an `Arc`.
#[derive(Debug)]
pub struct ActivityLedger {
    entries: Mutex<VecDeque<LedgerEntry>>,
}

impl ActivityLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(HISTORY_LIMIT)),
        }
    }

    /// Appends an entry, evicting the oldest one when at capacity.
    pub async fn append(&self, entry: LedgerEntry) {
        let mut entries = self.entries.lock().await;
        while entries.len() >= HISTORY_LIMIT {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Returns up to `limit` entries, newest first.
    ///
    /// `limit` is clamped to `[1, HISTORY_LIMIT]`. The returned entries are
    /// clones; mutating them does not touch the ledger.
    pub async fn recent(&self, limit: usize) -> Vec<LedgerEntry> {
        let limit = limit.clamp(1, HISTORY_LIMIT);
        let entries = self.entries.lock().await;
        entries.iter().rev().take(limit).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Default for ActivityLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use pricescout_core::{Region, SearchMode};

    use super::*;

    fn entry(n: usize) -> LedgerEntry {
        LedgerEntry {
            timestamp: Utc::now(),
            query: format!("query {n}"),
            region: Region::Uk,
            mode: SearchMode::RetailFallback,
            title: format!("Offer {n}"),
            price_value: 1.0,
            price_raw: format!("£{n}.00"),
            source: None,
        }
    }

    #[tokio::test]
    async fn starts_empty() {
        let ledger = ActivityLedger::new();
        assert!(ledger.is_empty().await);
        assert!(ledger.recent(50).await.is_empty());
    }

    #[tokio::test]
    async fn recent_is_newest_first() {
        let ledger = ActivityLedger::new();
        for n in 0..3 {
            ledger.append(entry(n)).await;
        }
        let titles: Vec<String> = ledger
            .recent(10)
            .await
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Offer 2", "Offer 1", "Offer 0"]);
    }

    #[tokio::test]
    async fn overflow_evicts_oldest() {
        let ledger = ActivityLedger::new();
        for n in 0..=HISTORY_LIMIT {
            ledger.append(entry(n)).await;
        }
        assert_eq!(ledger.len().await, HISTORY_LIMIT);

        let newest = ledger.recent(1).await;
        assert_eq!(newest.len(), 1);
        assert_eq!(newest[0].title, format!("Offer {HISTORY_LIMIT}"));

        let all = ledger.recent(HISTORY_LIMIT).await;
        assert_eq!(all.last().map(|e| e.title.as_str()), Some("Offer 1"));
        assert!(all.iter().all(|e| e.title != "Offer 0"));
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let ledger = ActivityLedger::new();
        for n in 0..5 {
            ledger.append(entry(n)).await;
        }
        assert_eq!(ledger.recent(0).await.len(), 1);
        assert_eq!(ledger.recent(usize::MAX).await.len(), 5);
    }

    #[tokio::test]
    async fn returned_entries_are_copies() {
        let ledger = ActivityLedger::new();
        ledger.append(entry(0)).await;

        let mut snapshot = ledger.recent(1).await;
        snapshot[0].title = "mutated".to_string();

        assert_eq!(ledger.recent(1).await[0].title, "Offer 0");
    }

    #[tokio::test]
    async fn concurrent_appends_respect_capacity() {
        let ledger = Arc::new(ActivityLedger::new());
        let mut handles = Vec::new();
        for n in 0..(HISTORY_LIMIT + 50) {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(async move {
                ledger.append(entry(n)).await;
            }));
        }
        for handle in handles {
            handle.await.expect("append task panicked");
        }
        assert_eq!(ledger.len().await, HISTORY_LIMIT);
    }

    fn sequence(entry: &LedgerEntry) -> usize {
        entry
            .title
            .strip_prefix("Offer ")
            .and_then(|n| n.parse().ok())
            .expect("numbered title")
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_reads_see_whole_snapshots() {
        let ledger = Arc::new(ActivityLedger::new());
        let total = HISTORY_LIMIT * 3;

        let writer = {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move {
                for n in 0..total {
                    ledger.append(entry(n)).await;
                    tokio::task::yield_now().await;
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let ledger = Arc::clone(&ledger);
                tokio::spawn(async move {
                    for _ in 0..100 {
                        let snapshot = ledger.recent(HISTORY_LIMIT).await;
                        assert!(snapshot.len() <= HISTORY_LIMIT);
                        let seq: Vec<usize> = snapshot.iter().map(sequence).collect();
                        // Newest first with no gaps: each entry is exactly one
                        // older than the one before it.
                        assert!(
                            seq.windows(2).all(|w| w[0] == w[1] + 1),
                            "snapshot out of order: {seq:?}"
                        );
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        writer.await.expect("writer task panicked");
        for reader in readers {
            reader.await.expect("reader task panicked");
        }

        let last = ledger.recent(HISTORY_LIMIT).await;
        assert_eq!(last.len(), HISTORY_LIMIT);
        assert_eq!(sequence(&last[0]), total - 1);
    }
}
