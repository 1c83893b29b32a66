use std::collections::HashMap;
use std::hash::Hash;
use std::mem;

use chrono::{DateTime, Duration, Utc};

/// Buffers pending writes and releases each one only after its key has been
/// quiet for the configured window.
///
/// Recording the same key again replaces the buffered value and restarts the
/// window, so a burst of edits collapses into a single commit. The clock is
/// passed in by the caller; the queue keeps no threads or timers of its own.
pub struct IdleCommitQueue<K, V> {
    idle_after: Duration,
    pending: HashMap<K, PendingEntry<V>>,
}

struct PendingEntry<V> {
    value: V,
    last_touched: DateTime<Utc>,
}

impl<K: Eq + Hash, V> IdleCommitQueue<K, V> {
    pub fn new(idle_after: Duration) -> Self {
        Self {
            idle_after,
            pending: HashMap::new(),
        }
    }

    /// Records a pending value for `key`, replacing any earlier one.
    pub fn record(&mut self, key: K, value: V, at: DateTime<Utc>) {
        self.pending.insert(
            key,
            PendingEntry {
                value,
                last_touched: at,
            },
        );
    }

    /// Drains every entry that has been idle for at least the configured
    /// window as of `now`. Entries still inside the window stay buffered.
    pub fn take_ready(&mut self, now: DateTime<Utc>) -> Vec<(K, V)> {
        let idle_after = self.idle_after;
        let (ready, pending): (HashMap<_, _>, HashMap<_, _>) = mem::take(&mut self.pending)
            .into_iter()
            .partition(|(_, entry)| now - entry.last_touched >= idle_after);
        self.pending = pending;
        ready
            .into_iter()
            .map(|(key, entry)| (key, entry.value))
            .collect()
    }

    /// Drains everything regardless of how recently it was touched.
    pub fn flush_all(&mut self) -> Vec<(K, V)> {
        mem::take(&mut self.pending)
            .into_iter()
            .map(|(key, entry)| (key, entry.value))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
