// ── View-state store ──
//
// Holds the last known snapshot behind a watch channel. Each poll is a
// full replace — no merge logic, no partial update visible to readers.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use crate::model::PanelSnapshot;
use crate::stream::SnapshotStream;

/// Single-writer snapshot container with push-based change notification.
///
/// Writers tag every fetch with a monotonic sequence number taken before
/// the request is issued; [`apply_if_newer`](Self::apply_if_newer) drops a
/// slower, earlier-issued fetch that resolves after a later one, so stale
/// data never overwrites fresh data.
pub struct ViewState {
    snapshot: watch::Sender<Arc<PanelSnapshot>>,
    /// Sequence of the last applied snapshot, guarded so the compare and
    /// the publish happen atomically with respect to other writers.
    applied: Mutex<u64>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl ViewState {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(PanelSnapshot::default()));
        let (last_refresh, _) = watch::channel(None);
        Self {
            snapshot,
            applied: Mutex::new(0),
            last_refresh,
        }
    }

    /// Replace the whole snapshot if `seq` is newer than the last applied
    /// one. Returns `true` if the snapshot was published.
    pub fn apply_if_newer(&self, seq: u64, snapshot: PanelSnapshot) -> bool {
        let mut applied = self.applied.lock().expect("view-state lock poisoned");
        if seq <= *applied {
            debug!(seq, last = *applied, "discarding stale poll result");
            return false;
        }
        *applied = seq;
        self.snapshot.send_replace(Arc::new(snapshot));
        self.last_refresh.send_replace(Some(Utc::now()));
        true
    }

    /// The current snapshot (cheap `Arc` clone).
    pub fn current(&self) -> Arc<PanelSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> SnapshotStream {
        SnapshotStream::new(self.snapshot.subscribe())
    }

    /// Sequence number of the last applied snapshot (0 = none yet).
    pub fn last_seq(&self) -> u64 {
        *self.applied.lock().expect("view-state lock poisoned")
    }

    /// When the last snapshot was applied, or `None` if never.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
