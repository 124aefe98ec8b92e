// ── Snapshot subscriptions ──

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::PanelSnapshot;

/// A subscription to view-state snapshots.
///
/// Provides both point-in-time access and reactive change notification.
pub struct SnapshotStream {
    current: Arc<PanelSnapshot>,
    receiver: watch::Receiver<Arc<PanelSnapshot>>,
}

impl SnapshotStream {
    pub(crate) fn new(receiver: watch::Receiver<Arc<PanelSnapshot>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation time (or by the last `changed()`).
    pub fn current(&self) -> &Arc<PanelSnapshot> {
        &self.current
    }

    /// The latest snapshot (may have changed since `current`).
    pub fn latest(&self) -> Arc<PanelSnapshot> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next replacement, returning the new snapshot.
    /// Returns `None` if the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<PanelSnapshot>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }
}
