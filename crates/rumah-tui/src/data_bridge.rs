//! Data bridge — connects [`Panel`] streams to TUI actions.
//!
//! Runs as a background task: subscribes to the snapshot stream, the
//! alert channel, and connection state from the panel, forwarding every
//! change as an [`Action`] through the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use rumah_core::{ConnectionState, Panel};

use crate::action::{Action, ConnectionStatus, Toast};

/// Spawn the data bridge connecting [`Panel`] reactive streams to the TUI.
///
/// Connects to the panel, pushes the initial snapshot, then loops
/// forwarding every snapshot replacement, fresh-notification alert, and
/// connection-state transition as an [`Action`]. Shuts down cleanly on
/// cancellation.
pub async fn spawn_data_bridge(
    panel: Panel,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let _ = action_tx.send(Action::ConnectionChanged(ConnectionStatus::Connecting));

    // A failed first fetch is not fatal: the panel's poll task keeps
    // retrying at the poll interval, so stay in the stream loop and let
    // the Degraded -> Connected transition come through the watch.
    if let Err(e) = panel.connect().await {
        warn!(error = %e, "initial panel fetch failed");
        let _ = action_tx.send(Action::Notify(Toast::error(format!(
            "Cannot reach panel: {e}"
        ))));
    }

    let mut snapshots = panel.subscribe();
    let mut alerts = panel.alerts();
    let mut conn_state = panel.connection_state();

    let _ = action_tx.send(Action::ConnectionChanged(status_of(
        &conn_state.borrow_and_update(),
    )));

    // Push the initial snapshot so screens have data immediately
    let _ = action_tx.send(Action::SnapshotUpdated(snapshots.current().clone()));

    // Stream loop — forward every change until cancelled
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snap) = snapshots.changed() => {
                let _ = action_tx.send(Action::SnapshotUpdated(snap));
            }
            Ok(notification) = alerts.recv() => {
                let _ = action_tx.send(Action::AlertFired(notification));
            }
            Ok(()) = conn_state.changed() => {
                let status = status_of(&conn_state.borrow_and_update());
                let _ = action_tx.send(Action::ConnectionChanged(status));
            }
        }
    }

    panel.disconnect().await;
    debug!("data bridge shut down");
}

fn status_of(state: &ConnectionState) -> ConnectionStatus {
    match state {
        ConnectionState::Connected => ConnectionStatus::Connected,
        ConnectionState::Connecting => ConnectionStatus::Connecting,
        ConnectionState::Degraded => ConnectionStatus::Degraded,
        ConnectionState::Disconnected => ConnectionStatus::Disconnected,
    }
}
