// ── Panel abstraction ──
//
// Full lifecycle management for a panel backend connection. Handles the
// initial snapshot fetch, periodic polling, command routing, and reactive
// snapshot streaming through the ViewState store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::command::{Command, CommandEnvelope};
use crate::config::PanelConfig;
use crate::convert;
use crate::dedup::NotificationDeduper;
use crate::error::CoreError;
use crate::model::{Notification, PanelSnapshot};
use crate::store::ViewState;
use crate::stream::SnapshotStream;

use rumah_api::{PanelClient, TransportConfig};

const COMMAND_CHANNEL_SIZE: usize = 16;
const ALERT_CHANNEL_SIZE: usize = 64;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// The latest fetch failed. The store keeps serving the last good
    /// snapshot (possibly empty) while polling keeps retrying.
    Degraded,
}

// ── Panel ────────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<PanelInner>`. Manages the full connection
/// lifecycle: initial snapshot, background polling, command routing, and
/// one-shot alert delivery for fresh notifications.
#[derive(Clone)]
pub struct Panel {
    inner: Arc<PanelInner>,
}

struct PanelInner {
    config: PanelConfig,
    client: PanelClient,
    store: Arc<ViewState>,
    /// Previous-poll notification ids. Locked across the store apply and
    /// only advanced for polls that were actually applied, so a stale
    /// poll can neither swallow an alert nor regress the set.
    deduper: std::sync::Mutex<NotificationDeduper>,
    connection_state: watch::Sender<ConnectionState>,
    alert_tx: broadcast::Sender<Notification>,
    command_tx: mpsc::Sender<CommandEnvelope>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
    /// Sequence source for fetches. Taken before each request is issued;
    /// the store refuses anything at or below the last applied sequence.
    poll_seq: AtomicU64,
}

impl Panel {
    /// Create a new Panel from configuration. Does NOT connect -- call
    /// [`connect()`](Self::connect) to fetch the initial snapshot and
    /// start background tasks.
    pub fn new(config: PanelConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            ..TransportConfig::default()
        };
        let client = PanelClient::new(config.url.clone(), &transport)?;

        let store = Arc::new(ViewState::new());
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);
        let (alert_tx, _) = broadcast::channel(ALERT_CHANNEL_SIZE);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let cancel = CancellationToken::new();

        Ok(Self {
            inner: Arc::new(PanelInner {
                config,
                client,
                store,
                deduper: std::sync::Mutex::new(NotificationDeduper::new()),
                connection_state,
                alert_tx,
                command_tx,
                command_rx: Mutex::new(Some(command_rx)),
                cancel,
                task_handles: Mutex::new(Vec::new()),
                poll_seq: AtomicU64::new(0),
            }),
        })
    }

    /// Access the panel configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.inner.config
    }

    /// Access the underlying ViewState store.
    pub fn store(&self) -> &Arc<ViewState> {
        &self.inner.store
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect to the panel backend.
    ///
    /// Attempts the initial snapshot fetch and spawns the background
    /// tasks (periodic poll, command processor) either way -- the poll
    /// interval is the only retry mechanism, so a backend that isn't up
    /// yet is [`Degraded`](ConnectionState::Degraded), not fatal. The
    /// returned `Err` reports the failed first fetch; polling continues
    /// and the state flips to `Connected` once a poll succeeds.
    pub async fn connect(&self) -> Result<(), CoreError> {
        self.inner
            .connection_state
            .send_replace(ConnectionState::Connecting);

        let seq = self.inner.poll_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = match fetch_snapshot(&self.inner.client).await {
            Ok(snapshot) => {
                // First apply primes the deduper, so pre-existing
                // notifications don't replay their alert cues.
                apply_and_alert(&self.inner, seq, snapshot);
                self.inner
                    .connection_state
                    .send_replace(ConnectionState::Connected);
                info!(url = %self.inner.config.url, "connected to panel");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "initial fetch failed, polling continues");
                self.inner
                    .connection_state
                    .send_replace(ConnectionState::Degraded);
                Err(e)
            }
        };

        let mut handles = self.inner.task_handles.lock().await;

        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let panel = self.clone();
            handles.push(tokio::spawn(command_processor_task(panel, rx)));
        }

        if !self.inner.config.poll_interval.is_zero() {
            let panel = self.clone();
            let cancel = self.inner.cancel.clone();
            handles.push(tokio::spawn(poll_task(panel, cancel)));
        }

        result
    }

    /// Disconnect from the panel.
    ///
    /// Cancels background tasks, joins them, and resets the connection
    /// state to [`Disconnected`](ConnectionState::Disconnected).
    pub async fn disconnect(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        self.inner
            .connection_state
            .send_replace(ConnectionState::Disconnected);
        debug!("disconnected");
    }

    /// Fetch one snapshot now and apply it (manual re-sync).
    ///
    /// Fresh notifications discovered by the fetch are broadcast through
    /// the alert channel, same as a periodic poll.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        refresh_and_alert(&self.inner).await
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a command against the panel.
    ///
    /// Sends the command through the internal channel to the command
    /// processor task and awaits the result. The processor forces one
    /// re-sync after the HTTP call, whether it succeeded or not.
    pub async fn execute(&self, cmd: Command) -> Result<(), CoreError> {
        let (tx, rx) = oneshot::channel();

        self.inner
            .command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::Internal("command processor stopped".into()))?;

        rx.await
            .map_err(|_| CoreError::Internal("command processor dropped the response".into()))?
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    /// Subscribe to one-shot alerts for fresh notifications.
    pub fn alerts(&self) -> broadcast::Receiver<Notification> {
        self.inner.alert_tx.subscribe()
    }

    /// The current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<PanelSnapshot> {
        self.inner.store.current()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> SnapshotStream {
        self.inner.store.subscribe()
    }
}

// ── Sync internals ───────────────────────────────────────────────

/// Fetch the three read endpoints in parallel and assemble a snapshot.
async fn fetch_snapshot(client: &PanelClient) -> Result<PanelSnapshot, CoreError> {
    let (status, notifications, logs) = tokio::try_join!(
        client.get_status(),
        client.get_notifications(),
        client.get_logs(),
    )?;
    Ok(convert::snapshot_from_parts(status, notifications, logs))
}

/// One full sync cycle: fetch, apply if still newest, fire alerts for
/// notifications not present in the previous applied poll.
async fn refresh_and_alert(inner: &PanelInner) -> Result<(), CoreError> {
    let seq = inner.poll_seq.fetch_add(1, Ordering::SeqCst) + 1;
    let snapshot = fetch_snapshot(&inner.client).await?;
    apply_and_alert(inner, seq, snapshot);
    Ok(())
}

/// Apply a fetched snapshot if still newest and fire alerts for its fresh
/// notification ids. The dedup lock is held across the store apply, so
/// two overlapping refreshes that both resolve can't advance the
/// previous-id set out of sequence order.
fn apply_and_alert(inner: &PanelInner, seq: u64, snapshot: PanelSnapshot) {
    let notifications = snapshot.notifications.clone();
    let mut deduper = inner.deduper.lock().expect("deduper lock poisoned");

    if !inner.store.apply_if_newer(seq, snapshot) {
        return;
    }
    let fresh = deduper.fresh(&notifications);
    drop(deduper);

    for notification in fresh {
        debug!(id = notification.id, "fresh notification");
        let _ = inner.alert_tx.send(notification);
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Periodically re-sync from the backend at the configured interval.
async fn poll_task(panel: Panel, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(panel.inner.config.poll_interval);
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                match refresh_and_alert(&panel.inner).await {
                    Ok(()) => set_state_if_changed(&panel.inner, ConnectionState::Connected),
                    Err(e) => {
                        warn!(error = %e, "periodic poll failed");
                        set_state_if_changed(&panel.inner, ConnectionState::Degraded);
                    }
                }
            }
        }
    }
}

/// Process commands from the mpsc channel: issue the HTTP call, then
/// force one re-sync so the next render reflects the authoritative
/// backend state even when the command was rejected.
async fn command_processor_task(panel: Panel, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = panel.inner.cancel.clone();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                debug!(command = %envelope.command.describe(), "executing command");
                let result = route_command(&panel.inner.client, &envelope.command).await;

                if let Err(e) = refresh_and_alert(&panel.inner).await {
                    warn!(error = %e, "post-command re-sync failed");
                }

                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

/// Route a command to the matching API call.
async fn route_command(client: &PanelClient, cmd: &Command) -> Result<(), CoreError> {
    match cmd {
        Command::ToggleRoomLight { room_id } => client.toggle_room_light(room_id).await?,
        Command::SetRoomOccupied { room_id, occupied } => {
            client.set_room_occupied(room_id, *occupied).await?;
        }
        Command::ToggleDevice { device_id } => client.toggle_device(device_id).await?,
        Command::TurnOffAllLights => client.turn_off_all_lights().await?,
        Command::TurnOffAllDevices => client.turn_off_all_devices().await?,
        Command::SetHouseMode { mode } => client.set_house_mode(mode.wire_str()).await?,
        Command::ClearNotifications => client.clear_notifications().await?,
    }
    Ok(())
}

fn set_state_if_changed(inner: &PanelInner, state: ConnectionState) {
    inner.connection_state.send_if_modified(|current| {
        if *current == state {
            false
        } else {
            *current = state;
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationCategory;

    fn notif(id: u64) -> Notification {
        Notification {
            id,
            timestamp: None,
            category: NotificationCategory::Info,
            message: format!("notif {id}"),
            icon: None,
            sound: None,
        }
    }

    fn snap(ids: &[u64]) -> PanelSnapshot {
        PanelSnapshot {
            notifications: ids.iter().map(|&id| notif(id)).collect(),
            ..PanelSnapshot::default()
        }
    }

    #[test]
    fn discarded_stale_apply_does_not_regress_the_dedup_set() {
        let panel = Panel::new(PanelConfig::default()).expect("panel");
        let mut alerts = panel.alerts();

        apply_and_alert(&panel.inner, 1, snap(&[1])); // primes
        apply_and_alert(&panel.inner, 2, snap(&[1, 2]));
        assert_eq!(alerts.try_recv().expect("alert for id 2").id, 2);

        // A slow fetch from before seq 2 resolves late: it must neither
        // publish nor roll `previous` back to {1}, otherwise id 2 would
        // re-fire on the next poll.
        apply_and_alert(&panel.inner, 1, snap(&[1]));
        apply_and_alert(&panel.inner, 3, snap(&[1, 2]));
        assert!(alerts.try_recv().is_err());
        assert_eq!(panel.snapshot().notifications.len(), 2);
    }
}
