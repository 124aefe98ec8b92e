// ── Wire → domain conversions ──
//
// Translates `rumah-api` wire types into canonical domain types. This is
// the only place wire strings ("kosong", "danger", "light") are
// interpreted.

use chrono::Utc;

use rumah_api::types::{DeviceStatus, LogRecord, NotificationEntry, RoomStatus, StatusResponse};

use crate::model::{
    DeviceState, EnergySnapshot, HouseMode, LogEntry, Notification, NotificationCategory,
    PanelSnapshot, RoomState, SoundCue,
};

impl From<&RoomStatus> for RoomState {
    fn from(wire: &RoomStatus) -> Self {
        Self {
            light: wire.light,
            occupied: wire.occupied,
        }
    }
}

impl From<&DeviceStatus> for DeviceState {
    fn from(wire: &DeviceStatus) -> Self {
        Self {
            active: wire.status,
        }
    }
}

impl From<NotificationEntry> for Notification {
    fn from(wire: NotificationEntry) -> Self {
        Self {
            id: wire.id,
            timestamp: wire.timestamp,
            category: NotificationCategory::from_wire(&wire.kind),
            message: wire.message,
            icon: wire.icon,
            sound: wire.sound_type.as_deref().and_then(SoundCue::from_wire),
        }
    }
}

impl From<LogRecord> for LogEntry {
    fn from(wire: LogRecord) -> Self {
        Self {
            timestamp: wire.timestamp,
            action: wire.action,
            details: wire.details,
        }
    }
}

/// Assemble one atomic snapshot from the three fetched slices.
///
/// Notification and log order is preserved exactly as fetched (logs are
/// oldest-first on the wire; renderers reverse them for display).
pub fn snapshot_from_parts(
    status: StatusResponse,
    notifications: Vec<NotificationEntry>,
    logs: Vec<LogRecord>,
) -> PanelSnapshot {
    PanelSnapshot {
        mode: HouseMode::from_wire(&status.status),
        rooms: status
            .rooms
            .iter()
            .map(|(id, r)| (id.clone(), RoomState::from(r)))
            .collect(),
        devices: status
            .devices
            .iter()
            .map(|(id, d)| (id.clone(), DeviceState::from(d)))
            .collect(),
        energy: EnergySnapshot {
            current_watts: status.energy_usage,
            peak_watts: status.peak_usage,
            avg_watts: status.avg_usage,
        },
        notifications: notifications.into_iter().map(Notification::from).collect(),
        logs: logs.into_iter().map(LogEntry::from).collect(),
        fetched_at: Some(Utc::now()),
    }
}
