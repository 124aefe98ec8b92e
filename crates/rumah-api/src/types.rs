// Wire types for the panel HTTP API.
//
// These mirror the backend JSON exactly; `rumah-core` converts them into
// canonical domain types. Unknown fields are ignored, missing optional
// fields default, so the client tolerates minor backend variants.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// `GET /api/status` — the atomic state snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    /// House mode: `"kosong"` (empty) or `"berpenghuni"` (occupied).
    pub status: String,
    #[serde(default)]
    pub rooms: HashMap<String, RoomStatus>,
    #[serde(default)]
    pub devices: HashMap<String, DeviceStatus>,
    #[serde(default)]
    pub energy_usage: f64,
    #[serde(default)]
    pub peak_usage: f64,
    #[serde(default)]
    pub avg_usage: f64,
}

/// Per-room state within a status snapshot (also `GET /api/rooms`).
#[derive(Debug, Clone, Deserialize)]
pub struct RoomStatus {
    #[serde(default)]
    pub name: Option<String>,
    pub light: bool,
    #[serde(default, alias = "occupancy")]
    pub occupied: bool,
}

/// Per-device state within a status snapshot (also `GET /api/devices`).
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceStatus {
    #[serde(default)]
    pub name: Option<String>,
    pub status: bool,
}

/// One entry from `GET /api/notifications`.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationEntry {
    pub id: u64,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Category tag: `"info"`, `"warning"`, or `"danger"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Alert cue selector: `"light"`, `"device"`, or absent.
    #[serde(default)]
    pub sound_type: Option<String>,
}

/// One entry from `GET /api/logs` (oldest-first as received).
#[derive(Debug, Clone, Deserialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub action: String,
    #[serde(default, alias = "detail")]
    pub details: String,
}

/// Body for `POST /api/room/{id}/occupied`.
#[derive(Debug, Clone, Serialize)]
pub struct OccupiedBody {
    pub occupied: bool,
}

/// Body for `POST /api/house/status`.
#[derive(Debug, Clone, Serialize)]
pub struct HouseModeBody {
    pub status: String,
}

/// Command acknowledgement. The backend is inconsistent here: some
/// endpoints return `{"success": bool, "error": ...}`, others an ad-hoc
/// payload with no `success` field at all. Absence of both `success`
/// and `error` counts as success.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandAck {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}
