// ── Canonical domain types ──
//
// The client-side mirror of the backend's state. All of these are
// ephemeral view projections, rebuilt wholesale from each poll — nothing
// here is mutated in place between snapshots.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::catalog;

/// Global occupancy mode. Authoritative on the backend; the client only
/// mirrors it. When `Occupied`, the backend refuses bulk shutoff commands
/// and the UI renders those controls disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HouseMode {
    #[default]
    Empty,
    Occupied,
}

impl HouseMode {
    /// Wire string used by the backend (`kosong` / `berpenghuni`).
    pub const fn wire_str(self) -> &'static str {
        match self {
            Self::Empty => "kosong",
            Self::Occupied => "berpenghuni",
        }
    }

    /// Parse the backend wire string. Anything that isn't `berpenghuni`
    /// counts as empty, matching the backend's own comparison.
    pub fn from_wire(s: &str) -> Self {
        if s == "berpenghuni" {
            Self::Occupied
        } else {
            Self::Empty
        }
    }

    /// Display label shown in the header.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Empty => "Kosong",
            Self::Occupied => "Berpenghuni",
        }
    }

    /// Whether bulk "all off" commands are permitted in this mode.
    pub const fn bulk_commands_allowed(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Empty => Self::Occupied,
            Self::Occupied => Self::Empty,
        }
    }
}

/// Per-room state from the latest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoomState {
    pub light: bool,
    pub occupied: bool,
}

/// Per-device state from the latest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceState {
    pub active: bool,
}

/// Notification category — styling and alert-cue selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    Info,
    Warning,
    Danger,
}

impl NotificationCategory {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "danger" => Self::Danger,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// One-shot alert sound selector carried by some notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Light,
    Device,
}

impl SoundCue {
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "light" => Some(Self::Light),
            "device" => Some(Self::Device),
            _ => None,
        }
    }
}

/// A backend notification. Identifiers are stable across polls; the
/// de-duplicator compares only these ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub timestamp: Option<String>,
    pub category: NotificationCategory,
    pub message: String,
    pub icon: Option<String>,
    pub sound: Option<SoundCue>,
}

/// One activity-log line. Append-only on the backend; the client renders
/// the fetched tail newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub action: String,
    pub details: String,
}

/// Energy figures from the status snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergySnapshot {
    pub current_watts: f64,
    pub peak_watts: f64,
    pub avg_watts: f64,
}

impl EnergySnapshot {
    /// Rated panel capacity the energy bar scales against.
    pub const PANEL_CAPACITY_WATTS: f64 = 4000.0;

    /// Current load as a fraction of panel capacity, clamped to [0, 1].
    pub fn load_ratio(&self) -> f64 {
        (self.current_watts / Self::PANEL_CAPACITY_WATTS).clamp(0.0, 1.0)
    }
}

/// The full state returned by one sync pass, treated as atomic: the
/// store replaces all slices together, never piecemeal.
#[derive(Debug, Clone, Default)]
pub struct PanelSnapshot {
    pub mode: HouseMode,
    pub rooms: HashMap<String, RoomState>,
    pub devices: HashMap<String, DeviceState>,
    pub energy: EnergySnapshot,
    pub notifications: Vec<Notification>,
    pub logs: Vec<LogEntry>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl PanelSnapshot {
    pub fn room(&self, id: &str) -> Option<&RoomState> {
        self.rooms.get(id)
    }

    pub fn device(&self, id: &str) -> Option<&DeviceState> {
        self.devices.get(id)
    }

    /// Lights currently on, counted over the catalog only.
    pub fn lights_on(&self) -> usize {
        catalog::ROOMS
            .iter()
            .filter(|spec| self.rooms.get(spec.id).is_some_and(|r| r.light))
            .count()
    }

    /// Devices currently active, counted over the catalog only.
    pub fn devices_active(&self) -> usize {
        catalog::DEVICES
            .iter()
            .filter(|spec| self.devices.get(spec.id).is_some_and(|d| d.active))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn house_mode_wire_round_trip() {
        assert_eq!(HouseMode::from_wire("kosong"), HouseMode::Empty);
        assert_eq!(HouseMode::from_wire("berpenghuni"), HouseMode::Occupied);
        assert_eq!(HouseMode::Occupied.wire_str(), "berpenghuni");
        // Unknown strings fall back to empty, like the backend comparison.
        assert_eq!(HouseMode::from_wire("???"), HouseMode::Empty);
    }

    #[test]
    fn bulk_commands_gated_on_mode() {
        assert!(HouseMode::Empty.bulk_commands_allowed());
        assert!(!HouseMode::Occupied.bulk_commands_allowed());
    }

    #[test]
    fn load_ratio_clamps_to_unit_interval() {
        let over = EnergySnapshot {
            current_watts: 9000.0,
            ..EnergySnapshot::default()
        };
        assert!((over.load_ratio() - 1.0).abs() < f64::EPSILON);

        let half = EnergySnapshot {
            current_watts: 2000.0,
            ..EnergySnapshot::default()
        };
        assert!((half.load_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_ignore_entries_outside_the_catalog() {
        let mut snap = PanelSnapshot::default();
        snap.rooms.insert(
            "kamar1".into(),
            RoomState {
                light: true,
                occupied: false,
            },
        );
        // Not in the catalog — must not be counted.
        snap.rooms.insert(
            "gudang_rahasia".into(),
            RoomState {
                light: true,
                occupied: false,
            },
        );
        assert_eq!(snap.lights_on(), 1);
    }
}
