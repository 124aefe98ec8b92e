// ── Command API ──
//
// All write operations flow through the `Command` enum, routed over an
// mpsc channel to the panel's command processor. The processor issues the
// HTTP call and then forces one re-sync regardless of the outcome.

use tokio::sync::oneshot;

use crate::error::CoreError;
use crate::model::HouseMode;

/// A command envelope sent through the command channel.
/// Carries the command and a oneshot response channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: oneshot::Sender<Result<(), CoreError>>,
}

/// All write operations against the panel backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleRoomLight { room_id: String },
    SetRoomOccupied { room_id: String, occupied: bool },
    ToggleDevice { device_id: String },
    TurnOffAllLights,
    TurnOffAllDevices,
    SetHouseMode { mode: HouseMode },
    ClearNotifications,
}

impl Command {
    /// Short human-readable description for logs and toasts.
    pub fn describe(&self) -> String {
        match self {
            Self::ToggleRoomLight { room_id } => format!("toggle light in {room_id}"),
            Self::SetRoomOccupied { room_id, occupied } => {
                format!("mark {room_id} {}", if *occupied { "occupied" } else { "empty" })
            }
            Self::ToggleDevice { device_id } => format!("toggle {device_id}"),
            Self::TurnOffAllLights => "turn off all lights".into(),
            Self::TurnOffAllDevices => "turn off all devices".into(),
            Self::SetHouseMode { mode } => format!("set house mode to {}", mode.label()),
            Self::ClearNotifications => "clear notifications".into(),
        }
    }

    /// Whether this command is one of the bulk shutoffs gated on the
    /// house being empty.
    pub const fn is_bulk(&self) -> bool {
        matches!(self, Self::TurnOffAllLights | Self::TurnOffAllDevices)
    }
}
