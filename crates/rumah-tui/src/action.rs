//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use rumah_core::{Command, Notification, PanelSnapshot};

use crate::screen::ScreenId;

/// Toast severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient status message shown in the footer.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
}

impl Toast {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: ToastLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: ToastLevel::Error,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: ToastLevel::Warning,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: ToastLevel::Info,
        }
    }
}

/// Connection status as seen by the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// Last poll failed; showing the last good snapshot.
    Degraded,
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),

    // ── Data events (from the data bridge) ────────────────────────
    SnapshotUpdated(Arc<PanelSnapshot>),
    /// A notification not present in the previous poll. Triggers the
    /// terminal bell exactly once per id.
    AlertFired(Notification),
    ConnectionChanged(ConnectionStatus),

    // ── Panel commands (routed to rumah-core) ─────────────────────
    Command(Command),

    // ── Feedback ──────────────────────────────────────────────────
    Notify(Toast),
    DismissToast,
}
