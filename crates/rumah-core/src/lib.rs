//! Reactive data layer between `rumah-api` and the TUI.
//!
//! This crate owns the domain model and the client-side state
//! synchronization loop for the rumah panel workspace:
//!
//! - **[`Panel`]** — Central facade managing the full lifecycle:
//!   [`connect()`](Panel::connect) performs the initial snapshot fetch,
//!   then spawns background tasks for periodic polling and command
//!   processing. Every command is followed by one forced re-sync so the
//!   displayed state always reflects the authoritative backend.
//!
//! - **[`ViewState`]** — Full-replace snapshot store built on a
//!   `tokio::sync::watch` channel. Each poll replaces the whole
//!   [`PanelSnapshot`] atomically; a monotonic sequence guard discards a
//!   slow, stale poll that resolves after a newer one.
//!
//! - **[`SnapshotStream`]** — Subscription handle vended by the store.
//!   Exposes `current()` / `latest()` / `changed()` for reactive rendering.
//!
//! - **[`NotificationDeduper`]** — Tracks the previous poll's notification
//!   identifiers so one-shot alert cues fire at most once per id.
//!
//! - **[`Command`]** — Typed mutation requests routed through an `mpsc`
//!   channel to the panel's command processor.
//!
//! - **Catalog** ([`catalog`]) — The fixed, client-known set of room and
//!   device identifiers with display metadata. Backend entries outside the
//!   catalog are ignored; catalog entries missing from a snapshot are
//!   skipped by renderers.

pub mod catalog;
pub mod command;
pub mod config;
pub mod convert;
pub mod dedup;
pub mod error;
pub mod model;
pub mod panel;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::Command;
pub use config::PanelConfig;
pub use dedup::NotificationDeduper;
pub use error::CoreError;
pub use panel::{ConnectionState, Panel};
pub use store::ViewState;
pub use stream::SnapshotStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    DeviceState, EnergySnapshot, HouseMode, LogEntry, Notification, NotificationCategory,
    PanelSnapshot, RoomState, SoundCue,
};
