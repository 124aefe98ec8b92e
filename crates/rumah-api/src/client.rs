// Panel HTTP client
//
// Wraps `reqwest::Client` with panel-specific URL construction and
// response parsing. Queries deserialize JSON payloads; commands parse the
// `{success, error}` acknowledgement shape and surface the server's error
// string verbatim.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{
    CommandAck, DeviceStatus, HouseModeBody, LogRecord, NotificationEntry, OccupiedBody,
    RoomStatus, StatusResponse,
};

/// HTTP client for the smart-home panel backend.
///
/// Holds the base URL (e.g. `http://127.0.0.1:5000`) and a shared
/// `reqwest::Client`. All methods are cheap to call concurrently; the
/// client itself is `Clone`.
#[derive(Debug, Clone)]
pub struct PanelClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PanelClient {
    /// Create a new client from a base URL and transport config.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client` (used by tests).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The panel base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// `GET /api/status` — mode, per-room map, per-device map, energy.
    pub async fn get_status(&self) -> Result<StatusResponse, Error> {
        self.get("status").await
    }

    /// `GET /api/rooms` — per-room state map alone.
    pub async fn get_rooms(&self) -> Result<HashMap<String, RoomStatus>, Error> {
        self.get("rooms").await
    }

    /// `GET /api/devices` — per-device state map alone.
    pub async fn get_devices(&self) -> Result<HashMap<String, DeviceStatus>, Error> {
        self.get("devices").await
    }

    /// `GET /api/notifications` — current notification list, fetch order.
    pub async fn get_notifications(&self) -> Result<Vec<NotificationEntry>, Error> {
        self.get("notifications").await
    }

    /// `GET /api/logs` — activity log, oldest-first as received.
    pub async fn get_logs(&self) -> Result<Vec<LogRecord>, Error> {
        self.get("logs").await
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// `POST /api/room/{id}/toggle` — toggle a room's light.
    pub async fn toggle_room_light(&self, room_id: &str) -> Result<(), Error> {
        self.command(&format!("room/{room_id}/toggle"), None::<&()>)
            .await
    }

    /// `POST /api/room/{id}/occupied` — set a room's occupancy flag.
    pub async fn set_room_occupied(&self, room_id: &str, occupied: bool) -> Result<(), Error> {
        self.command(
            &format!("room/{room_id}/occupied"),
            Some(&OccupiedBody { occupied }),
        )
        .await
    }

    /// `POST /api/device/{id}/toggle` — toggle a device.
    pub async fn toggle_device(&self, device_id: &str) -> Result<(), Error> {
        self.command(&format!("device/{device_id}/toggle"), None::<&()>)
            .await
    }

    /// `POST /api/lights/all/off` — bulk light shutoff (empty house only).
    pub async fn turn_off_all_lights(&self) -> Result<(), Error> {
        self.command("lights/all/off", None::<&()>).await
    }

    /// `POST /api/devices/all/off` — bulk device shutoff (empty house only).
    pub async fn turn_off_all_devices(&self) -> Result<(), Error> {
        self.command("devices/all/off", None::<&()>).await
    }

    /// `POST /api/house/status` — set the global house mode.
    /// `mode` is the wire string: `"kosong"` or `"berpenghuni"`.
    pub async fn set_house_mode(&self, mode: &str) -> Result<(), Error> {
        self.command(
            "house/status",
            Some(&HouseModeBody {
                status: mode.to_owned(),
            }),
        )
        .await
    }

    /// `POST /api/notification/clear` — drop all current notifications.
    pub async fn clear_notifications(&self) -> Result<(), Error> {
        self.command("notification/clear", None::<&()>).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/api/{path}"))?)
    }

    /// Send a GET request and deserialize the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(rejection_from_body(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview = truncate_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    /// Send a POST command and parse the acknowledgement.
    ///
    /// A rejection arrives either as a non-2xx status with `{"error": ...}`,
    /// or as HTTP 200 carrying `{"success": false, "error": ...}` — both
    /// map to [`Error::Rejected`] with the server message verbatim.
    async fn command(&self, path: &str, body: Option<&(impl Serialize + Sync)>) -> Result<(), Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);

        let builder = match body {
            Some(b) => self.http.post(url).json(b),
            None => self.http.post(url),
        };
        let resp = builder.send().await.map_err(Error::Transport)?;
        let status = resp.status();
        let text = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(rejection_from_body(status.as_u16(), &text));
        }

        if let Ok(ack) = serde_json::from_str::<CommandAck>(&text) {
            if ack.success == Some(false) {
                return Err(Error::Rejected {
                    message: ack
                        .error
                        .unwrap_or_else(|| "command failed".to_owned()),
                });
            }
        }

        Ok(())
    }
}

/// Extract the server's error message from a non-2xx body, falling back
/// to a status-line summary when the body carries no `error` field.
fn rejection_from_body(status: u16, body: &str) -> Error {
    if let Ok(ack) = serde_json::from_str::<CommandAck>(body) {
        if let Some(message) = ack.error {
            return Error::Rejected { message };
        }
    }
    let preview = truncate_preview(body);
    Error::Rejected {
        message: format!("HTTP {status}: {preview}"),
    }
}

const PREVIEW_BUDGET: usize = 200;

/// First ~200 bytes of a body for error messages, cut on a char boundary
/// so multi-byte text (the backend's messages carry accents and emoji)
/// can't make the slice panic.
fn truncate_preview(body: &str) -> &str {
    let mut end = body.len().min(PREVIEW_BUDGET);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
