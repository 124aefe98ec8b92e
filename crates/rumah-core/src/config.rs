// ── Runtime panel configuration ──
//
// Describes *how* to reach the backend. Built by the TUI (from CLI flags
// or `rumah-config`) and handed to `Panel` — core never reads files.

use std::time::Duration;

use url::Url;

/// Configuration for connecting to one panel backend.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Backend base URL (e.g. `http://127.0.0.1:5000`).
    pub url: Url,
    /// Fixed poll interval for the sync loop.
    pub poll_interval: Duration,
    /// HTTP request timeout.
    pub timeout: Duration,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5000"
                .parse()
                .expect("default URL is valid"),
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(10),
        }
    }
}
