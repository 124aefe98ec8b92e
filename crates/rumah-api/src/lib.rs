// rumah-api: Async Rust client for the rumah smart-home panel HTTP API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::PanelClient;
pub use error::Error;
pub use transport::TransportConfig;
