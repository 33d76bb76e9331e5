//! Client configuration (API endpoint, map geometry). Loaded from config.ron at startup.

use serde::{Deserialize, Serialize};

/// Persistent client settings. Loaded from `config.ron` in the current
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the game-state API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Edge-to-edge size of one hex field in pixels.
    #[serde(default = "default_hex_field_size")]
    pub hex_field_size: f32,
    /// Viewport size in pixels, used when centering the map.
    #[serde(default = "default_viewport")]
    pub viewport: (f32, f32),
    /// Minimum seconds between turn-clock polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000/api".to_string()
}
fn default_hex_field_size() -> f32 {
    200.0
}
fn default_viewport() -> (f32, f32) {
    (1280.0, 720.0)
}
fn default_poll_interval() -> u64 {
    1
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            hex_field_size: default_hex_field_size(),
            viewport: default_viewport(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl ClientConfig {
    /// Load config from `config.ron`. If the file is missing or invalid,
    /// returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if let Ok(data) = std::fs::read_to_string(&path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("config.ron")
}
