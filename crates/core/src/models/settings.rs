use serde::{Deserialize, Serialize};

/// User-configurable settings for the dashboard session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the Capra backend (hello + upload endpoints).
    pub backend_base_url: String,

    /// Delay before the scripted advisor delivers its reply, in milliseconds.
    pub advisor_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend_base_url: "http://127.0.0.1:5000".to_string(),
            advisor_delay_ms: 1000,
        }
    }
}
