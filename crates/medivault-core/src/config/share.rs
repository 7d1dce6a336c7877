//! Public link configuration.

use serde::{Deserialize, Serialize};

/// Settings for the capability URLs handed out to users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Base URL that share and emergency links are built on.
    #[serde(default = "default_base_url")]
    pub public_base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_base_url(),
        }
    }
}

impl ShareConfig {
    /// `{base}/share/{id}`
    pub fn share_url(&self, link_id: &str) -> String {
        format!("{}/share/{}", self.public_base_url.trim_end_matches('/'), link_id)
    }

    /// `{base}/emergency/{user_id}`
    pub fn emergency_url(&self, user_id: &str) -> String {
        format!(
            "{}/emergency/{}",
            self.public_base_url.trim_end_matches('/'),
            user_id
        )
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
