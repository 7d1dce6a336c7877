//! Demo account configuration.

use serde::{Deserialize, Serialize};

/// The demo account reads documents and its profile from built-in fixtures
/// instead of the configured stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Whether the demo account is recognised at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// User id of the demo account as issued by the identity provider.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            user_id: default_user_id(),
        }
    }
}

impl DemoConfig {
    /// Returns `true` if `user_id` designates the demo account.
    pub fn is_demo_user(&self, user_id: &str) -> bool {
        self.enabled && self.user_id == user_id
    }
}

fn default_enabled() -> bool {
    true
}

fn default_user_id() -> String {
    "test-user-id".to_string()
}
