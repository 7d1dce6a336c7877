//! Owner-facing view of a share link.

use serde::Serialize;

use medivault_core::config::ShareConfig;
use medivault_entity::share::{ShareLink, ViewsRemaining};

/// A share link with its public URL and display-only remaining views.
#[derive(Debug, Clone, Serialize)]
pub struct ShareLinkView {
    /// The stored link.
    #[serde(flatten)]
    pub link: ShareLink,
    /// `{public_base_url}/share/{id}`.
    pub url: String,
    /// Views left, or `∞`.
    pub views_remaining: ViewsRemaining,
}

impl ShareLinkView {
    /// Attach the URL and remaining views to `link`.
    pub fn new(link: ShareLink, config: &ShareConfig) -> Self {
        Self {
            url: config.share_url(&link.id.to_string()),
            views_remaining: link.views_remaining(),
            link,
        }
    }
}
