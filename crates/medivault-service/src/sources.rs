//! Picks the fixture or the real store for a given owner.

use std::sync::Arc;

use medivault_core::config::DemoConfig;
use medivault_database::fixtures::{FixtureDocuments, FixtureProfiles};
use medivault_database::{DocumentSource, ProfileSource};

/// Store-backed and fixture-backed sources, selected per owner.
///
/// The configured demo account reads fixtures; every other owner reads the
/// store. Selection depends only on the owner id, never on who is asking.
#[derive(Debug, Clone)]
pub struct DataSources {
    documents: Arc<dyn DocumentSource>,
    profiles: Arc<dyn ProfileSource>,
    demo_documents: Arc<dyn DocumentSource>,
    demo_profiles: Arc<dyn ProfileSource>,
    demo: DemoConfig,
}

impl DataSources {
    /// Wrap the real stores, with fixtures for the configured demo account.
    pub fn new(
        documents: Arc<dyn DocumentSource>,
        profiles: Arc<dyn ProfileSource>,
        demo: DemoConfig,
    ) -> Self {
        Self {
            documents,
            profiles,
            demo_documents: Arc::new(FixtureDocuments::new(demo.user_id.clone())),
            demo_profiles: Arc::new(FixtureProfiles::new(demo.user_id.clone())),
            demo,
        }
    }

    /// Whether `owner_id` is the demo account.
    pub fn is_demo(&self, owner_id: &str) -> bool {
        self.demo.is_demo_user(owner_id)
    }

    /// Document source for `owner_id`.
    pub fn documents_for(&self, owner_id: &str) -> &Arc<dyn DocumentSource> {
        if self.is_demo(owner_id) {
            &self.demo_documents
        } else {
            &self.documents
        }
    }

    /// Profile source for `owner_id`.
    pub fn profiles_for(&self, owner_id: &str) -> &Arc<dyn ProfileSource> {
        if self.is_demo(owner_id) {
            &self.demo_profiles
        } else {
            &self.profiles
        }
    }
}
