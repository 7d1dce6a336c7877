//! In-memory profile store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use medivault_core::result::AppResult;
use medivault_entity::profile::{HealthProfile, UpsertProfile};

use crate::traits::ProfileSource;

/// Profile store keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    profiles: Arc<DashMap<String, HealthProfile>>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileSource for MemoryProfileStore {
    async fn find_by_user(&self, user_id: &str) -> AppResult<Option<HealthProfile>> {
        Ok(self.profiles.get(user_id).map(|p| p.value().clone()))
    }

    async fn upsert(&self, data: UpsertProfile) -> AppResult<HealthProfile> {
        let profile = data.into_profile(Utc::now());
        self.profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }
}
