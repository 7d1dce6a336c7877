//! Profile service.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use medivault_core::config::ShareConfig;
use medivault_core::error::AppError;
use medivault_core::result::AppResult;
use medivault_entity::document::dedup_preserving_order;
use medivault_entity::profile::{EmergencyContact, HealthProfile, UpsertProfile};

use crate::context::RequestContext;
use crate::sources::DataSources;

/// Fields accepted when saving a profile.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParams {
    /// Full name (required).
    pub full_name: String,
    /// Blood group.
    pub blood_group: Option<String>,
    /// Allergies as entered.
    pub allergies: Vec<String>,
    /// Emergency contact.
    pub emergency_contact: Option<EmergencyContact>,
}

/// Owner view of a profile, with the emergency URL to print or share.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    /// The stored profile.
    #[serde(flatten)]
    pub profile: HealthProfile,
    /// `{base}/emergency/{user_id}`.
    pub emergency_url: String,
}

/// Public emergency view: only what a first responder needs.
#[derive(Debug, Clone, Serialize)]
pub struct EmergencyView {
    /// Full name.
    pub full_name: Option<String>,
    /// Blood group.
    pub blood_group: Option<String>,
    /// Known allergies.
    pub allergies: Vec<String>,
    /// Emergency contact.
    pub emergency_contact: Option<EmergencyContact>,
}

impl From<HealthProfile> for EmergencyView {
    fn from(profile: HealthProfile) -> Self {
        Self {
            full_name: profile.full_name,
            blood_group: profile.blood_group,
            allergies: profile.allergies,
            emergency_contact: profile.emergency_contact,
        }
    }
}

/// Reads and writes health profiles.
#[derive(Debug, Clone)]
pub struct ProfileService {
    sources: Arc<DataSources>,
    config: ShareConfig,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(sources: Arc<DataSources>, config: ShareConfig) -> Self {
        Self { sources, config }
    }

    /// The caller's profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<ProfileView> {
        let profile = self
            .sources
            .profiles_for(&ctx.user_id)
            .find_by_user(&ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Profile not found"))?;
        Ok(self.view(profile))
    }

    /// Create or replace the caller's profile.
    pub async fn upsert_profile(
        &self,
        ctx: &RequestContext,
        params: UpdateProfileParams,
    ) -> AppResult<ProfileView> {
        let full_name = params.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(AppError::validation("Full name is required"));
        }

        let emergency_contact = params
            .emergency_contact
            .map(|c| EmergencyContact {
                name: c.name.trim().to_string(),
                phone: c.phone.trim().to_string(),
            })
            .filter(|c| !c.name.is_empty() || !c.phone.is_empty());

        let profile = self
            .sources
            .profiles_for(&ctx.user_id)
            .upsert(UpsertProfile {
                user_id: ctx.user_id.clone(),
                full_name,
                blood_group: non_blank(params.blood_group),
                allergies: dedup_preserving_order(&params.allergies),
                emergency_contact,
            })
            .await?;

        info!(user_id = %ctx.user_id, "Profile saved");
        Ok(self.view(profile))
    }

    /// Public emergency read. No expiry and no quota.
    pub async fn get_emergency_profile(&self, user_id: &str) -> AppResult<EmergencyView> {
        let profile = self
            .sources
            .profiles_for(user_id)
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No emergency information for this user"))?;

        debug!(user_id, "Emergency profile read");
        Ok(profile.into())
    }

    fn view(&self, profile: HealthProfile) -> ProfileView {
        ProfileView {
            emergency_url: self.config.emergency_url(&profile.user_id),
            profile,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
