//! Health profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Person to call in an emergency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    /// Contact name.
    pub name: String,
    /// Contact phone number.
    pub phone: String,
}

/// Critical medical facts for a user, readable through the emergency page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProfile {
    /// Owner of the profile.
    pub user_id: String,
    /// Full name.
    pub full_name: Option<String>,
    /// Blood group, e.g. `O+`.
    pub blood_group: Option<String>,
    /// Known allergies.
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Emergency contact.
    pub emergency_contact: Option<EmergencyContact>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl HealthProfile {
    /// Check whether any emergency information has been filled in.
    pub fn has_emergency_info(&self) -> bool {
        self.blood_group.is_some() || !self.allergies.is_empty() || self.emergency_contact.is_some()
    }
}

/// Data required to create or replace a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertProfile {
    /// Owner of the profile.
    pub user_id: String,
    /// Full name (required).
    pub full_name: String,
    /// Blood group.
    pub blood_group: Option<String>,
    /// Allergies, de-duplicated.
    pub allergies: Vec<String>,
    /// Emergency contact.
    pub emergency_contact: Option<EmergencyContact>,
}

impl UpsertProfile {
    /// Materialize the stored profile at `updated_at`.
    pub fn into_profile(self, updated_at: DateTime<Utc>) -> HealthProfile {
        HealthProfile {
            user_id: self.user_id,
            full_name: Some(self.full_name),
            blood_group: self.blood_group,
            allergies: self.allergies,
            emergency_contact: self.emergency_contact,
            updated_at,
        }
    }
}
