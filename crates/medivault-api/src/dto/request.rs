//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use medivault_core::error::AppError;
use medivault_entity::profile::EmergencyContact;
use medivault_entity::share::{ShareDuration, ViewLimit};

/// Run the derived validation rules, mapping failures to a 400.
pub fn validated<T: Validate>(request: T) -> Result<T, AppError> {
    request
        .validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;
    Ok(request)
}

/// Share link creation body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// `1_hour`, `1_day` or `7_days`.
    pub duration: ShareDuration,
    /// `1`, `5`, `10` or `0` for unlimited.
    pub max_views: ViewLimit,
}

/// Profile save body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// Full name.
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    /// Blood group, e.g. `O+`.
    #[validate(length(max = 8))]
    pub blood_group: Option<String>,
    /// Known allergies.
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Emergency contact.
    pub emergency_contact: Option<EmergencyContact>,
}

/// Assistant question body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AskRequest {
    /// The question.
    #[validate(length(min = 1, max = 2000, message = "Question is required"))]
    pub query: String,
}
