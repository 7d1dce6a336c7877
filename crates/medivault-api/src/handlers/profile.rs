//! Health profile handlers and the public emergency page.

use axum::Json;
use axum::extract::{Path, State};

use medivault_core::error::AppError;
use medivault_service::{EmergencyView, ProfileView, UpdateProfileParams};

use crate::dto::request::{UpdateProfileRequest, validated};
use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProfileView>>, AppError> {
    let profile = state.profile_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// PUT /api/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileView>>, AppError> {
    let req = validated(req)?;
    let profile = state
        .profile_service
        .upsert_profile(
            &auth,
            UpdateProfileParams {
                full_name: req.full_name,
                blood_group: req.blood_group,
                allergies: req.allergies,
                emergency_contact: req.emergency_contact,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /emergency/{user_id}
pub async fn emergency_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<EmergencyView>>, AppError> {
    let view = state.profile_service.get_emergency_profile(&user_id).await?;
    Ok(Json(ApiResponse::ok(view)))
}
