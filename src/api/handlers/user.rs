use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use crate::api::dtos::requests::UpdateProfileRequest;
use crate::api::extractors::auth::AuthUser;
use crate::api::extractors::json::ApiJson;
use crate::api::validation::{blank_to_none, FieldErrors};
use crate::domain::models::auth::UserProfile;
use crate::domain::models::user::normalize_email;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use tracing::info;

pub async fn update_me(
    State(state): State<Arc<AppState>>,
    AuthUser(mut user): AuthUser,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut errors = FieldErrors::new();
    if let Some(name) = &payload.name {
        errors.min_len("name", name, 2, "Name must be at least 2 characters");
    }
    if let Some(email) = &payload.email {
        errors.email("email", email);
    }
    errors.finish()?;

    if let Some(name) = payload.name {
        user.name = name.trim().to_string();
    }
    if let Some(email) = payload.email {
        let email = normalize_email(&email);
        if email != user.email {
            if state.user_repo.find_by_email(&email).await?.is_some() {
                return Err(AppError::Validation("User with this email already exists".into()));
            }
            user.email = email;
        }
    }
    if payload.image.is_some() {
        user.image = blank_to_none(payload.image);
    }
    user.updated_at = Utc::now();

    let updated = state.user_repo.update(&user).await?;
    info!("Updated profile for user: {}", updated.id);

    Ok(Json(UserProfile::from(updated)))
}
