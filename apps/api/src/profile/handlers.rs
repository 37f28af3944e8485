use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::models::profile::{FacultyProfile, ProfileUpdate};
use crate::session::SessionContext;
use crate::state::AppState;
use crate::validation::require_text;

/// Normalizes an edit-save payload. Publications keep their submitted order.
pub fn validate_update(update: ProfileUpdate) -> Result<ProfileUpdate, AppError> {
    let full_name = require_text("Full name", &update.full_name)?;
    if update.years_experience < 0 {
        return Err(AppError::Validation(
            "Years of experience cannot be negative".to_string(),
        ));
    }

    let mut research_publications = Vec::with_capacity(update.research_publications.len());
    for (i, mut publication) in update.research_publications.into_iter().enumerate() {
        publication.title = require_text(&format!("Publication {} title", i + 1), &publication.title)?;
        publication.journal = publication
            .journal
            .map(|j| j.trim().to_string())
            .filter(|j| !j.is_empty());
        research_publications.push(publication);
    }

    Ok(ProfileUpdate {
        full_name,
        institution_name: update.institution_name.trim().to_string(),
        years_experience: update.years_experience,
        profile_picture_url: update
            .profile_picture_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty()),
        research_publications,
    })
}

/// GET /api/v1/profile
pub async fn handle_get_profile(session: SessionContext) -> Result<Json<FacultyProfile>, AppError> {
    Ok(Json(session.require_profile()?.clone()))
}

/// PUT /api/v1/profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    session: SessionContext,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<FacultyProfile>, AppError> {
    let update = validate_update(update)?;
    let saved = state
        .store
        .save_profile(session.user_id, &update)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    tracing::info!("Saved profile {}", saved.id);
    Ok(Json(saved))
}
