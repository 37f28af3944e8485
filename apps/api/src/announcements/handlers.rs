use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::announcement::{Announcement, NewAnnouncement};
use crate::session::SessionContext;
use crate::state::AppState;
use crate::validation::require_text;

#[derive(Deserialize)]
pub struct CreateAnnouncementRequest {
    pub course_id: Option<Uuid>,
    pub title: String,
    pub content: String,
}

/// GET /api/v1/announcements
pub async fn handle_list_announcements(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<Vec<Announcement>>, AppError> {
    Ok(Json(state.store.list_announcements(session.user_id).await?))
}

/// POST /api/v1/announcements
pub async fn handle_create_announcement(
    State(state): State<AppState>,
    session: SessionContext,
    Json(req): Json<CreateAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    session.require_profile()?;
    let title = require_text("Title", &req.title)?;
    let content = require_text("Content", &req.content)?;

    if let Some(course_id) = req.course_id {
        if state
            .store
            .fetch_course(session.user_id, course_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!("Course {course_id} not found")));
        }
    }

    let announcement = state
        .store
        .insert_announcement(&NewAnnouncement {
            faculty_id: session.user_id,
            course_id: req.course_id,
            title,
            content,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}
