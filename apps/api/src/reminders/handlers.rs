use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::reminders::issue::{build_list, ReminderFilter, ReminderList};
use crate::session::SessionContext;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub filter: ReminderFilter,
}

#[derive(Serialize)]
pub struct MarkAllResponse {
    pub updated: u64,
}

/// GET /api/v1/reminders
pub async fn handle_list_reminders(
    State(state): State<AppState>,
    session: SessionContext,
    Query(params): Query<FilterQuery>,
) -> Result<Json<ReminderList>, AppError> {
    let all = state.store.list_reminders(session.user_id).await?;
    Ok(Json(build_list(all, params.filter)))
}

/// PATCH /api/v1/reminders/:id/read
pub async fn handle_mark_read(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.store.mark_reminder_read(session.user_id, id).await? {
        return Err(AppError::NotFound(format!("Reminder {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/reminders/read-all
pub async fn handle_mark_all_read(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<MarkAllResponse>, AppError> {
    let updated = state.store.mark_all_reminders_read(session.user_id).await?;
    Ok(Json(MarkAllResponse { updated }))
}
