use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::courses::service::{
    attendance_history, create_course, get_course, update_attendance, AttendanceUpdateResponse,
    CourseInput, CourseWriteResponse, UpdateAttendanceRequest,
};
use crate::errors::AppError;
use crate::models::course::{AttendanceRecord, Course};
use crate::session::SessionContext;
use crate::state::AppState;

/// GET /api/v1/courses
pub async fn handle_list_courses(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.store.list_courses(session.user_id).await?))
}

/// POST /api/v1/courses
pub async fn handle_create_course(
    State(state): State<AppState>,
    session: SessionContext,
    Json(input): Json<CourseInput>,
) -> Result<(StatusCode, Json<CourseWriteResponse>), AppError> {
    let resp = create_course(state.store.as_ref(), &session, input).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// GET /api/v1/courses/:id
pub async fn handle_get_course(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(get_course(state.store.as_ref(), &session, id).await?))
}

/// POST /api/v1/courses/:id/attendance
pub async fn handle_update_attendance(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAttendanceRequest>,
) -> Result<Json<AttendanceUpdateResponse>, AppError> {
    Ok(Json(
        update_attendance(state.store.as_ref(), &session, id, req).await?,
    ))
}

/// GET /api/v1/courses/:id/attendance
pub async fn handle_attendance_history(
    State(state): State<AppState>,
    session: SessionContext,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AttendanceRecord>>, AppError> {
    Ok(Json(
        attendance_history(state.store.as_ref(), &session, id).await?,
    ))
}
