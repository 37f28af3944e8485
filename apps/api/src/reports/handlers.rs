use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::course::Course;
use crate::reports::export::{export_csv, export_text, report_file_name, ExportFormat};
use crate::reports::summary::{build_dashboard, summarize, ComplianceSummary, Dashboard};
use crate::session::SessionContext;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct DashboardQuery {
    /// Caller's local hour, used for the greeting. Defaults to server time.
    pub hour: Option<u32>,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub format: ExportFormat,
}

#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub generated_at: DateTime<Utc>,
    pub faculty_name: Option<String>,
    pub institution_name: Option<String>,
    pub summary: ComplianceSummary,
    pub courses: Vec<Course>,
}

pub fn report_summary(session: &SessionContext, courses: Vec<Course>) -> ReportSummary {
    ReportSummary {
        generated_at: Utc::now(),
        faculty_name: session.profile.as_ref().map(|p| p.full_name.clone()),
        institution_name: session.profile.as_ref().map(|p| p.institution_name.clone()),
        summary: summarize(&courses),
        courses,
    }
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    session: SessionContext,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<Dashboard>, AppError> {
    let hour = match params.hour {
        Some(h) if h < 24 => h,
        Some(_) => return Err(AppError::Validation("hour must be between 0 and 23".to_string())),
        None => Local::now().hour(),
    };
    let courses = state.store.list_courses(session.user_id).await?;
    Ok(Json(build_dashboard(session.display_first_name(), courses, hour)))
}

/// GET /api/v1/reports/summary
pub async fn handle_report_summary(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<ReportSummary>, AppError> {
    let courses = state.store.list_courses(session.user_id).await?;
    Ok(Json(report_summary(&session, courses)))
}

/// GET /api/v1/reports/export?format=csv|text
pub async fn handle_export(
    State(state): State<AppState>,
    session: SessionContext,
    Query(params): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let courses = state.store.list_courses(session.user_id).await?;
    let now = Utc::now();
    let body = match params.format {
        ExportFormat::Csv => export_csv(&courses)?,
        ExportFormat::Text => export_text(session.profile.as_ref(), &courses, now)?.into(),
    };
    let file_name = report_file_name(params.format, now.date_naive());

    Ok((
        [
            (header::CONTENT_TYPE, params.format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    ))
}
