use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::upload::CsvUpload;
use crate::session::SessionContext;
use crate::state::AppState;
use crate::uploads::ingest::{ingest_upload, CsvFile, UploadForm, UploadOutcome, UPLOAD_HISTORY_LIMIT};

fn malformed(e: MultipartError) -> AppError {
    AppError::Validation(format!("Malformed upload: {e}"))
}

/// Reads the multipart form. Unknown fields are ignored; an empty file part
/// (no file chosen) counts as absent.
async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "course_name" => form.course_name = field.text().await.map_err(malformed)?,
            "course_code" => form.course_code = field.text().await.map_err(malformed)?,
            "semester" => form.semester = Some(field.text().await.map_err(malformed)?),
            "attendance_file" | "syllabus_file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let contents = field.bytes().await.map_err(malformed)?;
                if file_name.is_empty() && contents.is_empty() {
                    continue;
                }
                let file = Some(CsvFile {
                    file_name,
                    contents,
                });
                if name == "attendance_file" {
                    form.attendance = file;
                } else {
                    form.syllabus = file;
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// POST /api/v1/uploads
pub async fn handle_upload(
    State(state): State<AppState>,
    session: SessionContext,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadOutcome>), AppError> {
    let form = read_form(&mut multipart).await?;
    let outcome = ingest_upload(state.store.as_ref(), &session, form).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// GET /api/v1/uploads
pub async fn handle_upload_history(
    State(state): State<AppState>,
    session: SessionContext,
) -> Result<Json<Vec<CsvUpload>>, AppError> {
    Ok(Json(
        state
            .store
            .recent_uploads(session.user_id, UPLOAD_HISTORY_LIMIT)
            .await?,
    ))
}
