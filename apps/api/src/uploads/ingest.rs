//! CSV ingestion: turns an upload form into a course plus its upload log rows.

use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::compliance::csv_extract::{extract_percentage, CsvError};
use crate::courses::service::{create_course, CourseInput};
use crate::errors::AppError;
use crate::models::course::Course;
use crate::models::reminder::Reminder;
use crate::models::upload::{CsvUpload, FileType, NewCsvUpload, UploadStatus};
use crate::session::SessionContext;
use crate::store::ComplianceStore;
use crate::validation::require_text;

/// Number of log rows shown in the upload history.
pub const UPLOAD_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct CsvFile {
    pub file_name: String,
    pub contents: Bytes,
}

impl CsvFile {
    fn average(&self) -> Result<f64, CsvError> {
        let text = std::str::from_utf8(&self.contents).map_err(|_| CsvError::Format)?;
        extract_percentage(text)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub course_name: String,
    pub course_code: String,
    pub semester: Option<String>,
    pub attendance: Option<CsvFile>,
    pub syllabus: Option<CsvFile>,
}

impl UploadForm {
    fn files(&self) -> impl Iterator<Item = (FileType, &CsvFile)> {
        [
            (FileType::Attendance, self.attendance.as_ref()),
            (FileType::Syllabus, self.syllabus.as_ref()),
        ]
        .into_iter()
        .filter_map(|(file_type, file)| file.map(|f| (file_type, f)))
    }
}

#[derive(Debug, Serialize)]
pub struct UploadOutcome {
    pub course: Course,
    pub reminder: Option<Reminder>,
    pub uploads: Vec<CsvUpload>,
}

/// Creates a course from the uploaded CSV averages.
///
/// Form validation failures return before anything is written. Once parsing
/// starts, any failure logs one `failed` row per provided file, carrying the
/// error text, before the error is returned. A missing file contributes 0%.
pub async fn ingest_upload(
    store: &dyn ComplianceStore,
    session: &SessionContext,
    form: UploadForm,
) -> Result<UploadOutcome, AppError> {
    session.require_profile()?;
    require_text("Course name", &form.course_name)?;
    require_text("Course code", &form.course_code)?;
    if form.attendance.is_none() && form.syllabus.is_none() {
        return Err(AppError::Validation(
            "Please upload at least one CSV file".to_string(),
        ));
    }

    match create_from_files(store, session, &form).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            warn!("Upload for {} failed: {e}", form.course_code.trim());
            log_failures(store, session, &form, &e.user_message()).await;
            Err(e)
        }
    }
}

async fn create_from_files(
    store: &dyn ComplianceStore,
    session: &SessionContext,
    form: &UploadForm,
) -> Result<UploadOutcome, AppError> {
    let attendance = form.attendance.as_ref().map(CsvFile::average).transpose()?;
    let syllabus = form.syllabus.as_ref().map(CsvFile::average).transpose()?;

    let written = create_course(
        store,
        session,
        CourseInput {
            course_name: form.course_name.clone(),
            course_code: form.course_code.clone(),
            semester: form.semester.clone().unwrap_or_default(),
            attendance_percentage: attendance.unwrap_or(0.0),
            syllabus_percentage: syllabus.unwrap_or(0.0),
        },
    )
    .await?;

    let mut uploads = Vec::new();
    for (file_type, file) in form.files() {
        let row = NewCsvUpload {
            faculty_id: session.user_id,
            course_id: Some(written.course.id),
            file_name: file.file_name.clone(),
            file_type,
            status: UploadStatus::Success,
            error_message: None,
        };
        // The course already exists; a missing log row is not worth failing over.
        match store.insert_upload(&row).await {
            Ok(upload) => uploads.push(upload),
            Err(e) => warn!("Failed to log upload of {}: {e}", file.file_name),
        }
    }

    info!(
        "Created course {} from {} CSV file(s)",
        written.course.id,
        uploads.len()
    );

    Ok(UploadOutcome {
        course: written.course,
        reminder: written.reminder,
        uploads,
    })
}

async fn log_failures(
    store: &dyn ComplianceStore,
    session: &SessionContext,
    form: &UploadForm,
    message: &str,
) {
    for (file_type, file) in form.files() {
        let row = NewCsvUpload {
            faculty_id: session.user_id,
            course_id: None,
            file_name: file.file_name.clone(),
            file_type,
            status: UploadStatus::Failed,
            error_message: Some(message.to_string()),
        };
        if let Err(e) = store.insert_upload(&row).await {
            warn!("Failed to log failed upload of {}: {e}", file.file_name);
        }
    }
}
