use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum FileType {
    Attendance,
    Syllabus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum UploadStatus {
    Success,
    Failed,
    Processing,
}

/// Log entry for one CSV ingestion attempt, successful or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CsvUpload {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub course_id: Option<Uuid>,
    pub file_name: String,
    pub file_type: FileType,
    pub status: UploadStatus,
    pub error_message: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCsvUpload {
    pub faculty_id: Uuid,
    pub course_id: Option<Uuid>,
    pub file_name: String,
    pub file_type: FileType,
    pub status: UploadStatus,
    pub error_message: Option<String>,
}
