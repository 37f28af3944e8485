use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::compliance::classifier::{classify, Status};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub course_name: String,
    pub course_code: String,
    pub semester: String,
    pub attendance_percentage: f64,
    pub syllabus_percentage: f64,
    pub compliance_percentage: f64,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A course ready to insert. Compliance and status are always derived through
/// [`classify`], never supplied by the caller.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub faculty_id: Uuid,
    pub course_name: String,
    pub course_code: String,
    pub semester: String,
    pub attendance_percentage: f64,
    pub syllabus_percentage: f64,
    pub compliance_percentage: f64,
    pub status: Status,
}

impl NewCourse {
    pub fn classified(
        faculty_id: Uuid,
        course_name: String,
        course_code: String,
        semester: String,
        attendance_percentage: f64,
        syllabus_percentage: f64,
    ) -> Self {
        let c = classify(attendance_percentage, syllabus_percentage);
        Self {
            faculty_id,
            course_name,
            course_code,
            semester,
            attendance_percentage,
            syllabus_percentage,
            compliance_percentage: c.compliance,
            status: c.status,
        }
    }
}

/// Append-only audit row written for every attendance edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub course_id: Uuid,
    pub previous_percentage: f64,
    pub new_percentage: f64,
    pub reason: String,
    pub modified_by: Uuid,
    pub modified_at: DateTime<Utc>,
}

/// Input to an attendance edit. The previous value is read by the store.
#[derive(Debug, Clone)]
pub struct AttendanceChange {
    pub course_id: Uuid,
    pub faculty_id: Uuid,
    pub new_percentage: f64,
    pub reason: String,
    pub modified_by: Uuid,
}

/// Result of an applied attendance edit.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceUpdate {
    pub course: Course,
    pub record: AttendanceRecord,
    pub previous_compliance: f64,
}
