use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::course::{AttendanceChange, AttendanceRecord, Course, NewCourse};
use crate::models::reminder::Reminder;
use crate::reminders::issue::issue_for_course;
use crate::session::SessionContext;
use crate::store::ComplianceStore;
use crate::validation::{require_text, validate_percentage};

pub const DEFAULT_SEMESTER: &str = "Fall 2025";

fn default_semester() -> String {
    DEFAULT_SEMESTER.to_string()
}

/// User-supplied course fields, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseInput {
    pub course_name: String,
    pub course_code: String,
    #[serde(default = "default_semester")]
    pub semester: String,
    pub attendance_percentage: f64,
    pub syllabus_percentage: f64,
}

impl CourseInput {
    /// Validates every field and derives compliance.
    pub fn into_new_course(self, faculty_id: Uuid) -> Result<NewCourse, AppError> {
        let course_name = require_text("Course name", &self.course_name)?;
        let course_code = require_text("Course code", &self.course_code)?;
        let semester = match self.semester.trim() {
            "" => default_semester(),
            s => s.to_string(),
        };
        let attendance = validate_percentage("Attendance", self.attendance_percentage)?;
        let syllabus = validate_percentage("Syllabus", self.syllabus_percentage)?;
        Ok(NewCourse::classified(
            faculty_id,
            course_name,
            course_code,
            semester,
            attendance,
            syllabus,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct CourseWriteResponse {
    pub course: Course,
    /// Present when the write moved the course into a new reminder tone band.
    pub reminder: Option<Reminder>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAttendanceRequest {
    pub new_percentage: f64,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct AttendanceUpdateResponse {
    pub course: Course,
    pub record: AttendanceRecord,
    pub reminder: Option<Reminder>,
}

pub async fn create_course(
    store: &dyn ComplianceStore,
    session: &SessionContext,
    input: CourseInput,
) -> Result<CourseWriteResponse, AppError> {
    session.require_profile()?;
    let new_course = input.into_new_course(session.user_id)?;
    let course = store.insert_course(&new_course).await?;
    let reminder = issue_for_course(store, &course, None).await;
    Ok(CourseWriteResponse { course, reminder })
}

pub async fn get_course(
    store: &dyn ComplianceStore,
    session: &SessionContext,
    course_id: Uuid,
) -> Result<Course, AppError> {
    store
        .fetch_course(session.user_id, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {course_id} not found")))
}

/// Records an attendance edit. The audit row and the course update commit together.
pub async fn update_attendance(
    store: &dyn ComplianceStore,
    session: &SessionContext,
    course_id: Uuid,
    req: UpdateAttendanceRequest,
) -> Result<AttendanceUpdateResponse, AppError> {
    let new_percentage = validate_percentage("Attendance", req.new_percentage)?;
    let reason = require_text("Reason", &req.reason)?;

    let update = store
        .apply_attendance_change(&AttendanceChange {
            course_id,
            faculty_id: session.user_id,
            new_percentage,
            reason,
            modified_by: session.user_id,
        })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Course {course_id} not found")))?;

    let reminder =
        issue_for_course(store, &update.course, Some(update.previous_compliance)).await;

    Ok(AttendanceUpdateResponse {
        course: update.course,
        record: update.record,
        reminder,
    })
}

pub async fn attendance_history(
    store: &dyn ComplianceStore,
    session: &SessionContext,
    course_id: Uuid,
) -> Result<Vec<AttendanceRecord>, AppError> {
    let course = get_course(store, session, course_id).await?;
    store.list_attendance_records(course.id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::classifier::Status;
    use crate::compliance::tone::Tone;
    use crate::session::tests::provisioned_session as session;
    use crate::store::MemoryStore;

    fn input(attendance: f64, syllabus: f64) -> CourseInput {
        CourseInput {
            course_name: " Data Structures ".into(),
            course_code: "CS-301".into(),
            semester: "".into(),
            attendance_percentage: attendance,
            syllabus_percentage: syllabus,
        }
    }

    #[tokio::test]
    async fn test_create_course_derives_status() {
        let store = MemoryStore::new();
        let s = session();
        let resp = create_course(&store, &s, input(60.0, 60.0)).await.unwrap();
        assert_eq!(resp.course.course_name, "Data Structures");
        assert_eq!(resp.course.semester, DEFAULT_SEMESTER);
        assert_eq!(resp.course.compliance_percentage, 60.0);
        assert_eq!(resp.course.status, Status::Pending);
        assert_eq!(resp.reminder.map(|r| r.tone), Some(Tone::Formal));
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_before_store() {
        let store = MemoryStore::new();
        let s = session();
        let err = create_course(&store, &s, input(120.0, 60.0)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.list_courses(s.user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_without_profile_writes_nothing() {
        let store = MemoryStore::new();
        let s = SessionContext {
            user_id: Uuid::new_v4(),
            profile: None,
        };
        let err = create_course(&store, &s, input(80.0, 80.0)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.list_courses(s.user_id).await.unwrap().is_empty());
        assert!(store.list_reminders(s.user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_code() {
        let store = MemoryStore::new();
        let mut bad = input(80.0, 80.0);
        bad.course_code = "  ".into();
        let err = create_course(&store, &session(), bad).await.unwrap_err();
        assert_eq!(err.user_message(), "Course code is required");
    }

    #[tokio::test]
    async fn test_update_attendance_writes_audit_and_reminder() {
        let store = MemoryStore::new();
        let s = session();
        let created = create_course(&store, &s, input(90.0, 80.0)).await.unwrap();
        assert!(created.reminder.is_none());

        let resp = update_attendance(
            &store,
            &s,
            created.course.id,
            UpdateAttendanceRequest {
                new_percentage: 20.0,
                reason: "Mid-term records".into(),
            },
        )
        .await
        .unwrap();

        assert_eq!(resp.record.previous_percentage, 90.0);
        assert_eq!(resp.course.compliance_percentage, 50.0);
        assert_eq!(resp.course.status, Status::Pending);
        assert_eq!(resp.reminder.map(|r| r.tone), Some(Tone::Formal));

        let history = attendance_history(&store, &s, created.course.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].reason, "Mid-term records");
    }

    #[tokio::test]
    async fn test_update_attendance_requires_reason() {
        let store = MemoryStore::new();
        let s = session();
        let created = create_course(&store, &s, input(90.0, 80.0)).await.unwrap();
        let err = update_attendance(
            &store,
            &s,
            created.course.id,
            UpdateAttendanceRequest {
                new_percentage: 70.0,
                reason: "".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(store
            .list_attendance_records(created.course.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_other_faculty_cannot_touch_course() {
        let store = MemoryStore::new();
        let owner = session();
        let created = create_course(&store, &owner, input(90.0, 80.0)).await.unwrap();

        let intruder = session();
        let err = update_attendance(
            &store,
            &intruder,
            created.course.id,
            UpdateAttendanceRequest {
                new_percentage: 10.0,
                reason: "x".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(get_course(&store, &intruder, created.course.id).await.is_err());
    }
}
