use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::compliance::classifier::classify;
use crate::errors::AppError;
use crate::models::announcement::{Announcement, NewAnnouncement};
use crate::models::course::{AttendanceChange, AttendanceRecord, AttendanceUpdate, Course, NewCourse};
use crate::models::profile::{FacultyProfile, ProfileUpdate};
use crate::models::reminder::{NewReminder, Reminder};
use crate::models::upload::{CsvUpload, NewCsvUpload};
use crate::store::ComplianceStore;

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComplianceStore for PgStore {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<FacultyProfile>, AppError> {
        Ok(
            sqlx::query_as::<_, FacultyProfile>("SELECT * FROM profiles WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn save_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<FacultyProfile>, AppError> {
        Ok(sqlx::query_as::<_, FacultyProfile>(
            r#"
            UPDATE profiles
            SET full_name = $2,
                institution_name = $3,
                years_experience = $4,
                profile_picture_url = $5,
                research_publications = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&update.full_name)
        .bind(&update.institution_name)
        .bind(update.years_experience)
        .bind(&update.profile_picture_url)
        .bind(Json(&update.research_publications))
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn insert_course(&self, course: &NewCourse) -> Result<Course, AppError> {
        let inserted = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses
                (id, faculty_id, course_name, course_code, semester,
                 attendance_percentage, syllabus_percentage, compliance_percentage, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(course.faculty_id)
        .bind(&course.course_name)
        .bind(&course.course_code)
        .bind(&course.semester)
        .bind(course.attendance_percentage)
        .bind(course.syllabus_percentage)
        .bind(course.compliance_percentage)
        .bind(course.status)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Inserted course {} ({}) for faculty {}",
            inserted.id, inserted.course_code, inserted.faculty_id
        );
        Ok(inserted)
    }

    async fn fetch_course(
        &self,
        faculty_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Course>, AppError> {
        Ok(
            sqlx::query_as::<_, Course>("SELECT * FROM courses WHERE id = $1 AND faculty_id = $2")
                .bind(course_id)
                .bind(faculty_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list_courses(&self, faculty_id: Uuid) -> Result<Vec<Course>, AppError> {
        Ok(sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE faculty_id = $1 ORDER BY created_at DESC",
        )
        .bind(faculty_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn apply_attendance_change(
        &self,
        change: &AttendanceChange,
    ) -> Result<Option<AttendanceUpdate>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Dropping `tx` on any early return rolls the whole change back.
        let current = sqlx::query_as::<_, Course>(
            "SELECT * FROM courses WHERE id = $1 AND faculty_id = $2 FOR UPDATE",
        )
        .bind(change.course_id)
        .bind(change.faculty_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(current) = current else {
            return Ok(None);
        };

        let record = sqlx::query_as::<_, AttendanceRecord>(
            r#"
            INSERT INTO attendance_records
                (id, course_id, previous_percentage, new_percentage, reason, modified_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(current.id)
        .bind(current.attendance_percentage)
        .bind(change.new_percentage)
        .bind(&change.reason)
        .bind(change.modified_by)
        .fetch_one(&mut *tx)
        .await?;

        let c = classify(change.new_percentage, current.syllabus_percentage);
        let updated = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET attendance_percentage = $2,
                compliance_percentage = $3,
                status = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(current.id)
        .bind(change.new_percentage)
        .bind(c.compliance)
        .bind(c.status)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            "Attendance for course {} changed {:.1}% -> {:.1}%",
            current.id, current.attendance_percentage, change.new_percentage
        );

        Ok(Some(AttendanceUpdate {
            course: updated,
            record,
            previous_compliance: current.compliance_percentage,
        }))
    }

    async fn list_attendance_records(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        Ok(sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance_records WHERE course_id = $1 ORDER BY modified_at DESC",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_upload(&self, upload: &NewCsvUpload) -> Result<CsvUpload, AppError> {
        Ok(sqlx::query_as::<_, CsvUpload>(
            r#"
            INSERT INTO csv_uploads
                (id, faculty_id, course_id, file_name, file_type, status, error_message)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(upload.faculty_id)
        .bind(upload.course_id)
        .bind(&upload.file_name)
        .bind(upload.file_type)
        .bind(upload.status)
        .bind(&upload.error_message)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn recent_uploads(
        &self,
        faculty_id: Uuid,
        limit: usize,
    ) -> Result<Vec<CsvUpload>, AppError> {
        Ok(sqlx::query_as::<_, CsvUpload>(
            "SELECT * FROM csv_uploads WHERE faculty_id = $1 ORDER BY uploaded_at DESC LIMIT $2",
        )
        .bind(faculty_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_reminder(&self, reminder: &NewReminder) -> Result<Reminder, AppError> {
        Ok(sqlx::query_as::<_, Reminder>(
            r#"
            INSERT INTO reminders (id, faculty_id, course_id, message, tone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(reminder.faculty_id)
        .bind(reminder.course_id)
        .bind(&reminder.message)
        .bind(reminder.tone)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_reminders(&self, faculty_id: Uuid) -> Result<Vec<Reminder>, AppError> {
        Ok(sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE faculty_id = $1 ORDER BY created_at DESC",
        )
        .bind(faculty_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn mark_reminder_read(
        &self,
        faculty_id: Uuid,
        reminder_id: Uuid,
    ) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE reminders SET is_read = TRUE WHERE id = $1 AND faculty_id = $2")
                .bind(reminder_id)
                .bind(faculty_id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_reminders_read(&self, faculty_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE reminders SET is_read = TRUE WHERE faculty_id = $1 AND is_read = FALSE",
        )
        .bind(faculty_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn insert_announcement(
        &self,
        announcement: &NewAnnouncement,
    ) -> Result<Announcement, AppError> {
        Ok(sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements (id, faculty_id, course_id, title, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(announcement.faculty_id)
        .bind(announcement.course_id)
        .bind(&announcement.title)
        .bind(&announcement.content)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_announcements(&self, faculty_id: Uuid) -> Result<Vec<Announcement>, AppError> {
        Ok(sqlx::query_as::<_, Announcement>(
            "SELECT * FROM announcements WHERE faculty_id = $1 ORDER BY created_at DESC",
        )
        .bind(faculty_id)
        .fetch_all(&self.pool)
        .await?)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::postgres::PgRow;
    use sqlx::{Decode, Encode, FromRow, Postgres, Type};

    use super::*;
    use crate::compliance::classifier::Status;
    use crate::compliance::tone::Tone;
    use crate::models::upload::{FileType, UploadStatus};

    const SCHEMA: &str = include_str!("../../migrations/0001_compliance_schema.sql");

    fn decodes_rows<T: for<'r> FromRow<'r, PgRow>>() {}

    fn text_column<T>()
    where
        T: Type<Postgres> + for<'q> Encode<'q, Postgres> + for<'r> Decode<'r, Postgres>,
    {
    }

    #[test]
    fn test_models_decode_from_rows() {
        decodes_rows::<FacultyProfile>();
        decodes_rows::<Course>();
        decodes_rows::<AttendanceRecord>();
        decodes_rows::<CsvUpload>();
        decodes_rows::<Reminder>();
        decodes_rows::<Announcement>();
    }

    #[test]
    fn test_enums_bind_as_text() {
        text_column::<Status>();
        text_column::<Tone>();
        text_column::<FileType>();
        text_column::<UploadStatus>();
    }

    /// Column CHECK constraints accept exactly the names the enums are written as.
    #[test]
    fn test_schema_checks_match_enum_names() {
        fn quoted<T: serde::Serialize>(value: T) -> String {
            serde_json::to_string(&value).unwrap().replace('"', "'")
        }

        for status in [Status::Compliant, Status::Pending, Status::AtRisk] {
            assert!(SCHEMA.contains(&quoted(status)), "{status:?}");
        }
        for tone in [Tone::Gentle, Tone::Formal, Tone::Escalation] {
            assert!(SCHEMA.contains(&quoted(tone)), "{tone:?}");
        }
        for file_type in [FileType::Attendance, FileType::Syllabus] {
            assert!(SCHEMA.contains(&quoted(file_type)), "{file_type:?}");
        }
        for status in [UploadStatus::Success, UploadStatus::Failed, UploadStatus::Processing] {
            assert!(SCHEMA.contains(&quoted(status)), "{status:?}");
        }
    }
}
