//! Storage seam: the tabular store behind every page.
//!
//! `AppState` holds an `Arc<dyn ComplianceStore>`, chosen at startup from
//! `STORAGE_BACKEND`. Every query is scoped to the owning faculty member.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::announcement::{Announcement, NewAnnouncement};
use crate::models::course::{AttendanceChange, AttendanceRecord, AttendanceUpdate, Course, NewCourse};
use crate::models::profile::{FacultyProfile, ProfileUpdate};
use crate::models::reminder::{NewReminder, Reminder};
use crate::models::upload::{CsvUpload, NewCsvUpload};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait ComplianceStore: Send + Sync {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<FacultyProfile>, AppError>;

    /// Overwrites the editable profile fields. `None` when no profile is provisioned.
    async fn save_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<FacultyProfile>, AppError>;

    async fn insert_course(&self, course: &NewCourse) -> Result<Course, AppError>;

    async fn fetch_course(
        &self,
        faculty_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Course>, AppError>;

    /// Newest first.
    async fn list_courses(&self, faculty_id: Uuid) -> Result<Vec<Course>, AppError>;

    /// Appends the audit record and updates the course's attendance, compliance
    /// and status as one atomic unit. `None` when the course does not exist.
    async fn apply_attendance_change(
        &self,
        change: &AttendanceChange,
    ) -> Result<Option<AttendanceUpdate>, AppError>;

    /// Newest first.
    async fn list_attendance_records(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<AttendanceRecord>, AppError>;

    async fn insert_upload(&self, upload: &NewCsvUpload) -> Result<CsvUpload, AppError>;

    async fn recent_uploads(
        &self,
        faculty_id: Uuid,
        limit: usize,
    ) -> Result<Vec<CsvUpload>, AppError>;

    async fn insert_reminder(&self, reminder: &NewReminder) -> Result<Reminder, AppError>;

    /// Newest first.
    async fn list_reminders(&self, faculty_id: Uuid) -> Result<Vec<Reminder>, AppError>;

    /// Returns false when no such reminder belongs to the faculty member.
    async fn mark_reminder_read(&self, faculty_id: Uuid, reminder_id: Uuid)
        -> Result<bool, AppError>;

    /// Returns the number of reminders flipped from unread to read.
    async fn mark_all_reminders_read(&self, faculty_id: Uuid) -> Result<u64, AppError>;

    async fn insert_announcement(
        &self,
        announcement: &NewAnnouncement,
    ) -> Result<Announcement, AppError>;

    /// Newest first.
    async fn list_announcements(&self, faculty_id: Uuid) -> Result<Vec<Announcement>, AppError>;
}
