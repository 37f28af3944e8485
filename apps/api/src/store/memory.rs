use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::compliance::classifier::classify;
use crate::errors::AppError;
use crate::models::announcement::{Announcement, NewAnnouncement};
use crate::models::course::{AttendanceChange, AttendanceRecord, AttendanceUpdate, Course, NewCourse};
use crate::models::profile::{FacultyProfile, ProfileUpdate};
use crate::models::reminder::{NewReminder, Reminder};
use crate::models::upload::{CsvUpload, NewCsvUpload};
use crate::store::ComplianceStore;

#[derive(Default)]
struct Tables {
    profiles: Vec<FacultyProfile>,
    courses: Vec<Course>,
    attendance_records: Vec<AttendanceRecord>,
    csv_uploads: Vec<CsvUpload>,
    reminders: Vec<Reminder>,
    announcements: Vec<Announcement>,
}

/// Process-local store. Rows are kept in insertion order, so "newest first"
/// is a reverse scan.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a profile, standing in for identity-service provisioning.
    pub async fn provision_profile(&self, profile: FacultyProfile) {
        let mut tables = self.tables.write().await;
        tables.profiles.retain(|p| p.id != profile.id);
        tables.profiles.push(profile);
    }
}

#[async_trait]
impl ComplianceStore for MemoryStore {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<FacultyProfile>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.id == user_id).cloned())
    }

    async fn save_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<FacultyProfile>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(profile) = tables.profiles.iter_mut().find(|p| p.id == user_id) else {
            return Ok(None);
        };
        profile.full_name = update.full_name.clone();
        profile.institution_name = update.institution_name.clone();
        profile.years_experience = update.years_experience;
        profile.profile_picture_url = update.profile_picture_url.clone();
        profile.research_publications = update.research_publications.clone();
        profile.updated_at = Utc::now();
        Ok(Some(profile.clone()))
    }

    async fn insert_course(&self, course: &NewCourse) -> Result<Course, AppError> {
        let now = Utc::now();
        let row = Course {
            id: Uuid::new_v4(),
            faculty_id: course.faculty_id,
            course_name: course.course_name.clone(),
            course_code: course.course_code.clone(),
            semester: course.semester.clone(),
            attendance_percentage: course.attendance_percentage,
            syllabus_percentage: course.syllabus_percentage,
            compliance_percentage: course.compliance_percentage,
            status: course.status,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.courses.push(row.clone());
        Ok(row)
    }

    async fn fetch_course(
        &self,
        faculty_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Course>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .iter()
            .find(|c| c.id == course_id && c.faculty_id == faculty_id)
            .cloned())
    }

    async fn list_courses(&self, faculty_id: Uuid) -> Result<Vec<Course>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .courses
            .iter()
            .rev()
            .filter(|c| c.faculty_id == faculty_id)
            .cloned()
            .collect())
    }

    async fn apply_attendance_change(
        &self,
        change: &AttendanceChange,
    ) -> Result<Option<AttendanceUpdate>, AppError> {
        // One write guard covers both the audit append and the course update.
        let mut tables = self.tables.write().await;
        let Some(course) = tables
            .courses
            .iter_mut()
            .find(|c| c.id == change.course_id && c.faculty_id == change.faculty_id)
        else {
            return Ok(None);
        };

        let now = Utc::now();
        let record = AttendanceRecord {
            id: Uuid::new_v4(),
            course_id: course.id,
            previous_percentage: course.attendance_percentage,
            new_percentage: change.new_percentage,
            reason: change.reason.clone(),
            modified_by: change.modified_by,
            modified_at: now,
        };
        let previous_compliance = course.compliance_percentage;

        let c = classify(change.new_percentage, course.syllabus_percentage);
        course.attendance_percentage = change.new_percentage;
        course.compliance_percentage = c.compliance;
        course.status = c.status;
        course.updated_at = now;
        let course = course.clone();

        tables.attendance_records.push(record.clone());
        Ok(Some(AttendanceUpdate {
            course,
            record,
            previous_compliance,
        }))
    }

    async fn list_attendance_records(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .attendance_records
            .iter()
            .rev()
            .filter(|r| r.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn insert_upload(&self, upload: &NewCsvUpload) -> Result<CsvUpload, AppError> {
        let row = CsvUpload {
            id: Uuid::new_v4(),
            faculty_id: upload.faculty_id,
            course_id: upload.course_id,
            file_name: upload.file_name.clone(),
            file_type: upload.file_type,
            status: upload.status,
            error_message: upload.error_message.clone(),
            uploaded_at: Utc::now(),
        };
        self.tables.write().await.csv_uploads.push(row.clone());
        Ok(row)
    }

    async fn recent_uploads(
        &self,
        faculty_id: Uuid,
        limit: usize,
    ) -> Result<Vec<CsvUpload>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .csv_uploads
            .iter()
            .rev()
            .filter(|u| u.faculty_id == faculty_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_reminder(&self, reminder: &NewReminder) -> Result<Reminder, AppError> {
        let row = Reminder {
            id: Uuid::new_v4(),
            faculty_id: reminder.faculty_id,
            course_id: reminder.course_id,
            message: reminder.message.clone(),
            tone: reminder.tone,
            is_read: false,
            created_at: Utc::now(),
        };
        self.tables.write().await.reminders.push(row.clone());
        Ok(row)
    }

    async fn list_reminders(&self, faculty_id: Uuid) -> Result<Vec<Reminder>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .reminders
            .iter()
            .rev()
            .filter(|r| r.faculty_id == faculty_id)
            .cloned()
            .collect())
    }

    async fn mark_reminder_read(
        &self,
        faculty_id: Uuid,
        reminder_id: Uuid,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables
            .reminders
            .iter_mut()
            .find(|r| r.id == reminder_id && r.faculty_id == faculty_id)
        {
            Some(reminder) => {
                reminder.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_reminders_read(&self, faculty_id: Uuid) -> Result<u64, AppError> {
        let mut tables = self.tables.write().await;
        let mut flipped = 0;
        for reminder in tables
            .reminders
            .iter_mut()
            .filter(|r| r.faculty_id == faculty_id && !r.is_read)
        {
            reminder.is_read = true;
            flipped += 1;
        }
        Ok(flipped)
    }

    async fn insert_announcement(
        &self,
        announcement: &NewAnnouncement,
    ) -> Result<Announcement, AppError> {
        let row = Announcement {
            id: Uuid::new_v4(),
            faculty_id: announcement.faculty_id,
            course_id: announcement.course_id,
            title: announcement.title.clone(),
            content: announcement.content.clone(),
            created_at: Utc::now(),
        };
        self.tables.write().await.announcements.push(row.clone());
        Ok(row)
    }

    async fn list_announcements(&self, faculty_id: Uuid) -> Result<Vec<Announcement>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .announcements
            .iter()
            .rev()
            .filter(|a| a.faculty_id == faculty_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::classifier::Status;

    fn new_course(faculty_id: Uuid, attendance: f64, syllabus: f64) -> NewCourse {
        NewCourse::classified(
            faculty_id,
            "Data Structures".into(),
            "CS-301".into(),
            "Fall 2025".into(),
            attendance,
            syllabus,
        )
    }

    #[tokio::test]
    async fn test_course_round_trip() {
        let store = MemoryStore::new();
        let faculty = Uuid::new_v4();
        let input = new_course(faculty, 80.0, 70.0);
        let created = store.insert_course(&input).await.unwrap();
        let read = store.fetch_course(faculty, created.id).await.unwrap().unwrap();

        assert_eq!(read, created);
        assert_eq!(read.course_name, input.course_name);
        assert_eq!(read.course_code, input.course_code);
        assert_eq!(read.semester, input.semester);
        assert_eq!(read.attendance_percentage, 80.0);
        assert_eq!(read.syllabus_percentage, 70.0);
        assert_eq!(read.compliance_percentage, 75.0);
        assert_eq!(read.status, Status::Compliant);
    }

    #[tokio::test]
    async fn test_courses_scoped_to_faculty() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let course = store.insert_course(&new_course(alice, 90.0, 90.0)).await.unwrap();

        assert!(store.fetch_course(bob, course.id).await.unwrap().is_none());
        assert!(store.list_courses(bob).await.unwrap().is_empty());
        assert_eq!(store.list_courses(alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryStore::new();
        let faculty = Uuid::new_v4();
        let first = store.insert_course(&new_course(faculty, 10.0, 10.0)).await.unwrap();
        let second = store.insert_course(&new_course(faculty, 20.0, 20.0)).await.unwrap();
        let ids: Vec<_> = store
            .list_courses(faculty)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_attendance_change_appends_record_and_reclassifies() {
        let store = MemoryStore::new();
        let faculty = Uuid::new_v4();
        let course = store.insert_course(&new_course(faculty, 80.0, 70.0)).await.unwrap();

        let update = store
            .apply_attendance_change(&AttendanceChange {
                course_id: course.id,
                faculty_id: faculty,
                new_percentage: 30.0,
                reason: "Updated with latest class records".into(),
                modified_by: faculty,
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(update.previous_compliance, 75.0);
        assert_eq!(update.record.previous_percentage, 80.0);
        assert_eq!(update.record.new_percentage, 30.0);
        assert_eq!(update.course.compliance_percentage, 50.0);
        assert_eq!(update.course.status, Status::Pending);

        let records = store.list_attendance_records(course.id).await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_attendance_change_on_missing_course_writes_nothing() {
        let store = MemoryStore::new();
        let faculty = Uuid::new_v4();
        let course_id = Uuid::new_v4();
        let result = store
            .apply_attendance_change(&AttendanceChange {
                course_id,
                faculty_id: faculty,
                new_percentage: 50.0,
                reason: "typo".into(),
                modified_by: faculty,
            })
            .await
            .unwrap();
        assert!(result.is_none());
        assert!(store.list_attendance_records(course_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_uploads_respects_limit() {
        let store = MemoryStore::new();
        let faculty = Uuid::new_v4();
        for i in 0..12 {
            store
                .insert_upload(&NewCsvUpload {
                    faculty_id: faculty,
                    course_id: None,
                    file_name: format!("week-{i}.csv"),
                    file_type: crate::models::upload::FileType::Attendance,
                    status: crate::models::upload::UploadStatus::Success,
                    error_message: None,
                })
                .await
                .unwrap();
        }
        let recent = store.recent_uploads(faculty, 10).await.unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].file_name, "week-11.csv");
    }
}
