pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::announcements::handlers as announcements;
use crate::courses::handlers as courses;
use crate::navigation::handlers as navigation;
use crate::profile::handlers as profile;
use crate::reminders::handlers as reminders;
use crate::reports::handlers as reports;
use crate::state::AppState;
use crate::uploads::handlers as uploads;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Navigation
        .route("/api/v1/navigation", get(navigation::handle_navigation))
        .route("/api/v1/pages/:page", get(navigation::handle_page))
        // Dashboard & reports
        .route("/api/v1/dashboard", get(reports::handle_dashboard))
        .route("/api/v1/reports/summary", get(reports::handle_report_summary))
        .route("/api/v1/reports/export", get(reports::handle_export))
        // Courses
        .route(
            "/api/v1/courses",
            get(courses::handle_list_courses).post(courses::handle_create_course),
        )
        .route("/api/v1/courses/:id", get(courses::handle_get_course))
        .route(
            "/api/v1/courses/:id/attendance",
            get(courses::handle_attendance_history).post(courses::handle_update_attendance),
        )
        // CSV uploads
        .route(
            "/api/v1/uploads",
            get(uploads::handle_upload_history).post(uploads::handle_upload),
        )
        // Reminders
        .route("/api/v1/reminders", get(reminders::handle_list_reminders))
        .route(
            "/api/v1/reminders/read-all",
            post(reminders::handle_mark_all_read),
        )
        .route(
            "/api/v1/reminders/:id/read",
            patch(reminders::handle_mark_read),
        )
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_save_profile),
        )
        // Announcements
        .route(
            "/api/v1/announcements",
            get(announcements::handle_list_announcements)
                .post(announcements::handle_create_announcement),
        )
        .with_state(state)
}
