//! Dashboard pages as a closed set. Every page tag resolves to exactly one
//! variant and every variant has exactly one view; an unknown tag is an error.

pub mod handlers;

use std::str::FromStr;

use chrono::{Local, Timelike};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::course::Course;
use crate::models::profile::FacultyProfile;
use crate::models::upload::CsvUpload;
use crate::reminders::issue::{build_list, ReminderFilter, ReminderList};
use crate::reports::handlers::{report_summary, ReportSummary};
use crate::reports::summary::{build_dashboard, Dashboard};
use crate::session::SessionContext;
use crate::store::ComplianceStore;
use crate::uploads::ingest::UPLOAD_HISTORY_LIMIT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Dashboard,
    Courses,
    Upload,
    Reminders,
    Reports,
    Profile,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Dashboard,
        Page::Courses,
        Page::Upload,
        Page::Reminders,
        Page::Reports,
        Page::Profile,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Courses => "courses",
            Page::Upload => "upload",
            Page::Reminders => "reminders",
            Page::Reports => "reports",
            Page::Profile => "profile",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Courses => "Courses",
            Page::Upload => "Upload CSV",
            Page::Reminders => "Reminders",
            Page::Reports => "Reports",
            Page::Profile => "Profile",
        }
    }
}

impl FromStr for Page {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| AppError::NotFound(format!("Unknown page '{s}'")))
    }
}

#[derive(Debug, Serialize)]
pub struct NavItem {
    pub id: Page,
    pub label: &'static str,
}

pub fn nav_items() -> Vec<NavItem> {
    Page::ALL
        .into_iter()
        .map(|p| NavItem {
            id: p,
            label: p.label(),
        })
        .collect()
}

/// The data a page renders.
#[derive(Debug, Serialize)]
#[serde(tag = "page", content = "data", rename_all = "snake_case")]
pub enum PageView {
    Dashboard(Dashboard),
    Courses(Vec<Course>),
    Upload(Vec<CsvUpload>),
    Reminders(ReminderList),
    Reports(ReportSummary),
    Profile(Option<FacultyProfile>),
}

pub async fn load_page(
    store: &dyn ComplianceStore,
    session: &SessionContext,
    page: Page,
) -> Result<PageView, AppError> {
    let view = match page {
        Page::Dashboard => {
            let courses = store.list_courses(session.user_id).await?;
            PageView::Dashboard(build_dashboard(
                session.display_first_name(),
                courses,
                Local::now().hour(),
            ))
        }
        Page::Courses => PageView::Courses(store.list_courses(session.user_id).await?),
        Page::Upload => PageView::Upload(
            store
                .recent_uploads(session.user_id, UPLOAD_HISTORY_LIMIT)
                .await?,
        ),
        Page::Reminders => PageView::Reminders(build_list(
            store.list_reminders(session.user_id).await?,
            ReminderFilter::All,
        )),
        Page::Reports => {
            let courses = store.list_courses(session.user_id).await?;
            PageView::Reports(report_summary(session, courses))
        }
        Page::Profile => PageView::Profile(session.profile.clone()),
    };
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use uuid::Uuid;

    #[test]
    fn test_every_page_round_trips_through_its_tag() {
        for page in Page::ALL {
            assert_eq!(page.id().parse::<Page>().unwrap(), page);
        }
    }

    #[test]
    fn test_unknown_tag_is_not_found() {
        assert!(matches!("settings".parse::<Page>(), Err(AppError::NotFound(_))));
        assert!("Dashboard".parse::<Page>().is_err());
    }

    #[test]
    fn test_nav_items_in_menu_order() {
        let labels: Vec<_> = nav_items().iter().map(|i| i.label).collect();
        assert_eq!(
            labels,
            vec!["Dashboard", "Courses", "Upload CSV", "Reminders", "Reports", "Profile"]
        );
    }

    #[tokio::test]
    async fn test_each_page_loads_on_empty_store() {
        let store = MemoryStore::new();
        let session = SessionContext {
            user_id: Uuid::new_v4(),
            profile: None,
        };
        for page in Page::ALL {
            let view = load_page(&store, &session, page).await.unwrap();
            let json = serde_json::to_value(&view).unwrap();
            assert_eq!(json["page"], page.id());
        }
    }

    #[tokio::test]
    async fn test_reports_view_is_debuggable() {
        let store = MemoryStore::new();
        let session = SessionContext {
            user_id: Uuid::new_v4(),
            profile: None,
        };
        let view = load_page(&store, &session, Page::Reports).await.unwrap();
        let rendered = format!("{view:?}");
        assert!(rendered.starts_with("Reports("));
        assert!(rendered.contains("total_courses: 0"));
    }
}
