//! Reminder issuance: a reminder is written when a course enters a new tone band.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::compliance::tone::{render_message, select_tone, Tone};
use crate::models::course::Course;
use crate::models::reminder::{NewReminder, Reminder};
use crate::store::ComplianceStore;

/// Decides whether a write moved the course into a tone band that warrants a reminder.
///
/// `previous_compliance` is `None` for a freshly created course.
pub fn tone_crossed(previous_compliance: Option<f64>, compliance: f64) -> Option<Tone> {
    let tone = select_tone(compliance)?;
    let previous = previous_compliance.and_then(select_tone);
    (previous != Some(tone)).then_some(tone)
}

/// Writes a reminder for `course` if it crossed into a new tone band.
///
/// The course write has already succeeded at this point; a failed insert is
/// logged and reported as `None` rather than failing the caller.
pub async fn issue_for_course(
    store: &dyn ComplianceStore,
    course: &Course,
    previous_compliance: Option<f64>,
) -> Option<Reminder> {
    let tone = tone_crossed(previous_compliance, course.compliance_percentage)?;
    let reminder = NewReminder {
        faculty_id: course.faculty_id,
        course_id: Some(course.id),
        message: render_message(
            tone,
            &course.course_name,
            &course.course_code,
            course.compliance_percentage,
        ),
        tone,
    };

    match store.insert_reminder(&reminder).await {
        Ok(row) => {
            info!("Issued {} reminder for course {}", tone.as_str(), course.id);
            Some(row)
        }
        Err(e) => {
            warn!("Failed to issue reminder for course {}: {e}", course.id);
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderFilter {
    #[default]
    All,
    Unread,
    Read,
}

impl ReminderFilter {
    pub fn matches(&self, reminder: &Reminder) -> bool {
        match self {
            ReminderFilter::All => true,
            ReminderFilter::Unread => !reminder.is_read,
            ReminderFilter::Read => reminder.is_read,
        }
    }
}

/// A reminder as listed, with the heading for its tone.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderEntry {
    #[serde(flatten)]
    pub reminder: Reminder,
    pub label: &'static str,
}

impl From<Reminder> for ReminderEntry {
    fn from(reminder: Reminder) -> Self {
        Self {
            label: reminder.tone.label(),
            reminder,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReminderList {
    pub filter: ReminderFilter,
    pub unread_count: usize,
    pub reminders: Vec<ReminderEntry>,
}

/// Applies a filter while counting unread reminders across the whole set.
pub fn build_list(all: Vec<Reminder>, filter: ReminderFilter) -> ReminderList {
    let unread_count = all.iter().filter(|r| !r.is_read).count();
    ReminderList {
        filter,
        unread_count,
        reminders: all
            .into_iter()
            .filter(|r| filter.matches(r))
            .map(ReminderEntry::from)
            .collect(),
    }
}
