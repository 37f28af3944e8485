//! Reminder tone selection: maps a compliance percentage to how urgently the
//! faculty member should be nudged, and renders the reminder text.

use serde::{Deserialize, Serialize};

use crate::compliance::thresholds::{AT_RISK, COMPLIANT, GENTLE_FLOOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "text", rename_all = "snake_case")]
pub enum Tone {
    Gentle,
    Formal,
    Escalation,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Gentle => "gentle",
            Tone::Formal => "formal",
            Tone::Escalation => "escalation",
        }
    }

    /// Heading shown above the reminder body.
    pub fn label(&self) -> &'static str {
        match self {
            Tone::Gentle => "Gentle Reminder",
            Tone::Formal => "Formal Notice",
            Tone::Escalation => "Urgent Action Required",
        }
    }
}

/// Selects the reminder tone for a compliance percentage.
///
/// Returns `None` when the course is compliant and no reminder is due.
pub fn select_tone(compliance: f64) -> Option<Tone> {
    if compliance >= COMPLIANT {
        None
    } else if compliance >= GENTLE_FLOOR {
        Some(Tone::Gentle)
    } else if compliance >= AT_RISK {
        Some(Tone::Formal)
    } else {
        Some(Tone::Escalation)
    }
}

/// Renders the reminder body for a course.
pub fn render_message(tone: Tone, course_name: &str, course_code: &str, compliance: f64) -> String {
    match tone {
        Tone::Gentle => format!(
            "{course_name} ({course_code}) is at {compliance:.1}% compliance. \
             A quick update to attendance or syllabus records will bring it back above {COMPLIANT:.0}%."
        ),
        Tone::Formal => format!(
            "Compliance for {course_name} ({course_code}) has fallen to {compliance:.1}%. \
             Please update the course records to meet the {COMPLIANT:.0}% requirement."
        ),
        Tone::Escalation => format!(
            "{course_name} ({course_code}) is at risk with {compliance:.1}% compliance. \
             Immediate action is required to restore attendance and syllabus coverage."
        ),
    }
}
