use serde::Serialize;

use crate::compliance::classifier::Status;
use crate::compliance::thresholds::COMPLIANT;
use crate::models::course::Course;

/// Courses shown on the dashboard's recent list.
pub const RECENT_COURSE_COUNT: usize = 6;

const RECOMMENDATIONS_BELOW_TARGET: &[&str] = &[
    "Consider reviewing and updating course records for low-compliance courses",
    "Upload recent attendance and syllabus data",
    "Address at-risk courses immediately",
];

const RECOMMENDATIONS_ON_TARGET: &[&str] = &[
    "Maintain current compliance levels",
    "Continue regular updates to course records",
    "Monitor any courses approaching compliance thresholds",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn of(value: f64) -> Self {
        if value >= COMPLIANT {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComplianceSummary {
    pub total_courses: usize,
    pub average_attendance: f64,
    pub average_syllabus: f64,
    pub average_compliance: f64,
    pub compliant_count: usize,
    pub pending_count: usize,
    pub at_risk_count: usize,
    pub recommendations: Vec<&'static str>,
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f64>() / count as f64
    }
}

/// Aggregates a faculty member's courses. Averages are 0 when there are no courses.
pub fn summarize(courses: &[Course]) -> ComplianceSummary {
    let n = courses.len();
    let average_compliance = mean(courses.iter().map(|c| c.compliance_percentage), n);
    let count = |status: Status| courses.iter().filter(|c| c.status == status).count();

    ComplianceSummary {
        total_courses: n,
        average_attendance: mean(courses.iter().map(|c| c.attendance_percentage), n),
        average_syllabus: mean(courses.iter().map(|c| c.syllabus_percentage), n),
        average_compliance,
        compliant_count: count(Status::Compliant),
        pending_count: count(Status::Pending),
        at_risk_count: count(Status::AtRisk),
        recommendations: if average_compliance < COMPLIANT {
            RECOMMENDATIONS_BELOW_TARGET.to_vec()
        } else {
            RECOMMENDATIONS_ON_TARGET.to_vec()
        },
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricTrends {
    pub attendance: Trend,
    pub syllabus: Trend,
    pub compliance: Trend,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub greeting: &'static str,
    pub first_name: String,
    pub summary: ComplianceSummary,
    pub trends: MetricTrends,
    pub recent_courses: Vec<Course>,
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good Morning",
        12..=17 => "Good Afternoon",
        _ => "Good Evening",
    }
}

/// Builds the landing view. `courses` must already be newest first.
pub fn build_dashboard(first_name: &str, mut courses: Vec<Course>, hour: u32) -> Dashboard {
    let summary = summarize(&courses);
    let trends = MetricTrends {
        attendance: Trend::of(summary.average_attendance),
        syllabus: Trend::of(summary.average_syllabus),
        compliance: Trend::of(summary.average_compliance),
    };
    courses.truncate(RECENT_COURSE_COUNT);
    Dashboard {
        greeting: greeting_for_hour(hour),
        first_name: first_name.to_string(),
        summary,
        trends,
        recent_courses: courses,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::course::NewCourse;

    pub(crate) fn course(name: &str, attendance: f64, syllabus: f64) -> Course {
        let n = NewCourse::classified(
            Uuid::nil(),
            name.to_string(),
            format!("{}-101", &name[..2].to_uppercase()),
            "Fall 2025".into(),
            attendance,
            syllabus,
        );
        Course {
            id: Uuid::new_v4(),
            faculty_id: n.faculty_id,
            course_name: n.course_name,
            course_code: n.course_code,
            semester: n.semester,
            attendance_percentage: n.attendance_percentage,
            syllabus_percentage: n.syllabus_percentage,
            compliance_percentage: n.compliance_percentage,
            status: n.status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let s = summarize(&[]);
        assert_eq!(s.total_courses, 0);
        assert_eq!(s.average_attendance, 0.0);
        assert_eq!(s.average_compliance, 0.0);
        assert_eq!(s.recommendations, RECOMMENDATIONS_BELOW_TARGET.to_vec());
    }

    #[test]
    fn test_summary_counts_and_averages() {
        let courses = vec![
            course("Algorithms", 80.0, 70.0),
            course("Networks", 60.0, 60.0),
            course("Compilers", 40.0, 30.0),
        ];
        let s = summarize(&courses);
        assert_eq!(s.total_courses, 3);
        assert_eq!(s.average_attendance, 60.0);
        assert!((s.average_syllabus - 160.0 / 3.0).abs() < 1e-9);
        assert!((s.average_compliance - 170.0 / 3.0).abs() < 1e-9);
        assert_eq!(
            (s.compliant_count, s.pending_count, s.at_risk_count),
            (1, 1, 1)
        );
    }

    #[test]
    fn test_on_target_recommendations() {
        let s = summarize(&[course("Algorithms", 90.0, 90.0)]);
        assert_eq!(s.recommendations[0], "Maintain current compliance levels");
    }

    #[test]
    fn test_greeting_boundaries() {
        assert_eq!(greeting_for_hour(0), "Good Morning");
        assert_eq!(greeting_for_hour(11), "Good Morning");
        assert_eq!(greeting_for_hour(12), "Good Afternoon");
        assert_eq!(greeting_for_hour(17), "Good Afternoon");
        assert_eq!(greeting_for_hour(18), "Good Evening");
    }

    #[test]
    fn test_dashboard_keeps_six_recent() {
        let courses: Vec<_> = (0..8).map(|i| course(&format!("Course {i}"), 90.0, 80.0)).collect();
        let d = build_dashboard("Ada", courses, 9);
        assert_eq!(d.recent_courses.len(), RECENT_COURSE_COUNT);
        assert_eq!(d.summary.total_courses, 8);
        assert_eq!(d.trends.compliance, Trend::Up);
        assert_eq!(d.greeting, "Good Morning");
    }
}
