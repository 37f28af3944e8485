//! Report export: renders the course list as CSV or a plain-text document.

use std::fmt::{self, Write};

use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::course::Course;
use crate::models::profile::FacultyProfile;
use crate::reports::summary::summarize;

pub const CSV_HEADERS: [&str; 7] = [
    "Course Name",
    "Course Code",
    "Semester",
    "Attendance %",
    "Syllabus %",
    "Compliance %",
    "Status",
];

const RULE: &str = "========================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Text,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "txt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Text => "text/plain; charset=utf-8",
        }
    }
}

pub fn report_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("compliance-report-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// One summary row per course.
pub fn export_csv(courses: &[Course]) -> Result<Bytes, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(CSV_HEADERS)
        .context("failed to write CSV header")?;
    for c in courses {
        writer
            .write_record([
                c.course_name.clone(),
                c.course_code.clone(),
                c.semester.clone(),
                c.attendance_percentage.to_string(),
                c.syllabus_percentage.to_string(),
                c.compliance_percentage.to_string(),
                c.status.as_str().to_string(),
            ])
            .context("failed to write CSV row")?;
    }
    let data = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush CSV report: {e}"))?;
    Ok(Bytes::from(data))
}

fn section(out: &mut impl Write, title: &str) -> fmt::Result {
    writeln!(out, "{RULE}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{RULE}")
}

/// The full plain-text compliance report.
pub fn export_text(
    profile: Option<&FacultyProfile>,
    courses: &[Course],
    generated_at: DateTime<Utc>,
) -> Result<String, AppError> {
    let mut output = String::new();
    write_report(&mut output, profile, courses, generated_at)
        .context("failed to render text report")?;
    Ok(output)
}

fn write_report(
    out: &mut impl Write,
    profile: Option<&FacultyProfile>,
    courses: &[Course],
    generated_at: DateTime<Utc>,
) -> fmt::Result {
    let summary = summarize(courses);

    writeln!(out, "COMPLIANCE COMPANION - ACADEMIC COMPLIANCE REPORT")?;
    writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(
        out,
        "Faculty: {}",
        profile.map(|p| p.full_name.as_str()).unwrap_or("N/A")
    )?;
    writeln!(
        out,
        "College: {}",
        profile.map(|p| p.institution_name.as_str()).unwrap_or("N/A")
    )?;
    writeln!(out)?;

    section(out, "SUMMARY STATISTICS")?;
    writeln!(out, "Total Courses: {}", summary.total_courses)?;
    writeln!(out, "Average Attendance: {:.2}%", summary.average_attendance)?;
    writeln!(out, "Average Syllabus Coverage: {:.2}%", summary.average_syllabus)?;
    writeln!(out, "Overall Compliance: {:.2}%", summary.average_compliance)?;
    writeln!(out)?;

    section(out, "COURSE DETAILS")?;
    for (index, c) in courses.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "{}. {} ({})", index + 1, c.course_name, c.course_code)?;
        writeln!(out, "   Semester: {}", c.semester)?;
        writeln!(out, "   Attendance: {:.2}%", c.attendance_percentage)?;
        writeln!(out, "   Syllabus Coverage: {:.2}%", c.syllabus_percentage)?;
        writeln!(out, "   Overall Compliance: {:.2}%", c.compliance_percentage)?;
        writeln!(out, "   Status: {}", c.status.as_str().to_uppercase())?;
        writeln!(
            out,
            "   Last Updated: {}",
            c.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
    }
    writeln!(out)?;

    section(out, "COMPLIANCE STATUS BREAKDOWN")?;
    writeln!(out, "Compliant Courses: {}", summary.compliant_count)?;
    writeln!(out, "Pending Courses: {}", summary.pending_count)?;
    writeln!(out, "At-Risk Courses: {}", summary.at_risk_count)?;
    writeln!(out)?;

    section(out, "RECOMMENDATIONS")?;
    for line in &summary.recommendations {
        writeln!(out, "- {line}")?;
    }
    writeln!(out)?;
    writeln!(out, "Report End")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::summary::tests::course;

    #[test]
    fn test_csv_header_and_rows() {
        let courses = vec![course("Algorithms", 80.0, 75.0), course("Networks", 40.0, 30.0)];
        let bytes = export_csv(&courses).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Course Name,Course Code,Semester,Attendance %,Syllabus %,Compliance %,Status"
        );
        assert_eq!(lines[1], "Algorithms,AL-101,Fall 2025,80,75,77.5,compliant");
        assert_eq!(lines[2], "Networks,NE-101,Fall 2025,40,30,35,at-risk");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_quotes_commas() {
        let mut c = course("Algorithms", 80.0, 80.0);
        c.course_name = "Algorithms, Advanced".into();
        let bytes = export_csv(&[c]).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(text.contains("\"Algorithms, Advanced\""));
    }

    #[test]
    fn test_csv_empty_has_header_only() {
        let bytes = export_csv(&[]).unwrap();
        assert_eq!(std::str::from_utf8(&bytes).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_text_report_sections() {
        let courses = vec![course("Algorithms", 80.0, 70.0), course("Compilers", 40.0, 30.0)];
        let report = export_text(None, &courses, Utc::now()).unwrap();
        assert!(report.starts_with("COMPLIANCE COMPANION - ACADEMIC COMPLIANCE REPORT"));
        assert!(report.contains("Faculty: N/A"));
        assert!(report.contains("Total Courses: 2"));
        assert!(report.contains("Overall Compliance: 55.00%"));
        assert!(report.contains("1. Algorithms (AL-101)"));
        assert!(report.contains("Status: AT-RISK"));
        assert!(report.contains("At-Risk Courses: 1"));
        assert!(report.contains("- Address at-risk courses immediately"));
        assert!(report.trim_end().ends_with("Report End"));
    }

    struct Rejecting;

    impl Write for Rejecting {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_write_failure_is_propagated() {
        let courses = vec![course("Algorithms", 80.0, 70.0)];
        assert!(write_report(&mut Rejecting, None, &courses, Utc::now()).is_err());
        assert!(section(&mut Rejecting, "SUMMARY STATISTICS").is_err());
    }

    #[test]
    fn test_section_banner() {
        let mut out = String::new();
        section(&mut out, "RECOMMENDATIONS").unwrap();
        assert_eq!(out, format!("{RULE}\nRECOMMENDATIONS\n{RULE}\n"));
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(
            report_file_name(ExportFormat::Csv, date),
            "compliance-report-2025-09-01.csv"
        );
        assert_eq!(
            report_file_name(ExportFormat::Text, date),
            "compliance-report-2025-09-01.txt"
        );
    }
}
