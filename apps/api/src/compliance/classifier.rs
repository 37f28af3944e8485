use serde::{Deserialize, Serialize};

use crate::compliance::thresholds::{AT_RISK, COMPLIANT};

/// Categorical compliance status of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "text", rename_all = "kebab-case")]
pub enum Status {
    Compliant,
    Pending,
    AtRisk,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Compliant => "compliant",
            Status::Pending => "pending",
            Status::AtRisk => "at-risk",
        }
    }
}

/// Output of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub compliance: f64,
    pub status: Status,
}

/// Derives overall compliance and status from attendance and syllabus coverage.
///
/// Compliance is the unweighted mean of the two inputs. Callers clamp or
/// validate inputs to [0, 100]; this function accepts any real value.
pub fn classify(attendance: f64, syllabus: f64) -> Classification {
    let compliance = (attendance + syllabus) / 2.0;
    Classification {
        compliance,
        status: status_for(compliance),
    }
}

/// Maps a compliance percentage to its status band.
pub fn status_for(compliance: f64) -> Status {
    if compliance >= COMPLIANT {
        Status::Compliant
    } else if compliance < AT_RISK {
        Status::AtRisk
    } else {
        Status::Pending
    }
}
