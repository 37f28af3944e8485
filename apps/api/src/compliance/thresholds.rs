//! The single set of compliance boundaries.
//!
//! Both the classifier and the reminder tone selector read these values, so a
//! course that is `pending` always maps to a `gentle` or `formal` reminder and a
//! course that is `at-risk` always maps to `escalation`.

/// Compliance at or above this is `compliant` and needs no reminder.
pub const COMPLIANT: f64 = 75.0;

/// Lower bound of the `gentle` reminder band. Below it reminders turn `formal`.
pub const GENTLE_FLOOR: f64 = 65.0;

/// Compliance below this is `at-risk` and escalated.
pub const AT_RISK: f64 = 50.0;
