//! Compliance rules applied on every course write: classification, reminder tone
//! selection and CSV averaging. Nothing in here performs I/O.

pub mod classifier;
pub mod csv_extract;
pub mod thresholds;
pub mod tone;
