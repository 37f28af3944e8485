pub mod announcement;
pub mod course;
pub mod profile;
pub mod reminder;
pub mod upload;
