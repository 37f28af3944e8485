use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::compliance::tone::Tone;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub course_id: Option<Uuid>,
    pub message: String,
    pub tone: Tone,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReminder {
    pub faculty_id: Uuid,
    pub course_id: Option<Uuid>,
    pub message: String,
    pub tone: Tone,
}
