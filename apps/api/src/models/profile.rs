use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A research publication listed on a faculty profile. Order is preserved as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub title: String,
    pub year: i32,
    pub journal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FacultyProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub institution_name: String,
    pub years_experience: i32,
    pub profile_picture_url: Option<String>,
    #[sqlx(json)]
    pub research_publications: Vec<Publication>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FacultyProfile {
    /// First word of the full name, used in greetings.
    pub fn first_name(&self) -> Option<&str> {
        self.full_name.split_whitespace().next()
    }
}

/// The editable part of a profile, saved as a whole on edit-save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    pub institution_name: String,
    pub years_experience: i32,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub research_publications: Vec<Publication>,
}
