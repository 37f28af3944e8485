//! Per-request session context.
//!
//! The identity gateway authenticates the caller and forwards their user id in
//! the `x-user-id` header. Handlers receive a `SessionContext` and pass it on
//! explicitly; there is no process-wide "current user".

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::FacultyProfile;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: Uuid,
    /// `None` until the identity service has provisioned a profile row.
    pub profile: Option<FacultyProfile>,
}

impl SessionContext {
    /// Name used in greetings, falling back to a neutral title.
    pub fn display_first_name(&self) -> &str {
        self.profile
            .as_ref()
            .and_then(|p| p.first_name())
            .unwrap_or("Professor")
    }

    /// Writes are keyed to the profile row, so they need one to exist.
    pub fn require_profile(&self) -> Result<&FacultyProfile, AppError> {
        self.profile
            .as_ref()
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }
}

fn user_id_from_parts(parts: &Parts) -> Option<Uuid> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v.trim()).ok())
}

#[async_trait]
impl FromRequestParts<AppState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = user_id_from_parts(parts).ok_or(AppError::Unauthorized)?;
        let profile = state.store.fetch_profile(user_id).await?;
        Ok(Self { user_id, profile })
    }
}
