use axum::{
    extract::{Path, State},
    Json,
};

use crate::errors::AppError;
use crate::navigation::{load_page, nav_items, NavItem, Page, PageView};
use crate::session::SessionContext;
use crate::state::AppState;

/// GET /api/v1/navigation
pub async fn handle_navigation() -> Json<Vec<NavItem>> {
    Json(nav_items())
}

/// GET /api/v1/pages/:page
pub async fn handle_page(
    State(state): State<AppState>,
    session: SessionContext,
    Path(tag): Path<String>,
) -> Result<Json<PageView>, AppError> {
    let page: Page = tag.parse()?;
    Ok(Json(load_page(state.store.as_ref(), &session, page).await?))
}
