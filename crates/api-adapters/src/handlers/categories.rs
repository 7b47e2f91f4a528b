//! The category sidebar.

use axum::extract::State;
use axum::Json;

use domains::Category;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/categories` — alphabetical.
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.categories.list().await?))
}
