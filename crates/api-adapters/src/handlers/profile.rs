//! Profile view and edit.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use domains::Profile;
use services::ProfileUpdate;

use crate::error::ApiError;
use crate::extract::CurrentSession;
use crate::state::AppState;

/// `GET /api/profile` — the viewer's own profile.
pub async fn get_own(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Profile>, ApiError> {
    let session = current.require()?;
    Ok(Json(state.profiles.get(session.user_id).await?))
}

/// `GET /api/profiles/{id}` — public profile view.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, ApiError> {
    Ok(Json(state.profiles.get(id).await?))
}

#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
}

/// `PUT /api/profile` — replaces the viewer's own mutable fields.
pub async fn update_own(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<Profile>, ApiError> {
    let session = current.require()?;
    let update = ProfileUpdate {
        username: payload.username,
        full_name: payload.full_name,
        avatar_url: payload.avatar_url,
        website: payload.website,
    };
    Ok(Json(state.profiles.update(session, session.user_id, update).await?))
}
