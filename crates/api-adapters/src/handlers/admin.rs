//! The admin dashboard: stats plus per-entity list / edit / delete.
//!
//! The route guard upstream already filtered non-admins; every service
//! call still takes the actor and re-checks the role itself.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use domains::{Category, Comment, NewsItem, NewsWithDetails, Profile, Reaction};
use services::{CategoryDraft, ProfileDraft, Stats};

use crate::error::ApiError;
use crate::extract::CurrentSession;
use crate::handlers::news::NewsPayload;
use crate::state::AppState;

/// `GET /api/admin/stats` — the five entity counts, fetched concurrently.
pub async fn stats(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Stats>, ApiError> {
    Ok(Json(state.admin.stats(current.require()?).await?))
}

pub async fn list_news(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Vec<NewsWithDetails>>, ApiError> {
    Ok(Json(state.admin.list_news(current.require()?).await?))
}

pub async fn list_categories(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.admin.list_categories(current.require()?).await?))
}

pub async fn list_profiles(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    Ok(Json(state.admin.list_profiles(current.require()?).await?))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    Ok(Json(state.admin.list_comments(current.require()?).await?))
}

pub async fn list_reactions(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<Json<Vec<Reaction>>, ApiError> {
    Ok(Json(state.admin.list_reactions(current.require()?).await?))
}

pub async fn update_news(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewsPayload>,
) -> Result<Json<NewsItem>, ApiError> {
    let session = current.require()?;
    Ok(Json(state.admin.update_news(session, id, payload.into_draft()).await?))
}

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
    pub slug: String,
}

impl CategoryPayload {
    fn into_draft(self) -> CategoryDraft {
        CategoryDraft { name: self.name, slug: self.slug }
    }
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let session = current.require()?;
    let category = state.admin.create_category(session, payload.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>, ApiError> {
    let session = current.require()?;
    Ok(Json(state.admin.update_category(session, id, payload.into_draft()).await?))
}

#[derive(Debug, Deserialize)]
pub struct ProfilePayload {
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub website: Option<String>,
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<Profile>, ApiError> {
    let session = current.require()?;
    let draft = ProfileDraft {
        username: payload.username,
        full_name: payload.full_name,
        avatar_url: payload.avatar_url,
        website: payload.website,
    };
    Ok(Json(state.admin.update_profile(session, id, draft).await?))
}

pub async fn delete_news(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.admin.delete_news(current.require()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_category(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.admin.delete_category(current.require()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.admin.delete_profile(current.require()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.admin.delete_comment(current.require()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_reaction(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.admin.delete_reaction(current.require()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
