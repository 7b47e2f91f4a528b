//! Authoring: create/edit/delete plus the author's own list with search.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use domains::{NewsItem, NewsQuery, NewsWithDetails};
use services::{filter_my_news, MyNewsSearch, NewsDraft};

use crate::error::ApiError;
use crate::extract::CurrentSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewsPayload {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

impl NewsPayload {
    pub(crate) fn into_draft(self) -> NewsDraft {
        NewsDraft {
            title: self.title,
            content: self.content,
            image_url: self.image_url,
            video_url: self.video_url,
            category_ids: self.category_ids,
            published: self.published,
        }
    }
}

/// `POST /api/news`
pub async fn create_news(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Json(payload): Json<NewsPayload>,
) -> Result<(StatusCode, Json<NewsItem>), ApiError> {
    let session = current.require()?;
    let item = state.news.create(session, payload.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `PUT /api/news/{id}` — replaces the full mutable field set.
pub async fn update_news(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NewsPayload>,
) -> Result<Json<NewsItem>, ApiError> {
    let session = current.require()?;
    let item = state.news.update(session, id, payload.into_draft()).await?;
    Ok(Json(item))
}

/// `DELETE /api/news/{id}`
pub async fn delete_news(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let session = current.require()?;
    state.news.delete(session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct MyNewsParams {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
}

/// `GET /api/my/news` — the author's items, drafts included, searchable by
/// title substring and exact creation date.
pub async fn my_news(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Query(params): Query<MyNewsParams>,
) -> Result<Json<Vec<NewsWithDetails>>, ApiError> {
    let session = current.require()?;
    let items = state
        .feed
        .fetch(NewsQuery {
            published_only: false,
            author_id: Some(session.user_id),
            limit: None,
        })
        .await?;
    let search = MyNewsSearch { title: params.title, date: params.date };
    Ok(Json(filter_my_news(items, &search)))
}
