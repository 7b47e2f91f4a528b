//! The public feed and the news detail page.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use domains::{NewsDetail, NewsQuery, NewsWithDetails};
use services::filter_by_category;

use crate::error::ApiError;
use crate::extract::CurrentSession;
use crate::state::AppState;

const DEFAULT_FEED_LIMIT: i64 = 20;

#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub category: Option<Uuid>,
    pub limit: Option<i64>,
}

/// `GET /api/news` — published items, newest first, optionally narrowed to
/// one category.
pub async fn list_news(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Vec<NewsWithDetails>>, ApiError> {
    let items = state
        .feed
        .fetch(NewsQuery {
            published_only: true,
            author_id: None,
            limit: Some(params.limit.unwrap_or(DEFAULT_FEED_LIMIT)),
        })
        .await?;
    Ok(Json(filter_by_category(items, params.category)))
}

/// `GET /api/news/{id}`
pub async fn news_detail(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<Uuid>,
) -> Result<Json<NewsDetail>, ApiError> {
    Ok(Json(state.feed.detail(id, current.0.as_ref()).await?))
}
