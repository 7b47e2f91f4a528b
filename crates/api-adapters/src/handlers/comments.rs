//! Comment section: list with resolved authors, append-only submission.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use domains::{Comment, CommentWithAuthor};

use crate::error::ApiError;
use crate::extract::CurrentSession;
use crate::state::AppState;

/// `GET /api/news/{id}/comments`
pub async fn list_comments(
    State(state): State<AppState>,
    Path(news_id): Path<Uuid>,
) -> Result<Json<Vec<CommentWithAuthor>>, ApiError> {
    Ok(Json(state.comments.list_for_news(news_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct CommentPayload {
    pub content: String,
}

/// `POST /api/news/{id}/comments` — the service rejects anonymous viewers
/// before touching the repository.
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(news_id): Path<Uuid>,
    Json(payload): Json<CommentPayload>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment = state
        .comments
        .submit(current.0.as_ref(), news_id, &payload.content)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
