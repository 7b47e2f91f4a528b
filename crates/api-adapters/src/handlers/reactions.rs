//! Like/dislike presses, answered with the confirmed state change.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use domains::{ReactionChange, ReactionKind};

use crate::error::ApiError;
use crate::extract::CurrentSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReactionPayload {
    pub kind: ReactionKind,
}

/// `POST /api/news/{id}/reactions` — toggle-or-switch. The engine rejects
/// anonymous viewers with the prompt-to-authenticate signal before any
/// repository call.
pub async fn react(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(news_id): Path<Uuid>,
    Json(payload): Json<ReactionPayload>,
) -> Result<Json<ReactionChange>, ApiError> {
    let change = state
        .reactions
        .react(current.0.as_ref(), news_id, payload.kind)
        .await?;
    Ok(Json(change))
}
