//! Image upload for the news editor.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use mime::Mime;

use domains::{DomainError, StoredMedia};

use crate::error::ApiError;
use crate::extract::CurrentSession;
use crate::state::AppState;

/// `POST /api/media` — accepts the first file field of a multipart form
/// and answers with the stored object's public URL.
pub async fn upload(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<StoredMedia>), ApiError> {
    current.require()?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| DomainError::Validation(format!("malformed upload: {err}")))?
    {
        let Some(content_type) = field.content_type().map(str::to_owned) else {
            continue;
        };
        let content_type: Mime = content_type
            .parse()
            .map_err(|_| DomainError::Validation("unreadable content type".into()))?;
        let data = field
            .bytes()
            .await
            .map_err(|err| DomainError::Validation(format!("upload aborted: {err}")))?;

        let stored = state.media.store(data, content_type).await?;
        return Ok((StatusCode::CREATED, Json(stored)));
    }

    Err(DomainError::Validation("no file field in the upload".into()).into())
}
