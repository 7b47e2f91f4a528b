//! Registration, sign-in, sign-out and session introspection. Successful
//! sign-ins install the session cookie; sign-out clears it.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;

use auth_adapters::{clear_session_cookie, session_cookie};
use domains::{DomainError, Session};
use services::SignedIn;

use crate::error::ApiError;
use crate::extract::CurrentSession;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<Response, ApiError> {
    let signed = state
        .auth
        .register(&payload.email, &payload.password, &payload.username)
        .await?;
    signed_in_response(StatusCode::CREATED, signed)
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Response, ApiError> {
    let signed = state.auth.login(&payload.email, &payload.password).await?;
    signed_in_response(StatusCode::OK, signed)
}

/// `POST /api/auth/logout`
pub async fn logout() -> Result<Response, ApiError> {
    let mut response = StatusCode::NO_CONTENT.into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, cookie_value(&clear_session_cookie())?);
    Ok(response)
}

/// `GET /api/auth/session` — the current identity, if any.
pub async fn session(
    Extension(current): Extension<CurrentSession>,
) -> Json<Option<Session>> {
    Json(current.0)
}

fn signed_in_response(status: StatusCode, signed: SignedIn) -> Result<Response, ApiError> {
    let mut response = (status, Json(signed.session)).into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, cookie_value(&session_cookie(&signed.token))?);
    Ok(response)
}

fn cookie_value(raw: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(raw)
        .map_err(|err| DomainError::Backend(format!("cookie header build failed: {err}")).into())
}
