//! Session resolution and route guards.
//!
//! The cookie is parsed and the token verified exactly once per request;
//! every handler downstream reads the result from request extensions
//! instead of re-parsing cookies.

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::middleware::Next;
use axum::response::Response;

use auth_adapters::token_from_cookie_header;
use domains::{DomainError, Session};

use crate::error::ApiError;
use crate::state::AppState;

/// The per-request identity, present for every handler.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

impl CurrentSession {
    /// The prompt-to-authenticate signal for handlers that need a viewer.
    pub fn require(&self) -> Result<&Session, ApiError> {
        self.0
            .as_ref()
            .ok_or_else(|| DomainError::Unauthorized("authentication required".into()).into())
    }
}

/// Resolves the session cookie into a [`CurrentSession`] extension.
/// An invalid or expired token degrades to an anonymous request rather
/// than failing it.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let session = request
        .headers()
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(token_from_cookie_header)
        .and_then(|token| match state.auth.session_from_token(token) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::debug!(%err, "session token rejected");
                None
            }
        });

    request.extensions_mut().insert(CurrentSession(session));
    next.run(request).await
}

/// Route guard for the admin surface. A convenience only — every admin
/// service call re-checks the role itself.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let is_admin = request
        .extensions()
        .get::<CurrentSession>()
        .and_then(|current| current.0.as_ref())
        .is_some_and(Session::is_admin);

    if !is_admin {
        return Err(DomainError::Forbidden("admin role required".into()).into());
    }
    Ok(next.run(request).await)
}
