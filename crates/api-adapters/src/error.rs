//! Maps the domain taxonomy to HTTP. Responses carry display-language
//! messages only; the raw error is logged here and never leaves the
//! process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use domains::DomainError;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomainError::NotFound(..) => (StatusCode::NOT_FOUND, "Запись не найдена."),
            DomainError::Validation(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Некорректные данные. Проверьте заполнение полей.",
            ),
            DomainError::Unauthorized(_) => (
                StatusCode::UNAUTHORIZED,
                "Пожалуйста, авторизуйтесь, чтобы продолжить.",
            ),
            DomainError::Forbidden(_) => (
                StatusCode::FORBIDDEN,
                "Недостаточно прав для выполнения действия.",
            ),
            DomainError::Conflict(_) => (
                StatusCode::CONFLICT,
                "Запись с такими данными уже существует.",
            ),
            DomainError::Backend(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Не удалось выполнить запрос. Пожалуйста, попробуйте позже.",
            ),
        };

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => tracing::error!(error = %self.0, "request failed"),
            _ => tracing::debug!(error = %self.0, "request rejected"),
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_detail_never_reaches_the_body() {
        let response =
            ApiError(DomainError::Backend("pg: relation \"news\" does not exist".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_maps_to_401() {
        let response =
            ApiError(DomainError::Unauthorized("sign in to react".into())).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
