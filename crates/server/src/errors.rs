use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::{ApiResponse, ErrorBody};
use service::errors::{ServiceError, DUPLICATE_EMAIL};
use thiserror::Error;
use tracing::error;

pub const NOT_FOUND: &str = "Student not found";

/// Handler error rendered as the `{success: false, error}` envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("{}", NOT_FOUND)]
    NotFound,
    #[error("{}", DUPLICATE_EMAIL)]
    DuplicateEmail,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::DuplicateEmail | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(errors) => ApiError::Validation(errors),
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::DuplicateEmail => ApiError::DuplicateEmail,
            ServiceError::Db(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => ErrorBody::Messages(errors),
            ApiError::DuplicateEmail => ErrorBody::Messages(vec![DUPLICATE_EMAIL.to_string()]),
            ApiError::BadRequest(msg) => ErrorBody::Messages(vec![msg]),
            ApiError::NotFound => ErrorBody::Message(NOT_FOUND.to_string()),
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                ErrorBody::Message("Internal server error".to_string())
            }
        };
        (status, Json(ApiResponse::<()>::fail(body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_http_status() {
        let cases = [
            (ServiceError::Validation(vec!["Name is required".into()]), StatusCode::BAD_REQUEST),
            (ServiceError::DuplicateEmail, StatusCode::BAD_REQUEST),
            (ServiceError::not_found("student"), StatusCode::NOT_FOUND),
            (ServiceError::Db("connection reset".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }
}
