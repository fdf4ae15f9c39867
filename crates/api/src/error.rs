//! Error responses.
//!
//! Domain errors are converted into [`AppError`] and rendered as
//! `{"error": <code>, "message": <text>}`. Server-side failures carry a
//! generic message only.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use rollcall_core::attendance::{CreateError, LedgerError};
use rollcall_shared::{AppError, AuthError, IdParseError};

/// An error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<CreateError> for ApiError {
    fn from(err: CreateError) -> Self {
        Self(match err {
            CreateError::ValidationFailed(msg) => AppError::Validation(msg),
            CreateError::InsufficientBalance => {
                AppError::BusinessRule("insufficient balance".to_string())
            }
            CreateError::StoreFailure(detail) => AppError::Database(detail),
        })
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self(match err {
            LedgerError::NotFound(what) => AppError::NotFound(what),
            LedgerError::Unavailable(detail) => AppError::Database(detail),
        })
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(AppError::Unauthorized(err.to_string()))
    }
}

impl From<IdParseError> for ApiError {
    fn from(err: IdParseError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message(),
            })),
        )
            .into_response()
    }
}
