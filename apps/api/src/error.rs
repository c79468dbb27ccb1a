use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use stockroom_core::AppError;
use tracing::error;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    code: &'static str,
    message: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            AppError::AccountInactive(_) => (StatusCode::FORBIDDEN, "account_inactive"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "permission_missing"),
            AppError::DataIntegrity(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };

        let message = match &self.0 {
            AppError::DataIntegrity(detail) => {
                error!(detail = %detail, "data integrity violation");
                "internal server error".to_owned()
            }
            AppError::Internal(detail) => {
                error!(detail = %detail, "internal error");
                "internal server error".to_owned()
            }
            AppError::AccountInactive(_) => "account is deactivated".to_owned(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { code, message })).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
