//! Client-facing errors for the HTTP layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::model::{TxId, UserId};

/// Everything the service reports to clients as a request failure. The
/// engine itself raises nothing; these all come from request validation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User not found")]
    UserNotFound(UserId),

    #[error("Transaction not found")]
    TransactionNotFound(TxId),

    #[error("amount must not be negative")]
    NegativeAmount,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UserNotFound(user) => {
                info!(user, "request for unknown user");
                StatusCode::NOT_FOUND
            }
            ApiError::TransactionNotFound(tx) => {
                info!(tx, "request for unknown transaction");
                StatusCode::NOT_FOUND
            }
            ApiError::NegativeAmount => StatusCode::UNPROCESSABLE_ENTITY,
        };

        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
