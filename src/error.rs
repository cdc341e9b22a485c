use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Terminal request errors.
///
/// Wrong and expired codes both surface as `InvalidCode`; the distinction
/// is not exposed to callers. Internal faults are logged here and returned
/// as an opaque 500.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("Email already registered")]
    Conflict,
    #[error("User not found")]
    NotFound,
    #[error("Invalid or expired code")]
    InvalidCode,
    #[error("Incorrect password")]
    InvalidCredentials,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AuthError::Conflict,
            StoreError::NotFound => AuthError::NotFound,
            StoreError::Database(e) => AuthError::Internal(e.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::Validation(msg) => (StatusCode::BAD_REQUEST, (*msg).to_string()),
            AuthError::Conflict => (StatusCode::BAD_REQUEST, self.to_string()),
            AuthError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AuthError::InvalidCode => (StatusCode::BAD_REQUEST, self.to_string()),
            AuthError::InvalidCredentials => (StatusCode::BAD_REQUEST, self.to_string()),
            AuthError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_the_contract() {
        assert_eq!(
            AuthError::Validation("Email and password are required")
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Conflict.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AuthError::InvalidCode.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::InvalidCredentials.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_map_to_request_errors() {
        assert!(matches!(
            AuthError::from(StoreError::DuplicateEmail),
            AuthError::Conflict
        ));
        assert!(matches!(
            AuthError::from(StoreError::NotFound),
            AuthError::NotFound
        ));
    }
}
