//! Error handling for the application

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::reporting::ReviewError;
use crate::settlement::ProfileError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error(transparent)]
    Review(#[from] ReviewError),
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error_type: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Body(e) => {
                tracing::warn!("Request body rejected: {}", e.body_text());
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            AppError::Profile(e) => {
                tracing::warn!("Settlement input rejected: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid_settlement_input")
            }
            AppError::Review(e) => {
                tracing::warn!("Review transition rejected: {}", e);
                (StatusCode::CONFLICT, "invalid_status_transition")
            }
        };

        let message = self.to_string();
        (status, Json(ErrorResponse { error_type, message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_codes() {
        let profile = AppError::from(ProfileError::NegativeDebtDeduction(dec!(-1)));
        assert_eq!(profile.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let review = AppError::from(ReviewError::AlreadyAccepted);
        assert_eq!(review.into_response().status(), StatusCode::CONFLICT);

        let bad = AppError::BadRequest("period".to_string());
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);

        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_profile_error_message_is_kept() {
        let err = AppError::from(ProfileError::DebtDeductionExceedsOutstanding {
            requested: dec!(50),
            outstanding: dec!(20),
        });
        assert_eq!(
            err.to_string(),
            "debt deduction 50 exceeds outstanding debt 20"
        );
    }
}
