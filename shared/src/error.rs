use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("slot is already booked")]
    SlotTaken,
    #[error("you can only have one active booking per day; cancel the existing booking for this date first")]
    UserAlreadyBooked {
        existing_booking_id: Uuid,
        booking_date: NaiveDate,
    },
    #[error("booking not found or already processed")]
    NotFoundOrAlreadyProcessed,
    #[error("unauthenticated")]
    UnauthenticatedError,
    #[error("forbidden operation")]
    ForbiddenOperation,
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("transaction error")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation error")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) | AppError::NotFoundOrAlreadyProcessed => {
                StatusCode::NOT_FOUND
            }
            AppError::ValidationError(_) | AppError::ConvertToUuidError(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::SlotTaken | AppError::UserAlreadyBooked { .. } => StatusCode::CONFLICT,
            AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            // transaction begin/commit failures are retryable from the
            // caller's point of view; the server does not retry them itself
            AppError::TransactionError(_) => StatusCode::SERVICE_UNAVAILABLE,
            e @ (AppError::ConversionEntityError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = match &self {
            AppError::UserAlreadyBooked {
                existing_booking_id,
                booking_date,
            } => serde_json::json!({
                "message": self.to_string(),
                "existingBookingId": existing_booking_id,
                "bookingDate": booking_date,
            }),
            _ => serde_json::json!({ "message": self.to_string() }),
        };

        (status_code, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_errors_map_to_409() {
        let err = AppError::SlotTaken;
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let err = AppError::UserAlreadyBooked {
            existing_booking_id: Uuid::new_v4(),
            booking_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn already_processed_is_indistinguishable_from_missing() {
        let res = AppError::NotFoundOrAlreadyProcessed.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
