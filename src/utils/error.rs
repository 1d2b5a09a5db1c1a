use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::database::StoreError;

/// Failures surfaced by the HTTP layer.
///
/// Every variant renders as `{"message": ...}`. Backend detail never reaches
/// the caller: it is logged where the error is created and replaced by a
/// fixed message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{0}")]
    NotFound(String),

    #[error("Malformed request body: {0}")]
    MalformedPayload(String),

    #[error("{0}")]
    StoreUnavailable(&'static str),

    #[error("{0}")]
    Internal(&'static str),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl AppError {
    /// Builds a `map_err` adapter that logs the store failure and hides it
    /// behind `message`.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |err| {
            log::error!("❌ {}: {}", message, err);
            AppError::StoreUnavailable(message)
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateUsername
            | AppError::MissingFields(_)
            | AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            message: self.to_string(),
        })
    }
}
