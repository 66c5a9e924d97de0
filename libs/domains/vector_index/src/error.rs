use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Errors raised by the vector index.
///
/// Every variant is an invalid-input condition: the index has no external
/// dependencies and a rejected call never mutates state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    #[error("vector has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("vector value at position {position} is not a finite number")]
    NonFiniteValue { position: usize },

    #[error("id must be a non-empty string")]
    EmptyId,

    #[error("top_k must be a positive integer, got {0}")]
    InvalidTopK(i64),

    #[error("Invalid input: {0}")]
    Validation(String),
}

pub type IndexResult<T> = Result<T, IndexError>;

impl From<IndexError> for AppError {
    fn from(err: IndexError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for IndexError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
