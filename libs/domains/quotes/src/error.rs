use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_vector_index::IndexError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Quote not found: {0}")]
    NotFound(String),

    /// The store, the embedding generator or the vector index failed.
    #[error("Dependency error: {0}")]
    Dependency(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type QuoteResult<T> = Result<T, QuoteError>;

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        QuoteError::Dependency(err.to_string())
    }
}

/// The quote input was already accepted, so an index rejection means the
/// embedding it was handed is unusable.
impl From<IndexError> for QuoteError {
    fn from(err: IndexError) -> Self {
        QuoteError::Dependency(format!("vector index rejected request: {}", err))
    }
}

impl From<QuoteError> for AppError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::Validation(msg) => AppError::BadRequest(msg),
            QuoteError::NotFound(id) => AppError::NotFound(format!("Quote {} not found", id)),
            QuoteError::Dependency(msg) => AppError::BadGateway(msg),
            QuoteError::Config(msg) => {
                AppError::InternalServerError(format!("Config error: {}", msg))
            }
        }
    }
}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
