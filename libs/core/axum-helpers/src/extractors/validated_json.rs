//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that runs `Validate` after deserializing.
///
/// Both a malformed body and a failed rule produce the standard
/// [`ErrorResponse`](crate::ErrorResponse) body.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct AddEmbedding {
///     #[validate(length(min = 1))]
///     id: String,
///     vector: Vec<f32>,
/// }
///
/// async fn add(ValidatedJson(body): ValidatedJson<AddEmbedding>) -> StatusCode {
///     StatusCode::OK
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::from(rejection).into_response())?;

        data.validate()
            .map_err(|errors| AppError::from(errors).into_response())?;

        Ok(ValidatedJson(data))
    }
}
