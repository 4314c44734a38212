/// Extractors that turn bad input into 422 responses
use crate::{
    error::{FieldError, PhotoError},
    photos::models::field_errors,
};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has been deserialized and passed `Validate`
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = PhotoError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;
        value.validate().map_err(field_errors)?;

        Ok(Self(value))
    }
}

fn json_rejection(rejection: JsonRejection) -> PhotoError {
    let kind = match &rejection {
        JsonRejection::JsonDataError(_) => "json_data",
        JsonRejection::JsonSyntaxError(_) => "json_invalid",
        JsonRejection::MissingJsonContentType(_) => "content_type",
        _ => "body",
    };

    PhotoError::Validation(vec![FieldError::body(None, rejection.body_text(), kind)])
}

/// Integer id taken from the `{id}` path segment
#[derive(Debug, Clone, Copy)]
pub struct PhotoId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for PhotoId
where
    S: Send + Sync,
{
    type Rejection = PhotoError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                PhotoError::Validation(vec![FieldError::path("id", e.body_text(), "int_parsing")])
            })?;

        Ok(Self(id))
    }
}
