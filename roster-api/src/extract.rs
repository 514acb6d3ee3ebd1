/// Validated JSON request extractor
///
/// `ValidatedJson<T>` deserializes the body like `axum::Json<T>` and then runs
/// `T`'s `validator` rules. Any failure along the way (missing or wrong
/// content type, malformed JSON, missing fields, wrong types, rule
/// violations) is reported as [`ApiError::ValidationFailed`], so handlers only
/// ever see well-formed payloads.

use crate::error::{ApiError, ValidationErrorDetail};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON body that has been parsed and validated
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_details)?;

        value.validate().map_err(validation_details)?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_details(rejection: JsonRejection) -> ApiError {
    tracing::debug!(rejection = %rejection.body_text(), "Rejected request body");

    ApiError::ValidationFailed(vec![ValidationErrorDetail {
        field: "body".to_string(),
        message: rejection.body_text(),
    }])
}

fn validation_details(errors: ValidationErrors) -> ApiError {
    let mut details: Vec<ValidationErrorDetail> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field));

    ApiError::ValidationFailed(details)
}
