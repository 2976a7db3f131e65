//! Request extractors that turn raw path segments and bodies into validated
//! domain values, rejecting with [`AppError`] so failures render as JSON.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::StatusCode;
use serde_json::Value;
use wechef_core::error::CoreError;
use wechef_core::recipe::{validate_recipe_payload, RecipeInput};
use wechef_core::types::DbId;

use crate::error::AppError;

/// Recipe id taken from the `{id}` path segment.
///
/// A segment that is not an integer names no recipe, so it is rejected with
/// 404 rather than 400.
#[derive(Debug, Clone, Copy)]
pub struct RecipeId(pub DbId);

impl<S> FromRequestParts<S> for RecipeId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Core(CoreError::Internal(rejection.body_text())))?;

        raw.parse::<DbId>()
            .map(RecipeId)
            .map_err(|_| AppError::NotFound(format!("No recipe matches id {raw:?}")))
    }
}

/// A recipe create/update body, decoded and validated.
///
/// The body is parsed as JSON whatever the `Content-Type`; an empty or
/// `null` body behaves like `{}`. Size limits come from the
/// `DefaultBodyLimit` layer and surface as 413.
#[derive(Debug, Clone)]
pub struct RecipePayload(pub RecipeInput);

impl<S> FromRequest<S> for RecipePayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge(rejection.body_text())
            } else {
                AppError::BadRequest(rejection.body_text())
            }
        })?;

        let value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?
        };

        Ok(RecipePayload(validate_recipe_payload(&value)?))
    }
}
