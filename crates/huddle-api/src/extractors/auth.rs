//! Authentication extractor
//!
//! Extracts and validates JWT bearer tokens from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use huddle_core::Snowflake;

use crate::response::ApiError;
use crate::state::ApiState;

/// Authenticated user extracted from a JWT bearer token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID from the token's subject
    pub user_id: Snowflake,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    ApiState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let api_state = ApiState::from_ref(state);

        let user_id = api_state
            .jwt_service()
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                ApiError::InvalidAuthFormat
            })?;

        Ok(AuthUser { user_id })
    }
}
