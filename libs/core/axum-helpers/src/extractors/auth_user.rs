//! Extractor for the identity attached by [`crate::jwt_auth_middleware`].

use crate::auth::UserId;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// The verified caller of a request.
///
/// Only available on routes layered with [`crate::jwt_auth_middleware`];
/// anywhere else it rejects with 401.
///
/// ```ignore
/// async fn list(AuthUser(user): AuthUser) -> String {
///     format!("tasks for {}", user)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserId);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserId>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
