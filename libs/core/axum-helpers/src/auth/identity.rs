//! Verified caller identity and the verifier seam.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use utoipa::ToSchema;

use crate::errors::AppError;

/// Opaque identifier of an authenticated user.
///
/// Produced by an [`IdentityVerifier`]; used as the only authorization key
/// for owner-scoped data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No credential provided")]
    MissingCredential,

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Unauthorized(err.to_string())
    }
}

/// Turns a presented credential into a verified [`UserId`].
///
/// Shared by the HTTP middleware and the real-time handshake.
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, credential: &str) -> Result<UserId, AuthError>;
}

/// Verifier handle stored in router state.
pub type SharedVerifier = Arc<dyn IdentityVerifier>;
