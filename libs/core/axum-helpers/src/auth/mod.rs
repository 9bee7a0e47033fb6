//! Authentication module.
//!
//! - [`IdentityVerifier`] turns a credential into a verified [`UserId`]
//! - [`JwtAuth`] implements it with HS256 JWTs and also issues tokens
//! - [`jwt_auth_middleware`] guards routes and attaches the identity
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, SharedVerifier, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let verifier: SharedVerifier = Arc::new(JwtAuth::new(&JwtConfig::from_env()?));
//!
//! let protected = Router::new()
//!     .route("/tasks", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(verifier, jwt_auth_middleware));
//! ```

pub mod config;
pub mod identity;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use identity::{AuthError, IdentityVerifier, SharedVerifier, UserId};
pub use jwt::{ACCESS_TOKEN_TTL, JwtAuth, JwtClaims};
pub use middleware::{extract_token_from_headers, jwt_auth_middleware};
