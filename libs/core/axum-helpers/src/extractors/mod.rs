//! Custom extractors for Axum handlers.
//!
//! These keep handler signatures short and make rejection bodies match
//! [`crate::ErrorResponse`].

pub mod auth_user;
pub mod uuid_path;
pub mod validated_json;

pub use auth_user::AuthUser;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
