use super::identity::{AuthError, SharedVerifier};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Extract a bearer credential from the Authorization header or the
/// `access_token` cookie.
pub fn extract_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.trim().to_string()))
        .or_else(|| {
            headers
                .get("cookie")
                .and_then(|v| v.to_str().ok())
                .and_then(|cookies| {
                    cookies.split(';').find_map(|cookie| {
                        let (name, value) = cookie.trim().split_once('=')?;
                        (name == "access_token").then(|| value.to_string())
                    })
                })
        })
        .filter(|token| !token.is_empty())
}

/// Require a verified identity on every request.
///
/// On success the [`super::UserId`] is inserted into request extensions,
/// where [`crate::AuthUser`] picks it up.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/tasks", get(list_tasks))
///     .layer(axum::middleware::from_fn_with_state(verifier, jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(verifier): State<SharedVerifier>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = extract_token_from_headers(request.headers()) else {
        tracing::debug!("No JWT found in Authorization header or cookie");
        return Err(AuthError::MissingCredential.into());
    };

    let user_id = verifier.verify(&token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::from(e)
    })?;

    request.extensions_mut().insert(user_id);
    Ok(next.run(request).await)
}
