use super::config::JwtConfig;
use super::identity::{AuthError, IdentityVerifier, UserId};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime (15 minutes)
pub const ACCESS_TOKEN_TTL: i64 = 900;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    pub jti: String, // JWT ID
}

/// Stateless HS256 JWT issuer and verifier.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!("JWT auth initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            access_ttl_secs: config.access_ttl_secs,
        }
    }

    /// Issue an access token for `user_id` with the configured TTL
    pub fn create_access_token(&self, user_id: &UserId) -> eyre::Result<String> {
        self.create_token(user_id, self.access_ttl_secs)
    }

    /// Issue a token with an explicit TTL (negative values produce expired tokens)
    pub fn create_token(&self, user_id: &UserId, ttl_seconds: i64) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Verify signature and expiry, returning the decoded claims
    pub fn verify_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AuthError::InvalidCredential("token expired".to_string())
                }
                _ => AuthError::InvalidCredential(e.to_string()),
            })
    }
}

impl IdentityVerifier for JwtAuth {
    fn verify(&self, credential: &str) -> Result<UserId, AuthError> {
        let claims = self.verify_token(credential)?;

        if claims.sub.trim().is_empty() {
            return Err(AuthError::InvalidCredential("empty subject".to_string()));
        }

        Ok(UserId::new(claims.sub))
    }
}
