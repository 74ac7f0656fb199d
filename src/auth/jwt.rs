use crate::domains::user::UserResponse;
use crate::errors::{DomainError, ServiceError, ServiceResult};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime in seconds (2 hours)
const TOKEN_TTL_SECS: i64 = 2 * 60 * 60;

/// Claims carried by every issued token: the user identity fields plus the
/// registered timing claims added at signing time.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Strip the registered timing claims, leaving only the user payload.
    /// Re-issuing signs over exactly this remainder.
    pub fn into_user(self) -> UserResponse {
        UserResponse {
            id: self.id,
            email: self.email,
            name: self.name,
        }
    }
}

/// Signs and verifies JWTs with a shared HS256 secret. Held by the service
/// as an explicit dependency rather than process-global state.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a fresh token over the user payload.
    pub fn sign(&self, user: &UserResponse) -> ServiceResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            ServiceError::Domain(DomainError::Internal(format!("JWT encoding error: {}", e)))
        })
    }

    /// Verify signature and expiry, returning the decoded claims. Every
    /// failure collapses to the single invalid-token kind; the cause is
    /// logged but never exposed to the caller.
    pub fn verify(&self, token: &str) -> ServiceResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| {
                log::warn!("token verification failed: {}", e);
                ServiceError::InvalidToken
            })?;

        Ok(token_data.claims)
    }
}
