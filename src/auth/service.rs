use crate::auth::jwt::TokenIssuer;
use crate::domains::user::{Credentials, NewUser, SqliteUserRepository, UserRepository, UserResponse};
use crate::errors::{DomainError, ServiceError, ServiceResult};
use crate::validation::Validate;
use serde::Serialize;
use sqlx::SqlitePool;
use std::sync::Arc;

/// bcrypt work factor used for all password hashes
const HASH_COST: u32 = 10;

/// Result of a successful register, login, or token verification
#[derive(Debug, Clone, Serialize)]
pub struct AuthResult {
    pub user: UserResponse,
    pub token: String,
}

/// Credential service: orchestrates the user store, password hashing, and
/// token issuance for the three public operations.
pub struct AuthService {
    pool: SqlitePool,
    user_repo: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
}

impl AuthService {
    /// Create a new credential service over an initialized store connection
    pub fn new(pool: SqlitePool, jwt_secret: &str) -> Self {
        let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));

        Self {
            pool,
            user_repo,
            tokens: TokenIssuer::new(jwt_secret),
        }
    }

    /// Register a new user and issue a token for it.
    pub async fn register(&self, new_user: NewUser) -> ServiceResult<AuthResult> {
        new_user.validate().map_err(ServiceError::Domain)?;

        if self.user_repo.find_by_email(&new_user.email).await?.is_some() {
            return Err(ServiceError::AlreadyExists);
        }

        let password_hash = self.hash_password(&new_user.password)?;

        // Persist the hash, never the plaintext
        let mut user_with_hash = new_user;
        user_with_hash.password = password_hash;

        let user = self.user_repo.create(user_with_hash).await?;
        log::info!("registered user {}", user.id);

        self.respond(user.into())
    }

    /// Authenticate a user with email and password. Absent user and wrong
    /// password are indistinguishable to the caller.
    pub async fn login(&self, credentials: Credentials) -> ServiceResult<AuthResult> {
        credentials.validate().map_err(ServiceError::Domain)?;

        let user = match self.user_repo.find_by_email(&credentials.email).await? {
            Some(user) => user,
            None => return Err(ServiceError::InvalidCredentials),
        };

        if !self.verify_password(&credentials.password, &user.password_hash)? {
            return Err(ServiceError::InvalidCredentials);
        }

        self.respond(user.into())
    }

    /// Verify a previously issued token and re-issue a fresh one over the
    /// same identity claims. Verification never succeeds without also
    /// producing a new token.
    pub async fn verify_token(&self, token: &str) -> ServiceResult<AuthResult> {
        let claims = self.tokens.verify(token)?;
        self.respond(claims.into_user())
    }

    /// Close the store connection. The service is unusable afterwards.
    pub async fn shutdown(&self) {
        self.pool.close().await;
        log::info!("store connection closed");
    }

    /// Generate a salted hash for a password
    pub fn hash_password(&self, password: &str) -> ServiceResult<String> {
        bcrypt::hash(password, HASH_COST).map_err(|e| {
            ServiceError::Domain(DomainError::Internal(format!(
                "Failed to hash password: {}",
                e
            )))
        })
    }

    /// Verify a password against a stored hash
    fn verify_password(&self, password: &str, hash: &str) -> ServiceResult<bool> {
        bcrypt::verify(password, hash).map_err(|e| {
            ServiceError::Domain(DomainError::Internal(format!(
                "Failed to verify password: {}",
                e
            )))
        })
    }

    fn respond(&self, user: UserResponse) -> ServiceResult<AuthResult> {
        let token = self.tokens.sign(&user)?;
        Ok(AuthResult { user, token })
    }
}
