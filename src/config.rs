use crate::errors::{ServiceError, ServiceResult};
use std::env;

/// Runtime configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string for the user store, e.g. `sqlite://auth.db`
    pub database_url: String,

    /// Secret used to sign and verify JWTs
    pub jwt_secret: String,
}

impl AppConfig {
    /// Load configuration from the environment, reading a `.env` file first
    /// if one is present.
    pub fn from_env() -> ServiceResult<Self> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ServiceError::Configuration("DATABASE_URL is not set".to_string()))?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ServiceError::Configuration("JWT_SECRET is not set".to_string()))?;

        Ok(Self {
            database_url,
            jwt_secret,
        })
    }

    /// Build a configuration directly, bypassing the environment.
    pub fn new(database_url: &str, jwt_secret: &str) -> Self {
        Self {
            database_url: database_url.to_string(),
            jwt_secret: jwt_secret.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_vars_fail() {
        env::remove_var("DATABASE_URL");
        env::remove_var("JWT_SECRET");

        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ServiceError::Configuration(_))));
    }
}
