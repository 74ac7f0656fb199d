// Public modules
pub mod auth;
pub mod config;
pub mod db;
pub mod domains;
pub mod errors;
pub mod validation;

pub use auth::{AuthResult, AuthService};
pub use config::AppConfig;
pub use errors::{ApiError, ApiResult};

use errors::{DomainError, ServiceResult};

/// Initialize the credential service: open the store connection, apply any
/// pending migrations, and construct the service with the configured signing
/// secret. The returned service owns the connection for its lifetime; call
/// [`AuthService::shutdown`] to release it.
pub async fn initialize(config: &AppConfig) -> ServiceResult<AuthService> {
    let pool = db::init_pool(&config.database_url)
        .await
        .map_err(DomainError::Database)?;

    db::run_migrations(&pool)
        .await
        .map_err(DomainError::Database)?;

    log::info!("user store connected");

    Ok(AuthService::new(pool, &config.jwt_secret))
}
