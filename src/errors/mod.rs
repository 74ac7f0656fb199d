mod error;

pub use error::{ApiError, DbError, DomainError, ServiceError, ValidationError};

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type at the service boundary
pub type ApiResult<T> = Result<T, ApiError>;
