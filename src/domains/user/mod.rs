pub mod types;
pub mod repository;

// Re-export main items for the rest of the crate to use
pub use types::{Credentials, NewUser, User, UserResponse};
pub use repository::{SqliteUserRepository, UserRepository};
