pub mod jwt;
pub mod service;

// Re-export public items
pub use jwt::{Claims, TokenIssuer};
pub use service::{AuthResult, AuthService};
