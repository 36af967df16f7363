//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

mod deadline;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use token::{
    CleanupResult, TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig,
    TokenValidator,
};
