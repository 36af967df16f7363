//! Value objects representing immutable domain concepts.

pub mod principal;

// Re-export commonly used types
pub use principal::AuthenticatedUser;
