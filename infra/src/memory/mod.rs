//! Process-local store implementations
//!
//! State lives behind a single `tokio::sync::RwLock` per store, so every
//! operation, including the check-then-write of `create` and the
//! find-then-delete of `take_by_token_hash`, happens under one guard.
//! Nothing survives a restart.

mod token_repository_impl;
mod user_repository_impl;

#[cfg(test)]
mod tests;

pub use token_repository_impl::InMemoryTokenRepository;
pub use user_repository_impl::InMemoryUserRepository;
