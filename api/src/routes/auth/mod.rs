//! Authentication route handlers
//!
//! - Registration and login
//! - Token refresh (rotation)
//! - Logout of one session or of every session
//! - Password change
//! - Current principal

pub mod change_password;
pub mod login;
pub mod logout;
pub mod logout_all;
pub mod me;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use blog_core::repositories::{TokenRepository, UserRepository};
use blog_core::services::auth::AuthService;

/// Application state that holds shared services
pub struct AppState<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub auth_service: Arc<AuthService<U, T>>,
}

impl<U, T> AppState<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(auth_service: Arc<AuthService<U, T>>) -> Self {
        Self { auth_service }
    }
}
