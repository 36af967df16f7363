//! Tests for authentication service


use std::sync::Arc;
use std::time::Duration;

use crate::repositories::{MockTokenRepository, MockUserRepository};
use crate::services::auth::{AuthService, AuthServiceConfig};
use crate::services::token::{TokenService, TokenServiceConfig};

pub(super) const SECRET: &str = "auth-test-secret";

pub(super) struct Harness {
    pub service: Arc<AuthService<MockUserRepository, MockTokenRepository>>,
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<MockTokenRepository>,
}

pub(super) async fn harness() -> Harness {
    harness_with(AuthServiceConfig {
        bcrypt_cost: 4,
        ..AuthServiceConfig::default()
    })
    .await
}

pub(super) async fn harness_with(config: AuthServiceConfig) -> Harness {
    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(MockTokenRepository::new());
    let token_config = TokenServiceConfig {
        jwt_secret: SECRET.to_string(),
        store_timeout: Duration::from_secs(5),
        ..TokenServiceConfig::default()
    };
    let token_service = Arc::new(TokenService::new(tokens.clone(), token_config));
    let service = AuthService::new(users.clone(), token_service, config).await.unwrap();

    Harness {
        service: Arc::new(service),
        users,
        tokens,
    }
}
