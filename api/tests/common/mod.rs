//! Shared setup for HTTP tests: in-memory stores, fast bcrypt

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{body::MessageBody, dev::ServiceResponse, http::StatusCode, test, web};
use serde_json::{json, Value};

use blog_api::routes::auth::AppState;
use blog_core::services::auth::{AuthService, AuthServiceConfig};
use blog_core::services::token::{TokenService, TokenServiceConfig};
use blog_infra::memory::{InMemoryTokenRepository, InMemoryUserRepository};

pub const SECRET: &str = "api-test-secret";

pub type TestState = AppState<InMemoryUserRepository, InMemoryTokenRepository>;

pub async fn state() -> web::Data<TestState> {
    let users = Arc::new(InMemoryUserRepository::new());
    let tokens = Arc::new(InMemoryTokenRepository::new());

    let token_service = Arc::new(TokenService::new(
        tokens,
        TokenServiceConfig {
            jwt_secret: SECRET.to_string(),
            ..TokenServiceConfig::default()
        },
    ));
    let auth_service = AuthService::new(
        users,
        token_service,
        AuthServiceConfig {
            bcrypt_cost: 4,
            ..AuthServiceConfig::default()
        },
    )
    .await
    .expect("auth service");

    web::Data::new(AppState::new(Arc::new(auth_service)))
}

pub fn post(uri: &str, body: Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(body)
}

pub fn register_body(email: &str, username: &str, password: &str) -> Value {
    json!({ "email": email, "username": username, "password": password })
}

pub fn login_body(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

pub fn refresh_body(refresh_token: &str) -> Value {
    json!({ "refresh_token": refresh_token })
}

pub async fn into_json<B: MessageBody>(resp: ServiceResponse<B>) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = test::read_body(resp).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
