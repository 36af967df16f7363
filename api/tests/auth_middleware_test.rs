//! Integration tests for bearer-token protected endpoints

mod common;

use std::sync::Arc;

use actix_web::{http::header, http::StatusCode, test};
use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use blog_api::app::create_app;
use blog_core::domain::entities::user::UserRole;
use blog_core::services::token::{TokenService, TokenServiceConfig};
use blog_infra::memory::InMemoryTokenRepository;
use blog_shared::config::{CorsConfig, Environment};

use common::{into_json, login_body, post, refresh_body, register_body};

fn me_request(authorization: Option<&str>) -> test::TestRequest {
    let req = test::TestRequest::get().uri("/api/v1/auth/me");
    match authorization {
        Some(value) => req.insert_header((header::AUTHORIZATION, value)),
        None => req,
    }
}

#[actix_web::test]
async fn test_me_returns_principal() {
    let state = common::state().await;
    let app = test::init_service(create_app(
        state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let req = post(
        "/api/v1/auth/register",
        register_body("frank@example.com", "frank", "password123"),
    )
    .to_request();
    let (_, registered) = into_json(test::call_service(&app, req).await).await;

    let req = post("/api/v1/auth/login", login_body("frank@example.com", "password123")).to_request();
    let (_, pair) = into_json(test::call_service(&app, req).await).await;
    let bearer = format!("Bearer {}", pair["access_token"].as_str().unwrap());

    let req = me_request(Some(&bearer)).to_request();
    let (status, body) = into_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "user_id": registered["id"], "role": "user" }));
}

#[actix_web::test]
async fn test_header_shape_errors() {
    let state = common::state().await;
    let app = test::init_service(create_app(state, &CorsConfig::default(), Environment::Development)).await;

    let req = me_request(None).to_request();
    let (status, body) = into_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_authorization_header");
    assert_eq!(body["message"], "missing authorization header");

    for value in ["Token abc", "Bearer", "bearer abc", "Bearer  abc"] {
        let req = me_request(Some(value)).to_request();
        let (status, body) = into_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", value);
        assert_eq!(body["error"], "invalid_authorization_format", "{}", value);
    }
}

#[actix_web::test]
async fn test_rejects_expired_forged_and_tampered_tokens() {
    let state = common::state().await;
    let app = test::init_service(create_app(
        state.clone(),
        &CorsConfig::default(),
        Environment::Development,
    ))
    .await;

    let user_id = Uuid::new_v4();
    let token_service = state.auth_service.token_service();

    let expired = token_service
        .issue_access_token_at(user_id, UserRole::Standard, Utc::now() - Duration::hours(1))
        .unwrap();

    let foreign = TokenService::new(
        Arc::new(InMemoryTokenRepository::new()),
        TokenServiceConfig {
            jwt_secret: "some-other-secret".to_string(),
            ..TokenServiceConfig::default()
        },
    )
    .issue_access_token_at(user_id, UserRole::Admin, Utc::now())
    .unwrap();

    let valid = token_service
        .issue_access_token_at(user_id, UserRole::Standard, Utc::now())
        .unwrap();
    let mut parts: Vec<&str> = valid.split('.').collect();
    let admin_payload = foreign.split('.').nth(1).unwrap();
    parts[1] = admin_payload;
    let tampered = parts.join(".");

    for token in [&expired, &foreign, &tampered] {
        let bearer = format!("Bearer {}", token);
        let req = me_request(Some(&bearer)).to_request();
        let (status, body) = into_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "invalid_token");
        assert_eq!(body["message"], "invalid or expired token");
    }

    let req = me_request(Some(&format!("Bearer {}", valid))).to_request();
    let (status, _) = into_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn test_logout_all_revokes_every_session() {
    let state = common::state().await;
    let app = test::init_service(create_app(state, &CorsConfig::default(), Environment::Development)).await;

    let req = post(
        "/api/v1/auth/register",
        register_body("grace@example.com", "grace", "password123"),
    )
    .to_request();
    test::call_service(&app, req).await;

    let mut pairs = Vec::new();
    for _ in 0..3 {
        let req = post("/api/v1/auth/login", login_body("grace@example.com", "password123")).to_request();
        let (_, pair) = into_json(test::call_service(&app, req).await).await;
        pairs.push(pair);
    }

    // Without a bearer token the endpoint is closed
    let req = test::TestRequest::post().uri("/api/v1/auth/logout-all").to_request();
    let (status, _) = into_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let bearer = format!("Bearer {}", pairs[0]["access_token"].as_str().unwrap());
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout-all")
        .insert_header((header::AUTHORIZATION, bearer.as_str()))
        .to_request();
    let (status, body) = into_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["revoked_tokens"], 3);

    for pair in &pairs {
        let req = post(
            "/api/v1/auth/refresh",
            refresh_body(pair["refresh_token"].as_str().unwrap()),
        )
        .to_request();
        let (status, _) = into_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // The access token itself is stateless and outlives the revocation
    let req = me_request(Some(&bearer)).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_change_password_ends_sessions() {
    let state = common::state().await;
    let app = test::init_service(create_app(state, &CorsConfig::default(), Environment::Development)).await;

    let req = post(
        "/api/v1/auth/register",
        register_body("heidi@example.com", "heidi", "password123"),
    )
    .to_request();
    test::call_service(&app, req).await;

    let req = post("/api/v1/auth/login", login_body("heidi@example.com", "password123")).to_request();
    let (_, pair) = into_json(test::call_service(&app, req).await).await;
    let bearer = format!("Bearer {}", pair["access_token"].as_str().unwrap());

    let req = post(
        "/api/v1/auth/change-password",
        json!({ "current_password": "not-my-password", "new_password": "new-password-456" }),
    )
    .insert_header((header::AUTHORIZATION, bearer.as_str()))
    .to_request();
    let (status, body) = into_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_credentials");

    let req = post(
        "/api/v1/auth/change-password",
        json!({ "current_password": "password123", "new_password": "new-password-456" }),
    )
    .insert_header((header::AUTHORIZATION, bearer.as_str()))
    .to_request();
    let (status, _) = into_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);

    let req = post(
        "/api/v1/auth/refresh",
        refresh_body(pair["refresh_token"].as_str().unwrap()),
    )
    .to_request();
    let (status, _) = into_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = post("/api/v1/auth/login", login_body("heidi@example.com", "password123")).to_request();
    let (status, _) = into_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = post("/api/v1/auth/login", login_body("heidi@example.com", "new-password-456")).to_request();
    let (status, _) = into_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
}
