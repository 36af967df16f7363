//! Application factory
//!
//! Builds the actix-web `App` with shared state, request tracing, CORS and
//! the `/api/v1/auth` routes.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use blog_core::repositories::{TokenRepository, UserRepository};
use blog_shared::config::{CorsConfig, Environment};
use blog_shared::{error_codes, ErrorResponse};

use crate::handlers::error::json_error_handler;
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::auth::{
    change_password::change_password, login::login, logout::logout, logout_all::logout_all,
    me::me, refresh::refresh_token, register::register, AppState,
};
use crate::routes::health::health_check;

/// Create and configure the application with all dependencies
pub fn create_app<U, T>(
    app_state: web::Data<AppState<U, T>>,
    cors: &CorsConfig,
    environment: Environment,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let validator = Arc::new(app_state.auth_service.token_service().validator().clone());
    let jwt_auth = JwtAuth::new(validator);

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(create_cors(cors, environment))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .route("/register", web::post().to(register::<U, T>))
                    .route("/login", web::post().to(login::<U, T>))
                    .route("/refresh", web::post().to(refresh_token::<U, T>))
                    .route("/logout", web::post().to(logout::<U, T>))
                    .service(
                        web::resource("/logout-all")
                            .route(web::post().to(logout_all::<U, T>))
                            .wrap(jwt_auth.clone()),
                    )
                    .service(
                        web::resource("/change-password")
                            .route(web::post().to(change_password::<U, T>))
                            .wrap(jwt_auth.clone()),
                    )
                    .service(
                        web::resource("/me")
                            .route(web::get().to(me))
                            .wrap(jwt_auth),
                    ),
            ),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
