use actix_web::{web, HttpResponse};
use validator::Validate;

use blog_core::repositories::{TokenRepository, UserRepository};

use crate::dto::auth::{LoginRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/login
///
/// Exchanges email and password for an access/refresh pair. An unknown
/// email and a wrong password produce the same 401.
pub async fn login<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.login(&request.email, &request.password).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(&error),
    }
}
