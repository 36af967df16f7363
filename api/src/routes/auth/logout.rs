use actix_web::{web, HttpResponse};
use validator::Validate;

use blog_core::repositories::{TokenRepository, UserRepository};

use crate::dto::auth::{MessageResponse, RefreshTokenRequest};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented refresh token only. Access tokens already issued
/// stay valid until they expire, and the user's other sessions are untouched.
pub async fn logout<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state.auth_service.logout(&request.refresh_token).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Successfully logged out")),
        Err(error) => handle_domain_error(&error),
    }
}
