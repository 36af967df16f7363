use actix_web::{web, HttpResponse};
use validator::Validate;

use blog_core::repositories::{TokenRepository, UserRepository};

use crate::dto::auth::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/refresh
///
/// Redeems a refresh token for a new pair. The presented token is spent
/// whether or not the call succeeds.
///
/// # Request Body
///
/// ```json
/// { "refresh_token": "string" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "access_token": "eyJ...", "refresh_token": "new_refresh_token_string", "expires_in": 900 }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown, already used or expired refresh token
/// - 404 Not Found: The token's owner no longer exists
/// - 500 Internal Server Error: Token generation or store failure
pub async fn refresh_token<U, T>(
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

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(TokenResponse::from(pair)),
        Err(error) => handle_domain_error(&error),
    }
}
