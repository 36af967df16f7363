use actix_web::{web, HttpResponse};
use validator::Validate;

use blog_core::repositories::{TokenRepository, UserRepository};

use crate::dto::auth::{ChangePasswordRequest, MessageResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/change-password
///
/// Requires a bearer access token. On success every refresh token of the
/// user is revoked, so all sessions must log in again once their access
/// tokens run out.
pub async fn change_password<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .auth_service
        .change_password(auth.user_id, &request.current_password, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Password changed")),
        Err(error) => handle_domain_error(&error),
    }
}
