use actix_web::{web, HttpResponse};

use blog_core::repositories::{TokenRepository, UserRepository};

use crate::dto::auth::LogoutAllResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /api/v1/auth/logout-all
///
/// Requires `Authorization: Bearer {access_token}`. Deletes every refresh
/// token of the caller.
pub async fn logout_all<U, T>(
    state: web::Data<AppState<U, T>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    match state.auth_service.logout_all(auth.user_id).await {
        Ok(revoked_tokens) => HttpResponse::Ok().json(LogoutAllResponse {
            message: "Logged out of all sessions".to_string(),
            revoked_tokens,
        }),
        Err(error) => handle_domain_error(&error),
    }
}
