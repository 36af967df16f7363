use actix_web::{web, HttpResponse};
use validator::Validate;

use blog_core::repositories::{TokenRepository, UserRepository};

use crate::dto::auth::{RegisterRequest, UserResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/auth/register
///
/// # Request Body
///
/// ```json
/// { "email": "alice@example.com", "username": "alice", "password": "password123" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "id": "…", "email": "alice@example.com", "username": "alice" }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Invalid email, username or password
/// - 403 Forbidden: Registration is disabled
/// - 409 Conflict: Email or username already taken
pub async fn register<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let request = request.into_inner();
    match state
        .auth_service
        .register(&request.email, &request.username, &request.password)
        .await
    {
        Ok(user) => HttpResponse::Created().json(UserResponse::from(user)),
        Err(error) => handle_domain_error(&error),
    }
}
