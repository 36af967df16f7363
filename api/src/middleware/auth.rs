//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware reads the `Authorization` header, validates the bearer
//! token with the shared `TokenValidator` and injects an `AuthContext` into
//! the request. Validation is local: no store is consulted, so any service
//! holding the signing secret can mount the same middleware.

use std::future::{ready, Ready};
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, AUTHORIZATION},
    Error, FromRequest, HttpMessage, HttpRequest,
};
use blog_core::domain::entities::user::UserRole;
use blog_core::domain::value_objects::AuthenticatedUser;
use blog_core::errors::TokenError;
use blog_core::services::token::TokenValidator;
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::handlers::error::{handle_domain_error, ApiError};

/// Authenticated identity injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Subject of the access token
    pub user_id: Uuid,
    /// Role asserted by the access token
    pub role: UserRole,
}

impl From<AuthenticatedUser> for AuthContext {
    fn from(principal: AuthenticatedUser) -> Self {
        Self {
            user_id: principal.user_id,
            role: principal.role,
        }
    }
}

impl AuthContext {
    pub fn principal(&self) -> AuthenticatedUser {
        AuthenticatedUser::new(self.user_id, self.role)
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    validator: Arc<TokenValidator>,
}

impl JwtAuth {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self { validator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service,
            validator: Arc::clone(&self.validator),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: S,
    validator: Arc<TokenValidator>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let verified = authorization_header(req.headers())
            .and_then(|header| self.validator.validate(header));

        match verified {
            Ok(principal) => {
                req.extensions_mut().insert(AuthContext::from(principal));
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(e) => {
                tracing::warn!(path = %req.path(), reason = e.error_code(), "rejected bearer token");
                let response = handle_domain_error(&e.into());
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}

/// The raw `Authorization` value; a non-ASCII value counts as malformed
fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, TokenError> {
    headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| TokenError::InvalidAuthorizationFormat))
        .transpose()
}

/// Extractor for handlers behind `JwtAuth`
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ApiError::from(TokenError::MissingAuthorizationHeader));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;

    #[test]
    fn test_authorization_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(authorization_header(&headers), Ok(None));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(authorization_header(&headers), Ok(Some("Bearer abc")));

        headers.insert(AUTHORIZATION, HeaderValue::from_bytes(b"Bearer \xff").unwrap());
        assert_eq!(
            authorization_header(&headers),
            Err(TokenError::InvalidAuthorizationFormat)
        );
    }

    #[test]
    fn test_context_from_principal() {
        let user_id = Uuid::new_v4();
        let context = AuthContext::from(AuthenticatedUser::new(user_id, UserRole::Author));
        assert_eq!(context.user_id, user_id);
        assert_eq!(context.principal().role, UserRole::Author);
    }
}
