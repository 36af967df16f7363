//! Mapping from domain errors to HTTP responses
//!
//! Client mistakes come back as 4xx with the error's own short reason.
//! Store and internal failures come back as 5xx with a generic message and
//! are logged here, since the caller never sees the cause.

use std::collections::HashMap;
use std::fmt;

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use blog_core::errors::{CredentialError, DomainError, TokenError, ValidationError};
use blog_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

/// Status code for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Credential(CredentialError::EmailAlreadyExists)
        | DomainError::Credential(CredentialError::UsernameAlreadyExists) => StatusCode::CONFLICT,
        DomainError::Credential(CredentialError::RegistrationDisabled) => StatusCode::FORBIDDEN,
        DomainError::Credential(CredentialError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        DomainError::Token(TokenError::TokenGenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::StoreTimeout { .. } => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Store { .. } | DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the JSON error response for a domain error
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    let message = match error {
        DomainError::Store { .. } | DomainError::Internal { .. } => {
            tracing::error!(error = %error, "request failed");
            "internal server error".to_string()
        }
        DomainError::StoreTimeout { .. } => {
            tracing::error!(error = %error, "store deadline exceeded");
            "service temporarily unavailable".to_string()
        }
        DomainError::Token(TokenError::TokenGenerationFailed) => {
            tracing::error!(error = %error, "request failed");
            error.to_string()
        }
        _ => {
            tracing::debug!(code = error.error_code(), "request rejected");
            error.to_string()
        }
    };

    let mut body = ErrorResponse::new(error.error_code(), message);
    if let DomainError::Validation(validation) = error {
        if let Some(field) = validation.field() {
            body = body.add_detail("field", field);
        }
    }

    HttpResponse::build(status).json(body)
}

/// 400 response for a request body that failed DTO validation
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let fields: HashMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let codes = errs.iter().map(|e| e.code.to_string()).collect();
            (field.to_string(), codes)
        })
        .collect();

    let mut names: Vec<&str> = fields.keys().map(String::as_str).collect();
    names.sort_unstable();
    let message = format!("invalid {}", names.join(", "));

    HttpResponse::BadRequest().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, message).add_detail("fields", &fields),
    )
}

/// `JsonConfig` error handler: malformed or mistyped bodies become a JSON 400
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let error: DomainError = ValidationError::MalformedBody {
        reason: err.to_string(),
    }
    .into();
    let response = handle_domain_error(&error);
    InternalError::from_response(err, response).into()
}

/// Domain error carried through actix's error path (extractors, middleware)
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError(error)
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError(error.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}
