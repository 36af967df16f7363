//! CORS middleware configuration for cross-origin requests.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use blog_shared::config::{CorsConfig, Environment};

const MAX_AGE_SECONDS: usize = 3600;

/// Creates a CORS middleware instance for the given origins.
///
/// With no configured origins, development and staging accept any origin
/// while production accepts none (same-origin only).
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .max_age(MAX_AGE_SECONDS);

    if config.allowed_origins.is_empty() {
        if environment.is_production() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; cross-origin requests will be refused");
        } else {
            cors = cors.allow_any_origin();
        }
        return cors;
    }

    for origin in &config.allowed_origins {
        tracing::info!(origin = %origin, "allowing CORS origin");
        cors = cors.allowed_origin(origin);
    }
    cors
}
