//! # mb-api Middleware
//!
//! Shared middleware for logging and cross-origin access.

use actix_web::middleware::Logger;
use actix_cors::Cors;

// Returns the standard request logger:
// remote-ip "request-line" status-code response-size "referrer" "user-agent"
pub fn standard_middleware() -> Logger {
    Logger::default()
}

// Configures CORS for a separately-hosted frontend. When no origin is
// configured, any origin is accepted (local development).
pub fn cors_policy(allowed_origin: Option<&str>) -> Cors {
    let cors = match allowed_origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };
    cors.allow_any_header()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
        .max_age(3600)
}
