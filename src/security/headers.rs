//! Security response headers and CORS.
//!
//! # Responsibilities
//! - Add hardening headers to every response (unless the handler set them)
//! - Answer cross-origin requests and preflights
//!
//! # Design Decisions
//! - Headers are only inserted when absent, never overwritten
//! - CORS is permissive: the API is token-protected, not origin-protected

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::SecurityConfig;

const HARDENING_HEADERS: [(HeaderName, &str); 5] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    (header::REFERRER_POLICY, "no-referrer"),
    (header::X_DNS_PREFETCH_CONTROL, "off"),
    (header::X_XSS_PROTECTION, "0"),
];

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::POST, Method::DELETE])
        .allow_headers(Any)
        .expose_headers([header::LOCATION])
}

/// Wrap `router` with the configured security layers.
pub fn apply(mut router: Router, config: &SecurityConfig) -> Router {
    if config.enable_headers {
        for (name, value) in HARDENING_HEADERS {
            router = router.layer(SetResponseHeaderLayer::if_not_present(
                name,
                HeaderValue::from_static(value),
            ));
        }
    }
    if config.cors {
        router = router.layer(cors_layer());
    }
    router
}
