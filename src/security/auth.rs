//! Bearer token gate for mutating and root endpoints.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::error::ApiError;
use crate::observability::metrics;

/// Compares the presented credential with the configured secret.
///
/// Only the last whitespace-separated token of `Authorization` is compared;
/// the scheme word in front of it is ignored.
#[derive(Clone)]
pub struct AuthGate {
    token: Arc<str>,
}

impl AuthGate {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Arc::from(token.into()),
        }
    }

    pub fn check(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let presented = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(presented_token);

        match presented {
            Some(token) if !self.token.is_empty() && token == &*self.token => Ok(()),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

/// Trailing token of an `Authorization` header value.
pub fn presented_token(value: &str) -> Option<&str> {
    value.split_whitespace().last()
}

/// Middleware rejecting requests without the configured bearer token.
pub async fn require_bearer(
    State(gate): State<AuthGate>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match gate.check(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(rejection) => {
            metrics::record_auth_failure();
            rejection.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn extracts_trailing_token() {
        assert_eq!(presented_token("Bearer abc"), Some("abc"));
        assert_eq!(presented_token("Token   abc"), Some("abc"));
        assert_eq!(presented_token("abc"), Some("abc"));
        assert_eq!(presented_token("   "), None);
    }

    #[test]
    fn accepts_matching_token_with_any_scheme() {
        let gate = AuthGate::new("s3cret");
        assert!(gate.check(&headers(Some("Bearer s3cret"))).is_ok());
        assert!(gate.check(&headers(Some("Basic s3cret"))).is_ok());
        assert!(gate.check(&headers(Some("s3cret"))).is_ok());
    }

    #[test]
    fn rejects_missing_or_wrong_token() {
        let gate = AuthGate::new("s3cret");
        assert!(matches!(gate.check(&headers(None)), Err(ApiError::Unauthorized)));
        assert!(gate.check(&headers(Some("Bearer wrong"))).is_err());
        assert!(gate.check(&headers(Some("Bearer s3cret extra"))).is_err());
        assert!(gate.check(&headers(Some("Bearer S3CRET"))).is_err());
        assert!(gate.check(&headers(Some("Bearer "))).is_err());
    }

    #[test]
    fn empty_secret_rejects_everything() {
        let gate = AuthGate::new("");
        assert!(gate.check(&headers(Some("Bearer "))).is_err());
        assert!(gate.check(&headers(None)).is_err());
    }
}
