//! API errors and the top-level error responder.
//!
//! Expected failures (401, 400, 404) are rendered where they occur.
//! Anything else becomes a 500 tagged with an [`UnhandledError`] extension,
//! which [`error_responder`] rewrites once at the edge according to the
//! deployment mode.

use std::any::Any;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::config::Environment;
use crate::store::StoreError;
use crate::validation::ValidationFailure;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized request")]
    Unauthorized,

    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// Well-formed JSON that is not an object.
    #[error("Invalid address payload")]
    InvalidPayload(String),

    #[error("Address not found")]
    NotFound,

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("store failure: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "unauthorized",
            ApiError::Validation(_) | ApiError::InvalidPayload(_) => "validation",
            ApiError::NotFound => "not_found",
            ApiError::MalformedBody(_) => "malformed_body",
            ApiError::Store(_) => "store",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized request" })),
            )
                .into_response(),
            ApiError::Validation(failure) => {
                (StatusCode::BAD_REQUEST, failure.to_string()).into_response()
            }
            ApiError::InvalidPayload(_) => {
                (StatusCode::BAD_REQUEST, "Invalid address payload").into_response()
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Address not found").into_response(),
            unexpected => UnhandledError {
                kind: unexpected.kind(),
                message: unexpected.to_string(),
                detail: format!("{:?}", unexpected),
            }
            .into_response(),
        }
    }
}

/// A failure that reached the edge without a specific response.
#[derive(Debug, Clone)]
pub struct UnhandledError {
    pub kind: &'static str,
    pub message: String,
    pub detail: String,
}

impl IntoResponse for UnhandledError {
    /// Renders the production body; `error_responder` swaps in detail when
    /// the deployment mode allows it.
    fn into_response(self) -> Response {
        let mut response = server_error_body().into_response();
        response.extensions_mut().insert(self);
        response
    }
}

fn server_error_body() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": { "message": "server error" } })),
    )
}

/// Shapes 500 responses by deployment mode.
#[derive(Debug, Clone, Copy)]
pub struct ErrorResponder {
    environment: Environment,
}

impl ErrorResponder {
    pub fn new(environment: Environment) -> Self {
        Self { environment }
    }

    pub fn respond(&self, error: &UnhandledError) -> Response {
        if self.environment.is_production() {
            tracing::error!(kind = error.kind, message = %error.message, "Unhandled failure");
            return server_error_body().into_response();
        }

        tracing::error!(
            kind = error.kind,
            message = %error.message,
            detail = %error.detail,
            "Unhandled failure"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "message": error.message,
                "error": { "kind": error.kind, "detail": error.detail },
            })),
        )
            .into_response()
    }

    /// Response for a handler panic caught by `CatchPanicLayer`.
    pub fn panic_response(&self, panic: Box<dyn Any + Send + 'static>) -> Response {
        let message = if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "handler panicked".to_string()
        };
        self.respond(&UnhandledError {
            kind: "panic",
            detail: message.clone(),
            message,
        })
    }
}

/// Terminal middleware: every `UnhandledError` is answered here, once.
pub async fn error_responder(
    State(responder): State<ErrorResponder>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    match response.extensions().get::<UnhandledError>() {
        Some(error) => responder.respond(error),
        None => response,
    }
}
