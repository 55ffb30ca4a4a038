//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, tracing span)
//!     → security gate (protected routes only)
//!     → handlers.rs (validate, touch the store, respond)
//!     → error.rs (uniform 500s, shaped by deployment mode)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::{ApiError, ApiResult, ErrorResponder, UnhandledError};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
