//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (CORS preflight, hardening headers on the way out)
//!     → [router dispatch]
//!     → auth.rs (bearer gate, protected routes only)
//!     → handler
//! ```
//!
//! # Design Decisions
//! - Fail closed: missing or malformed credentials are rejected
//! - The gate is stateless apart from the shared secret
//! - Rejections are counted, not logged

pub mod auth;
pub mod headers;

pub use auth::{presented_token, require_bearer, AuthGate};
