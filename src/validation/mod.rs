//! Validation rules for create requests.
//!
//! # Data Flow
//! ```text
//! POST /address body
//!     → payload.rs (CreateAddressRequest, all fields optional)
//!     → rules.rs (presence checks, then format checks)
//!     → ValidatedAddress (only constructible by the rules)
//!     → store (AddressRecord::new)
//! ```
//!
//! # Design Decisions
//! - Rules are pure functions, no access to the store
//! - First failing rule short-circuits the rest
//! - The failure's Display text is the client-facing reason

pub mod payload;
pub mod rules;

pub use payload::{CreateAddressRequest, ValidatedAddress, ZipCode};
pub use rules::{validate_new_address, Field, ValidationFailure};
