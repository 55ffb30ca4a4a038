//! Address storage subsystem.
//!
//! # Data Flow
//! ```text
//! startup
//!     → seed.rs (fixed seed set, validated)
//!     → memory.rs (AddressStore, shared via Arc)
//!
//! handlers
//!     → list / find_index          (shared read lock)
//!     → insert / remove_by_id      (exclusive write lock)
//! ```
//!
//! # Design Decisions
//! - Process memory only; contents are lost on exit
//! - Insertion order is preserved; lookups are linear scans
//! - Lock poisoning is reported as an error, never unwrapped

pub mod address;
pub mod memory;
pub mod seed;

pub use address::{generate_id, AddressRecord, CreatedAddress};
pub use memory::{AddressStore, StoreError, StoreResult};
