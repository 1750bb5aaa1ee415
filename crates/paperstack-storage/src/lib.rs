//! Storage abstraction for the PaperStack portal core.
//!
//! Backend crates (e.g., paperstack-store-memory, or a SQL-backed store)
//! implement the [`Store`] trait so `paperstack-core` doesn't depend on any
//! specific database engine or schema details.

use thiserror::Error;

mod store;
mod types;

pub use store::Store;
#[cfg(feature = "test-support")]
pub use store::MockStore;
pub use types::*;

/// Uniform error type for all storage backends.
///
/// Unique-constraint violations (primary email, verified email, subject code)
/// surface as `AlreadyExists`; lifecycle guards that only the backend can
/// enforce atomically (e.g., resolving a non-pending report) surface as
/// `Conflict`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("conflict")]
    Conflict,
    #[error("backend error: {0}")]
    Backend(String),
}
