//! Type definitions for PaperStack storage.

mod documents;
mod ids;
mod principals;
mod reports;
mod roles;
mod subjects;

// Re-export all types from submodules
pub use documents::*;
pub use ids::*;
pub use principals::*;
pub use reports::*;
pub use roles::*;
pub use subjects::*;
