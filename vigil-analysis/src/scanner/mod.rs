//! Scanner module — lazy file walking with ignore patterns.
//!
//! The walk is a restartable iterator over eligible files, so exclusion
//! and extension filters compose once instead of being duplicated in
//! every detector.

mod filters;
mod walk;

pub use filters::WalkFilters;
pub use walk::{relative_str, FileWalk};
