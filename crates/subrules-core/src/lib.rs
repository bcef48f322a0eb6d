//! subrules-core: errors, typed value access, and shape normalization.
//!
//! This crate is the foundational dependency for the other subrules crates.
//! It knows nothing about subscriptions, apps, or groups; it only knows how
//! to pull strictly-typed scalars and arrays out of a generic JSON tree and
//! how to canonicalize the shorthand shapes authors are allowed to write.

pub mod error;
pub mod shape;
pub mod value;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use value::Object;
