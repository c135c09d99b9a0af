//! Nationality Core
//!
//! Error types and result handling shared across the name nationality
//! classifier crates.

pub mod error;

pub use error::{BoxError, Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
}
