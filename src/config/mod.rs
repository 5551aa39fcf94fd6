//! Configuration module
//!
//! Loads and validates engine configuration: placeholder syntax, render
//! limits, and built-in expression settings.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{ConfigLoader, LoadResult, LoadWarning, LoaderOptions};
pub use schema::*;
pub use validation::{ValidationResult, Validator};
