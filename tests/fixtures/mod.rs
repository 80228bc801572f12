//! Test fixtures and data generators
//!
//! Builders and generators for creating photometric profile test data.

pub mod builders;

pub use builders::*;
