//! Deserialization of the visual tool's raw diagram export.
//!
//! These types mirror the export format field-for-field and carry no
//! interpretation. The normalizer in [`crate::compiler`] turns them into
//! the canonical node model.

mod parser;
mod types;

pub use types::*;
