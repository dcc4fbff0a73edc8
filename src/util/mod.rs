//! Path helpers shared across the crate.

pub mod paths;

pub use paths::{lexical_normalize, normalize_path};
