//! # crux-core
//!
//! Version and version-range model shared across all Crux crates.
//!
//! This crate provides:
//! - Version type with grammar-driven parsing and lossless formatting
//! - VersionRange type for bracketed interval expressions over versions
//! - Clock capability for timestamped wildcard pre-release labels
//! - FormatError for unified parse-failure reporting
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (Version, VersionRange, Boundary)
//! - `clock`: Injectable wall-clock used by wildcard expansion
//! - `error`: Error types and result aliases

pub mod clock;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{CruxResult, FormatError};
pub use types::{Boundary, BoundaryKind, Grammar, Version, VersionRange};
