//! Core data types for Crux versioning.
//!
//! This module provides the fundamental types used throughout Crux:
//! - Version with its grammar classifier
//! - VersionRange and its boundary types

pub mod range;
pub mod version;

// Re-export all public types
pub use range::{Boundary, BoundaryKind, VersionRange};
pub use version::{Grammar, Version, GENESIS, PRE_GENESIS};
