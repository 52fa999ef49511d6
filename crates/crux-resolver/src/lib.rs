//! Version selection for Crux
//!
//! Picks the best available version admitted by one or more version ranges,
//! with optional preference for stable (non pre-release) versions.

pub mod select;

// Re-export main types
pub use select::{RangeSet, VersionSelector};
