//! Version range parsing, formatting, and membership.
//!
//! Ranges follow the bracketed interval grammar: a bare version pins a single
//! version, `[a,b]` / `(a,b)` carry explicit bounds, and a blank side is
//! open-ended. Serialization is lossless: a parsed range prints back as the
//! text it came from, collapsing to the single-version form when both bounds
//! name the same version.

use crate::clock::{Clock, SystemClock};
use crate::error::FormatError;
use crate::types::Version;
use rkyv::{Archive, Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a bound includes its own version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
pub enum BoundaryKind {
    Inclusive,
    Exclusive,
}

impl BoundaryKind {
    /// Opening marker for a lower bound
    pub fn lower_symbol(self) -> char {
        match self {
            BoundaryKind::Inclusive => '[',
            BoundaryKind::Exclusive => '(',
        }
    }

    /// Closing marker for an upper bound
    pub fn upper_symbol(self) -> char {
        match self {
            BoundaryKind::Inclusive => ']',
            BoundaryKind::Exclusive => ')',
        }
    }
}

/// One side of a version range.
///
/// An absent version is an open-ended bound; the bracket marker it carried in
/// the source text is kept only so the range prints back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
pub struct Boundary {
    pub version: Option<Version>,
    pub kind: BoundaryKind,
}

impl Boundary {
    /// Bound that admits its own version
    pub fn inclusive(version: Version) -> Self {
        Self {
            version: Some(version),
            kind: BoundaryKind::Inclusive,
        }
    }

    /// Bound that excludes its own version
    pub fn exclusive(version: Version) -> Self {
        Self {
            version: Some(version),
            kind: BoundaryKind::Exclusive,
        }
    }

    /// Open-ended bound
    pub fn unbounded() -> Self {
        Self {
            version: None,
            kind: BoundaryKind::Exclusive,
        }
    }
}

/// Inclusive/exclusive interval over versions
#[derive(Debug, Clone, PartialEq, Eq, Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
pub struct VersionRange {
    pub lower_bound: Boundary,
    pub upper_bound: Boundary,
}

impl VersionRange {
    /// Create a range from two explicit boundaries
    pub fn new(lower_bound: Boundary, upper_bound: Boundary) -> Self {
        Self {
            lower_bound,
            upper_bound,
        }
    }

    /// Parse using the process wall clock for wildcard expansion
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        Self::parse_with_clock(input, &SystemClock)
    }

    /// Parse a range expression.
    ///
    /// Bound versions go through [`Version::parse_with_clock`], so a wildcard
    /// pre-release inside a range expands through the same `clock`.
    pub fn parse_with_clock(input: &str, clock: &dyn Clock) -> Result<Self, FormatError> {
        if input.trim().is_empty() {
            return Err(FormatError::range(input));
        }

        // brackets must be present at both ends or at neither
        if has_lower_bracket(input) != has_upper_bracket(input) {
            return Err(FormatError::range(input));
        }

        let segments: Vec<&str> = input.split(',').collect();
        match segments.as_slice() {
            [pinned] => {
                // a pinned version cannot declare itself exclusive
                if pinned.starts_with('(') || pinned.ends_with(')') {
                    return Err(FormatError::range(input));
                }

                let bracketed = has_upper_bracket(pinned);
                let text = pinned.trim_matches(|c| c == '[' || c == ']');
                let version = Version::parse_with_clock(text, clock)?;

                Ok(Self {
                    lower_bound: Boundary::inclusive(version.clone()),
                    upper_bound: Boundary {
                        version: Some(version),
                        kind: if bracketed {
                            BoundaryKind::Inclusive
                        } else {
                            // bare shorthand encodes an exclusive upper marker
                            BoundaryKind::Exclusive
                        },
                    },
                })
            },

            [lower, upper] => Ok(Self {
                lower_bound: Boundary {
                    kind: if lower.starts_with('(') {
                        BoundaryKind::Exclusive
                    } else {
                        BoundaryKind::Inclusive
                    },
                    version: parse_bound(lower.trim_start_matches(|c| c == '[' || c == '('), clock)?,
                },
                upper_bound: Boundary {
                    kind: if upper.ends_with(')') {
                        BoundaryKind::Exclusive
                    } else {
                        BoundaryKind::Inclusive
                    },
                    version: parse_bound(upper.trim_end_matches(|c| c == ']' || c == ')'), clock)?,
                },
            }),

            _ => Err(FormatError::range(input)),
        }
    }

    /// Membership test: both bounds must admit `candidate`, with strictness
    /// per [`BoundaryKind`]. An absent bound admits everything on its side.
    pub fn contains(&self, candidate: &Version) -> bool {
        let above_lower = match &self.lower_bound.version {
            None => true,
            Some(lower) => match self.lower_bound.kind {
                BoundaryKind::Inclusive => candidate >= lower,
                BoundaryKind::Exclusive => candidate > lower,
            },
        };

        let below_upper = match &self.upper_bound.version {
            None => true,
            Some(upper) => match self.upper_bound.kind {
                BoundaryKind::Inclusive => candidate <= upper,
                BoundaryKind::Exclusive => candidate < upper,
            },
        };

        above_lower && below_upper
    }

    /// Check if both bounds name the same version
    pub fn is_pinned(&self) -> bool {
        matches!(
            (&self.lower_bound.version, &self.upper_bound.version),
            (Some(lower), Some(upper)) if lower == upper
        )
    }
}

fn has_lower_bracket(text: &str) -> bool {
    text.starts_with('[') || text.starts_with('(')
}

fn has_upper_bracket(text: &str) -> bool {
    text.ends_with(']') || text.ends_with(')')
}

fn parse_bound(text: &str, clock: &dyn Clock) -> Result<Option<Version>, FormatError> {
    if text.trim().is_empty() {
        Ok(None)
    } else {
        Version::parse_with_clock(text, clock).map(Some)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lower = &self.lower_bound;
        let upper = &self.upper_bound;

        let lower_text = lower.version.as_ref().map(Version::to_string);
        let upper_text = upper.version.as_ref().map(Version::to_string);

        if lower_text != upper_text {
            return write!(
                f,
                "{}{},{}{}",
                lower.kind.lower_symbol(),
                lower_text.unwrap_or_default(),
                upper_text.unwrap_or_default(),
                upper.kind.upper_symbol(),
            );
        }

        let pinned = lower_text.unwrap_or_default();
        match (lower.kind, upper.kind) {
            // bare shorthand is the encoding of an inclusive-exclusive pin
            (BoundaryKind::Inclusive, BoundaryKind::Exclusive) => f.write_str(&pinned),
            (BoundaryKind::Inclusive, BoundaryKind::Inclusive) => write!(f, "[{pinned}]"),
            // an exclusive single point has no shorthand; keep the explicit form
            (BoundaryKind::Exclusive, upper_kind) => {
                write!(f, "({pinned},{pinned}{}", upper_kind.upper_symbol())
            },
        }
    }
}

impl FromStr for VersionRange {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Ranges persist as plain strings in JSON documents
impl serde::Serialize for VersionRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for VersionRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text: String = serde::Deserialize::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
