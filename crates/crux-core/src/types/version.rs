//! Semantic version parsing and formatting.
//!
//! A loosened SemVer variant: `major.minor.patch` with an optional free-form
//! pre-release label. Ordering compares the numeric triple first; among equal
//! triples a release sorts before any pre-release, and two pre-release labels
//! compare as plain strings. This is intentionally weaker than full SemVer
//! 2.0 precedence and callers should not rely on dotted-identifier semantics.

use crate::clock::{Clock, SystemClock};
use crate::error::FormatError;
use chrono::Timelike;
use once_cell::sync::Lazy;
use rkyv::{Archive, Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Version zero, the starting point of every version history
pub static GENESIS: Lazy<Version> = Lazy::new(|| Version::new(0, 0, 0));

/// Pre-release counterpart of [`GENESIS`]
pub static PRE_GENESIS: Lazy<Version> = Lazy::new(|| Version::with_pre(0, 0, 0, "pre"));

/// Semantic version (major.minor.patch-pre)
#[derive(Debug, Clone, PartialEq, Eq, Archive, Deserialize, Serialize)]
#[archive(check_bytes)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre: Option<String>,
}

/// Grammar shape of a version string.
///
/// Classification is an ordered first-match: the shapes overlap (`Labeled`
/// is a subset of `General`), so the declaration order here is part of the
/// parsing contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `1.2.32` — bare numeric triple
    Release,
    /// `1.2.32-pre` — a single word label after one hyphen
    Labeled,
    /// `1.2.32-dev-*` — word label plus a literal `-*`, expanded into a
    /// timestamped label at parse time
    WildcardLabeled,
    /// `1.2.32-pre.65456.6545-64` — dot-separated word/hyphen identifiers
    General,
}

impl Grammar {
    /// Classify `input`, trying shapes in declaration order
    pub fn classify(input: &str) -> Option<Grammar> {
        let (triple, label) = match input.split_once('-') {
            Some((triple, label)) => (triple, Some(label)),
            None => (input, None),
        };

        if !is_numeric_triple(triple) {
            return None;
        }

        match label {
            None => Some(Grammar::Release),
            Some(label) if is_word(label) => Some(Grammar::Labeled),
            Some(label) => {
                if label.strip_suffix("-*").is_some_and(is_word) {
                    Some(Grammar::WildcardLabeled)
                } else if is_general_label(label) {
                    Some(Grammar::General)
                } else {
                    None
                }
            },
        }
    }
}

impl Version {
    /// Create a release version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Create a version carrying a pre-release label
    pub fn with_pre(major: u32, minor: u32, patch: u32, pre: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: Some(pre.into()),
        }
    }

    /// Parse using the process wall clock for wildcard expansion
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        Self::parse_with_clock(input, &SystemClock)
    }

    /// Parse `input` against the version grammar.
    ///
    /// `clock` is consulted only for the wildcard shape; every other shape is
    /// a pure function of `input`. Two wildcard parses taken at different
    /// instants produce different labels by design, so wildcard output is
    /// exempt from the round-trip law.
    pub fn parse_with_clock(input: &str, clock: &dyn Clock) -> Result<Self, FormatError> {
        let grammar = Grammar::classify(input).ok_or_else(|| FormatError::version(input))?;

        let (triple, label) = match input.split_once('-') {
            Some((triple, label)) => (triple, Some(label)),
            None => (input, None),
        };

        // classify guarantees exactly three numeric components
        let parts: Vec<&str> = triple.split('.').collect();
        let major = parse_component(parts[0], input)?;
        let minor = parse_component(parts[1], input)?;
        let patch = parse_component(parts[2], input)?;

        let pre = match grammar {
            Grammar::Release => None,
            // the label is kept verbatim so the version round-trips
            Grammar::Labeled | Grammar::General => label.map(str::to_string),
            Grammar::WildcardLabeled => {
                let word = label.and_then(|l| l.strip_suffix("-*")).unwrap_or_default();
                Some(expand_wildcard(word, clock))
            },
        };

        Ok(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// Check if this is a pre-release version
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }

    /// Render the version, optionally dropping the pre-release label
    pub fn format(&self, exclude_pre: bool) -> String {
        match &self.pre {
            Some(pre) if !exclude_pre && !pre.is_empty() => {
                format!("{}.{}.{}-{}", self.major, self.minor, self.patch, pre)
            },
            _ => format!("{}.{}.{}", self.major, self.minor, self.patch),
        }
    }
}

fn parse_component(text: &str, input: &str) -> Result<u32, FormatError> {
    text.parse().map_err(|_| FormatError::version(input))
}

/// Manufacture a build-local label: `{word}-{yyyyMMdd}-{millisecond-of-day}`
/// with the millisecond count zero-padded to 12 digits.
fn expand_wildcard(word: &str, clock: &dyn Clock) -> String {
    let now = clock.now();
    let time = now.time();
    let millis = u64::from(time.num_seconds_from_midnight()) * 1_000
        + u64::from(time.nanosecond() / 1_000_000);

    format!("{word}-{}-{millis:012}", now.format("%Y%m%d"))
}

fn is_numeric_triple(text: &str) -> bool {
    let mut components = 0;
    for component in text.split('.') {
        components += 1;
        if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    components == 3
}

fn is_word(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn is_general_label(text: &str) -> bool {
    text.split('.').all(|segment| {
        !segment.is_empty()
            && segment
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

impl FromStr for Version {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch)) {
            Ordering::Equal => match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                // a release sorts before any pre-release of the same triple
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                // plain string comparison, weaker than SemVer 2.0 precedence
                (Some(a), Some(b)) => a.cmp(b),
            },
            ordering => ordering,
        }
    }
}

// Versions persist as plain strings in JSON documents
impl serde::Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let text: String = serde::Deserialize::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn version_round_trip(
            major in 0u32..1000,
            minor in 0u32..1000,
            patch in 0u32..1000,
            pre in prop::option::of("[a-z]{1,6}(\\.[a-z0-9]{1,4}){0,3}")
        ) {
            let original = Version {
                major,
                minor,
                patch,
                pre: pre.clone(),
            };

            let serialized = original.to_string();
            let parsed = Version::parse(&serialized).unwrap();

            prop_assert_eq!(&parsed, &original);
            // formatting is idempotent through a parse
            prop_assert_eq!(parsed.to_string(), serialized);
        }
    }

    proptest! {
        #[test]
        fn version_comparison_transitivity(
            a_major in 0u32..100,
            a_minor in 0u32..100,
            a_patch in 0u32..100,
            b_major in 0u32..100,
            b_minor in 0u32..100,
            b_patch in 0u32..100,
            c_major in 0u32..100,
            c_minor in 0u32..100,
            c_patch in 0u32..100,
        ) {
            let a = Version::new(a_major, a_minor, a_patch);
            let b = Version::new(b_major, b_minor, b_patch);
            let c = Version::new(c_major, c_minor, c_patch);

            if a < b && b < c {
                prop_assert!(a < c, "Transitivity violated: {} < {} < {} but {} >= {}", a, b, c, a, c);
            }

            if a > b && b > c {
                prop_assert!(a > c, "Transitivity violated: {} > {} > {} but {} <= {}", a, b, c, a, c);
            }
        }
    }
}

#[cfg(test)]
mod rkyv_tests {
    use super::*;

    #[test]
    fn test_rkyv_serialization() {
        use rkyv::Deserialize;

        let version = Version::with_pre(1, 2, 3, "alpha");

        let bytes = rkyv::to_bytes::<_, 256>(&version).unwrap();

        let archived = rkyv::check_archived_root::<Version>(&bytes[..]).unwrap();
        let deserialized: Version = archived.deserialize(&mut rkyv::Infallible).unwrap();

        assert_eq!(version, deserialized);
    }
}
