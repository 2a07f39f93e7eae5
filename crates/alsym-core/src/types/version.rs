//! Four-component application version type.
//!
//! AL symbol packages are versioned with up to four dotted numeric components
//! (major.minor.build.revision). Missing trailing components compare as zero,
//! so `1.0` and `1.0.0.0` are the same version. Strings that do not parse as
//! a numeric tuple keep working: they compare by ordinal string order, after
//! all numeric versions, which keeps the ordering total.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A symbol-package version (major.minor.build.revision)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AppVersion {
    /// The version string exactly as declared
    raw: String,
    /// Parsed numeric components, zero-padded to four, when the raw
    /// string is a valid dotted numeric tuple
    numeric: Option<[u64; 4]>,
}

impl AppVersion {
    /// Parse a version string. Never fails: non-numeric input becomes a
    /// text version that compares ordinally.
    pub fn parse(input: &str) -> Self {
        let raw = input.trim().to_string();
        let numeric = parse_numeric(&raw);
        Self { raw, numeric }
    }

    /// Build a version from explicit numeric components
    pub fn new(major: u64, minor: u64, build: u64, revision: u64) -> Self {
        let parts = [major, minor, build, revision];
        Self {
            raw: format!("{}.{}.{}.{}", major, minor, build, revision),
            numeric: Some(parts),
        }
    }

    /// The version string as declared
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether this version parsed as a numeric dotted tuple
    pub fn is_numeric(&self) -> bool {
        self.numeric.is_some()
    }
}

/// Parse up to four dot-separated non-negative integers, padded with zeros
fn parse_numeric(raw: &str) -> Option<[u64; 4]> {
    if raw.is_empty() {
        return None;
    }

    let mut parts = [0u64; 4];
    let mut count = 0;

    for component in raw.split('.') {
        if count == 4 {
            return None; // more than four components
        }
        parts[count] = component.parse().ok()?;
        count += 1;
    }

    Some(parts)
}

impl FromStr for AppVersion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for AppVersion {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<AppVersion> for String {
    fn from(v: AppVersion) -> Self {
        v.raw
    }
}

impl fmt::Display for AppVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for AppVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.numeric, &other.numeric) {
            (Some(a), Some(b)) => a.cmp(b),
            (None, None) => self.raw.cmp(&other.raw),
            // Numeric versions sort before text versions so that the
            // ordering stays total when the two kinds mix.
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for AppVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for AppVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AppVersion {}

impl Hash for AppVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with Eq: `1.0` and `1.0.0.0` hash identically
        match &self.numeric {
            Some(parts) => parts.hash(state),
            None => self.raw.hash(state),
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn numeric_round_trip(
            major in 0u64..10000,
            minor in 0u64..10000,
            build in 0u64..10000,
            revision in 0u64..10000,
        ) {
            let original = AppVersion::new(major, minor, build, revision);
            let reparsed = AppVersion::parse(original.as_str());
            prop_assert_eq!(&original, &reparsed);
            prop_assert!(reparsed.is_numeric());
        }
    }

    proptest! {
        #[test]
        fn comparison_is_total_and_transitive(
            a in "[0-9a-z.]{1,12}",
            b in "[0-9a-z.]{1,12}",
            c in "[0-9a-z.]{1,12}",
        ) {
            let a = AppVersion::parse(&a);
            let b = AppVersion::parse(&b);
            let c = AppVersion::parse(&c);

            // Antisymmetry
            if a < b {
                prop_assert!(b > a);
            }

            // Transitivity across the numeric/text boundary
            if a < b && b < c {
                prop_assert!(a < c, "transitivity violated: {} < {} < {} but {} >= {}", a, b, c, a, c);
            }
        }
    }
}
