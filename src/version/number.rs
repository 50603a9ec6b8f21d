//! Parsing and ordering of `X.Y.Z` version numbers.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::error::VersionError;

static THREE_PART_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").expect("valid version regex"));

/// A release version made of major, minor and patch components.
///
/// Ordering is lexicographic on (major, minor, patch), which is what the
/// derived `Ord` gives us given the field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionNumber {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl VersionNumber {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a strict `X.Y.Z` string. Surrounding whitespace is rejected.
    pub fn parse(text: &str) -> Result<Self, VersionError> {
        if !THREE_PART_VERSION.is_match(text) {
            return Err(VersionError::Malformed(text.to_string()));
        }

        let mut parts = text.split('.');
        let mut next = |component: &'static str| -> Result<u64, VersionError> {
            // The regex guarantees exactly three parts.
            let part = parts.next().unwrap_or_default();
            part.parse::<u64>()
                .map_err(|source| VersionError::InvalidComponent {
                    component,
                    part: part.to_string(),
                    source,
                })
        };

        let major = next("major")?;
        let minor = next("minor")?;
        let patch = next("patch")?;

        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionNumber {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
