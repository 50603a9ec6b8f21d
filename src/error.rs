//! Error types for oiseau-release modules using thiserror.

use std::cmp::Ordering;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::version::VersionNumber;

/// Errors from parsing a version string.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Version string '{0}' does not match X.Y.Z format")]
    Malformed(String),

    #[error("Invalid {component} version part '{part}': {source}")]
    InvalidComponent {
        component: &'static str,
        part: String,
        #[source]
        source: ParseIntError,
    },
}

/// Errors from a release run.
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("The {flag} flag is required.\nUsage: {usage}")]
    MissingRequiredFlag { flag: &'static str, usage: String },

    #[error("Invalid new version format: {0}")]
    InvalidVersion(#[from] VersionError),

    #[error("Version file '{}' is malformed: {reason}", path.display())]
    MalformedVersionFile { path: PathBuf, reason: String },

    #[error("Failed to parse release date '{date}' from '{}': expected YYYY-MM-DD", path.display())]
    MalformedDate { path: PathBuf, date: String },

    #[error("Failed to {action} '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "New version '{new}' is not strictly newer than current version '{current}' found in '{}' (comparison: {})",
        path.display(),
        ordering_label(*ordering)
    )]
    VersionNotAdvancing {
        new: VersionNumber,
        current: VersionNumber,
        path: PathBuf,
        ordering: Ordering,
    },
}

impl ReleaseError {
    pub(crate) fn file_access(
        path: impl Into<PathBuf>,
        action: &'static str,
        source: std::io::Error,
    ) -> Self {
        ReleaseError::FileAccess {
            path: path.into(),
            action,
            source,
        }
    }
}

fn ordering_label(ordering: Ordering) -> &'static str {
    match ordering {
        Ordering::Less => "older",
        Ordering::Equal => "equal",
        Ordering::Greater => "newer",
    }
}
