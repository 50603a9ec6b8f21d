//! oiseau-release - bump the release version across oiseau's project files.
//!
//! # Overview
//!
//! A release writes the new version and today's date to the `version` record
//! file, then patches the copies of the version embedded in `CMakeLists.txt`,
//! `python/pyproject.toml` and `python/oiseau/__init__.py`. The new version
//! must be strictly newer than the recorded one.

pub mod cli;
pub mod error;
pub(crate) mod files;
pub mod logging;
pub mod record;
pub mod release;
pub mod update;
pub mod version;

// Re-export commonly used types
pub use error::{ReleaseError, VersionError};
pub use record::VersionFileInfo;
pub use release::{ReleaseConfig, ReleaseReport, run_release, run_release_on};
pub use update::{SkipReason, TargetFile, TargetKind, UpdateOutcome, update_version_in_file};
pub use version::VersionNumber;
