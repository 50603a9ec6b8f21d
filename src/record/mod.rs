//! The `version` record file: last released version and its date.

pub mod parser;
pub mod writer;

use chrono::NaiveDate;

use crate::version::VersionNumber;

pub use parser::{parse_version_file, read_version_file};
pub use writer::{format_version_file, write_version_file};

/// Date format used on the second line of the record file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Contents of the version record file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionFileInfo {
    pub version: VersionNumber,
    pub release_date: NaiveDate,
}

impl VersionFileInfo {
    /// Release date rendered as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.release_date.format(DATE_FORMAT).to_string()
    }
}
