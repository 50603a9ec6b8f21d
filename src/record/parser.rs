//! Read the version record file.

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex_lite::Regex;

use crate::error::ReleaseError;
use crate::files::read_optional_string;
use crate::version::VersionNumber;

use super::{DATE_FORMAT, VersionFileInfo};

// chrono alone accepts single-digit months and days.
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

/// Read and parse the record file.
///
/// Returns `Ok(None)` when the file does not exist yet (first release).
pub fn read_version_file(path: &Path) -> Result<Option<VersionFileInfo>, ReleaseError> {
    let content = read_optional_string(path)
        .map_err(|e| ReleaseError::file_access(path, "read version file", e))?;

    match content {
        Some(content) => parse_version_file(&content, path).map(Some),
        None => Ok(None),
    }
}

/// Parse record file contents. `path` is only used for error messages.
///
/// The first line holds `X.Y.Z`, the second `YYYY-MM-DD`; anything after
/// that is ignored.
pub fn parse_version_file(content: &str, path: &Path) -> Result<VersionFileInfo, ReleaseError> {
    let lines: Vec<&str> = content.trim().split('\n').collect();
    if lines.len() < 2 {
        return Err(ReleaseError::MalformedVersionFile {
            path: path.to_path_buf(),
            reason: "expected at least 2 lines (version, date)".to_string(),
        });
    }

    let version_line = lines[0].trim();
    let version =
        VersionNumber::parse(version_line).map_err(|e| ReleaseError::MalformedVersionFile {
            path: path.to_path_buf(),
            reason: format!("error parsing version '{}': {}", version_line, e),
        })?;

    let date_line = lines[1].trim();
    let release_date = parse_release_date(date_line).ok_or_else(|| ReleaseError::MalformedDate {
        path: path.to_path_buf(),
        date: date_line.to_string(),
    })?;

    Ok(VersionFileInfo {
        version,
        release_date,
    })
}

fn parse_release_date(text: &str) -> Option<NaiveDate> {
    if !DATE_SHAPE.is_match(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}
