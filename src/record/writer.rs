//! Write the version record file.

use std::path::Path;

use crate::error::ReleaseError;
use crate::files::{new_file_permissions, write_file};

use super::VersionFileInfo;

/// Render the record as `<version>\n<YYYY-MM-DD>\n`.
pub fn format_version_file(info: &VersionFileInfo) -> String {
    format!("{}\n{}\n", info.version, info.date_string())
}

/// Write the record file, creating it with `rw-r--r--` if absent.
///
/// An existing file (or symlink) is overwritten in place and keeps its
/// permission bits.
pub fn write_version_file(path: &Path, info: &VersionFileInfo) -> Result<(), ReleaseError> {
    write_file(path, format_version_file(info).as_bytes(), new_file_permissions())
        .map_err(|e| ReleaseError::file_access(path, "write version file", e))?;

    println!(
        "Updated '{}': version {}, date {}",
        path.display(),
        info.version,
        info.date_string()
    );

    Ok(())
}
