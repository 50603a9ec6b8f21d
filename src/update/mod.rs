//! Pattern-based version updates for secondary files.
//!
//! A missing file or a file without a version marker is skipped, not an
//! error. Only genuine I/O failures abort. Files are handled as bytes, so
//! content that is not valid UTF-8 outside the match is left untouched.
//! Updated files are rewritten in place, which keeps symlinks and
//! permission bits.

pub mod targets;

use std::fmt;

use tracing::{debug, info};

use crate::error::ReleaseError;
use crate::files::{read_optional_bytes, rewrite_in_place};
use crate::version::VersionNumber;

pub use targets::{TargetFile, TargetKind, VERSION_GROUP};

/// Why a secondary file was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    FileNotFound,
    PatternNotFound,
    AlreadyCurrent,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::FileNotFound => write!(f, "file not found"),
            SkipReason::PatternNotFound => write!(f, "version pattern not found"),
            SkipReason::AlreadyCurrent => write!(f, "already up to date"),
        }
    }
}

/// Result of updating one secondary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Skipped(SkipReason),
    /// The file was rewritten. `old` is the version text found in the file.
    Updated { old: String, new: VersionNumber },
    /// Dry run: the file would have been rewritten.
    WouldUpdate { old: String, new: VersionNumber },
}

/// Replace the version marker in `target` with `new_version`.
pub fn update_version_in_file(
    target: &TargetFile,
    new_version: &VersionNumber,
    dry_run: bool,
) -> Result<UpdateOutcome, ReleaseError> {
    let path = &target.path;
    let kind = target.kind;

    let Some(content) = read_optional_bytes(path)
        .map_err(|e| ReleaseError::file_access(path, "read", e))?
    else {
        info!("{} file '{}' not found, skipping update.", kind, path.display());
        return Ok(UpdateOutcome::Skipped(SkipReason::FileNotFound));
    };

    let pattern = kind.pattern();
    let Some(caps) = pattern.captures(&content) else {
        info!(
            "Version pattern not found in {} file '{}', skipping update.",
            kind,
            path.display()
        );
        return Ok(UpdateOutcome::Skipped(SkipReason::PatternNotFound));
    };

    let old = String::from_utf8_lossy(&caps[VERSION_GROUP]).into_owned();
    let new = new_version.to_string();
    if old == new {
        info!(
            "{} file '{}' already contains version {}. No update needed.",
            kind,
            path.display(),
            new
        );
        return Ok(UpdateOutcome::Skipped(SkipReason::AlreadyCurrent));
    }

    if dry_run {
        debug!("Dry run: not writing {}", path.display());
        return Ok(UpdateOutcome::WouldUpdate {
            old,
            new: *new_version,
        });
    }

    let updated = pattern.replace_all(&content, |caps: &regex::bytes::Captures<'_>| {
        kind.render_replacement(caps, new_version)
    });

    rewrite_in_place(path, &updated)
        .map_err(|e| ReleaseError::file_access(path, "write", e))?;

    info!(
        "Updated version in {} file '{}' from {} to {}",
        kind,
        path.display(),
        old,
        new
    );

    Ok(UpdateOutcome::Updated {
        old,
        new: *new_version,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn target_in(dir: &Path, kind: TargetKind, content: Option<&str>) -> TargetFile {
        let target = TargetFile::new(dir, kind);
        if let Some(content) = content {
            fs::create_dir_all(target.path.parent().unwrap()).unwrap();
            fs::write(&target.path, content).unwrap();
        }
        target
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let target = target_in(dir.path(), TargetKind::PyProject, None);

        let outcome = update_version_in_file(&target, &VersionNumber::new(1, 0, 0), false).unwrap();

        assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::FileNotFound));
        assert!(!target.path.exists());
    }

    #[test]
    fn test_missing_pattern_is_skipped_without_write() {
        let dir = tempfile::tempdir().unwrap();
        let original = "[project]\nname = \"oiseau\"\ndynamic = [\"version\"]\n";
        let target = target_in(dir.path(), TargetKind::PyProject, Some(original));

        let outcome = update_version_in_file(&target, &VersionNumber::new(1, 0, 0), false).unwrap();

        assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::PatternNotFound));
        assert_eq!(fs::read_to_string(&target.path).unwrap(), original);
    }

    #[test]
    fn test_updates_only_the_version() {
        let dir = tempfile::tempdir().unwrap();
        let original = "cmake_minimum_required(VERSION 3.21)\n\
                        project(oiseau VERSION 0.1.0 LANGUAGES CXX)\n\
                        set(FOO 0.1.0)\n";
        let target = target_in(dir.path(), TargetKind::CMake, Some(original));

        let outcome = update_version_in_file(&target, &VersionNumber::new(0, 2, 0), false).unwrap();

        assert_eq!(
            outcome,
            UpdateOutcome::Updated {
                old: "0.1.0".to_string(),
                new: VersionNumber::new(0, 2, 0),
            }
        );
        assert_eq!(
            fs::read_to_string(&target.path).unwrap(),
            "cmake_minimum_required(VERSION 3.21)\n\
             project(oiseau VERSION 0.2.0 LANGUAGES CXX)\n\
             set(FOO 0.1.0)\n"
        );
    }

    #[test]
    fn test_trailing_content_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let target = target_in(
            dir.path(),
            TargetKind::PythonInit,
            Some("__version__ = \"0.1.0\"  # managed by release tool\n"),
        );

        update_version_in_file(&target, &VersionNumber::new(0, 1, 1), false).unwrap();

        assert_eq!(
            fs::read_to_string(&target.path).unwrap(),
            "__version__ = \"0.1.1\"  # managed by release tool\n"
        );
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let target = target_in(
            dir.path(),
            TargetKind::PyProject,
            Some("[project]\nversion = \"1.0.0\"\n"),
        );
        let version = VersionNumber::new(1, 1, 0);

        update_version_in_file(&target, &version, false).unwrap();
        let after_first = fs::read(&target.path).unwrap();

        let outcome = update_version_in_file(&target, &version, false).unwrap();

        assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::AlreadyCurrent));
        assert_eq!(fs::read(&target.path).unwrap(), after_first);
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let original = "[project]\nversion = \"1.0.0\"\n";
        let target = target_in(dir.path(), TargetKind::PyProject, Some(original));

        let outcome = update_version_in_file(&target, &VersionNumber::new(2, 0, 0), true).unwrap();

        assert!(matches!(outcome, UpdateOutcome::WouldUpdate { ref old, .. } if old == "1.0.0"));
        assert_eq!(fs::read_to_string(&target.path).unwrap(), original);
    }

    #[cfg(unix)]
    #[test]
    fn test_permissions_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = target_in(
            dir.path(),
            TargetKind::PythonInit,
            Some("__version__ = \"0.1.0\"\n"),
        );
        fs::set_permissions(&target.path, fs::Permissions::from_mode(0o600)).unwrap();

        update_version_in_file(&target, &VersionNumber::new(0, 2, 0), false).unwrap();

        let mode = fs::metadata(&target.path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_non_utf8_content_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let target = TargetFile::new(dir.path(), TargetKind::CMake);
        fs::write(
            &target.path,
            b"# Autor: Jos\xe9\nproject(oiseau VERSION 0.3.1 LANGUAGES CXX)\n# fin \xff\n",
        )
        .unwrap();

        let outcome = update_version_in_file(&target, &VersionNumber::new(0, 4, 0), false).unwrap();

        assert!(matches!(outcome, UpdateOutcome::Updated { ref old, .. } if old == "0.3.1"));
        assert_eq!(
            fs::read(&target.path).unwrap(),
            b"# Autor: Jos\xe9\nproject(oiseau VERSION 0.4.0 LANGUAGES CXX)\n# fin \xff\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_file_is_updated_through_link() {
        let dir = tempfile::tempdir().unwrap();
        let target = TargetFile::new(dir.path(), TargetKind::PythonInit);
        let real = dir.path().join("real_init.py");
        fs::write(&real, "__version__ = \"0.3.1\"\n").unwrap();
        fs::create_dir_all(target.path.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&real, &target.path).unwrap();

        update_version_in_file(&target, &VersionNumber::new(0, 4, 0), false).unwrap();

        assert!(fs::symlink_metadata(&target.path).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "__version__ = \"0.4.0\"\n");
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = TargetFile::new(dir.path(), TargetKind::CMake);
        // A directory where the file should be cannot be read as text.
        fs::create_dir_all(&target.path).unwrap();

        let err = update_version_in_file(&target, &VersionNumber::new(1, 0, 0), false).unwrap_err();

        assert!(matches!(err, ReleaseError::FileAccess { .. }));
    }
}
