//! Release pipeline: validate the requested version and write it everywhere.
//!
//! The record file is the gate: nothing is written unless the new version is
//! strictly newer than the recorded one. After that the secondary files are
//! updated one by one. There is no rollback; if a later file fails, earlier
//! writes stay in place.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::error::ReleaseError;
use crate::record::{VersionFileInfo, read_version_file, write_version_file};
use crate::update::{TargetFile, UpdateOutcome, update_version_in_file};
use crate::version::VersionNumber;

/// Name of the record file inside the source directory.
pub const VERSION_FILE_NAME: &str = "version";

/// Configuration for a release run, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    pub source_path: PathBuf,
    pub new_version: VersionNumber,
    pub dry_run: bool,
}

/// Outcome of one secondary file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub target: TargetFile,
    pub outcome: UpdateOutcome,
}

/// What a release run did.
#[derive(Debug, Clone)]
pub struct ReleaseReport {
    pub version_file: PathBuf,
    /// The record found before the run, if any.
    pub previous: Option<VersionFileInfo>,
    /// The record written (or, in a dry run, that would have been written).
    pub written: VersionFileInfo,
    pub files: Vec<FileReport>,
}

impl ReleaseReport {
    /// Secondary files that were actually rewritten.
    pub fn updated_files(&self) -> impl Iterator<Item = &TargetFile> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, UpdateOutcome::Updated { .. }))
            .map(|f| &f.target)
    }
}

/// Run a release using today's local date.
pub fn run_release(config: &ReleaseConfig) -> Result<ReleaseReport, ReleaseError> {
    run_release_on(config, Local::now().date_naive())
}

/// Run a release with an explicit release date.
pub fn run_release_on(
    config: &ReleaseConfig,
    release_date: NaiveDate,
) -> Result<ReleaseReport, ReleaseError> {
    let version_file = config.source_path.join(VERSION_FILE_NAME);
    let targets = TargetFile::all(&config.source_path);
    debug!(
        "Resolved files: {} {:?}",
        version_file.display(),
        targets.iter().map(|t| t.path.display().to_string()).collect::<Vec<_>>()
    );

    let previous = read_version_file(&version_file)?;
    check_version_advances(&version_file, previous.as_ref(), &config.new_version)?;

    let written = VersionFileInfo {
        version: config.new_version,
        release_date,
    };

    if config.dry_run {
        println!(
            "  [DRY RUN] Would update '{}': version {}, date {}",
            version_file.display(),
            written.version,
            written.date_string()
        );
    } else {
        write_version_file(&version_file, &written)?;
    }

    let mut files = Vec::with_capacity(targets.len());
    for target in targets {
        let outcome = update_version_in_file(&target, &config.new_version, config.dry_run)?;
        print_outcome(&target, &outcome);
        files.push(FileReport { target, outcome });
    }

    Ok(ReleaseReport {
        version_file,
        previous,
        written,
        files,
    })
}

/// Require `new` to be strictly newer than the recorded version, if any.
fn check_version_advances(
    path: &Path,
    previous: Option<&VersionFileInfo>,
    new: &VersionNumber,
) -> Result<(), ReleaseError> {
    let Some(current) = previous else {
        info!(
            "Version file '{}' does not exist. Proceeding to create it with version '{}'.",
            path.display(),
            new
        );
        return Ok(());
    };

    info!(
        "Current version in '{}': {} (Release Date: {})",
        path.display(),
        current.version,
        current.date_string()
    );

    let ordering = new.cmp(&current.version);
    if ordering.is_le() {
        return Err(ReleaseError::VersionNotAdvancing {
            new: *new,
            current: current.version,
            path: path.to_path_buf(),
            ordering,
        });
    }

    info!(
        "New version '{}' is newer than current version '{}'. Proceeding.",
        new, current.version
    );
    Ok(())
}

fn print_outcome(target: &TargetFile, outcome: &UpdateOutcome) {
    match outcome {
        UpdateOutcome::Updated { old, new } => {
            println!("  [DONE] Updated {}: {} -> {}", target.kind, old, new);
        }
        UpdateOutcome::WouldUpdate { old, new } => {
            println!("  [DRY RUN] Would update {}: {} -> {}", target.kind, old, new);
        }
        UpdateOutcome::Skipped(reason) => {
            println!("  [SKIP] {} ({})", target.kind, reason);
        }
    }
}
