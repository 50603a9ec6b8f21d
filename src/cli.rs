//! Command-line flags.
//!
//! The flags keep their historical single-dash spelling (`-new_version`,
//! `-sourcePath`). clap only knows `--long` flags, so arguments are
//! normalized before parsing.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use crate::error::ReleaseError;
use crate::release::ReleaseConfig;
use crate::version::VersionNumber;

const LONG_FLAGS: &[&str] = &["new_version", "sourcePath", "dry-run", "verbose", "help", "version"];

/// Long flags that consume the following argument as their value.
const VALUE_FLAGS: &[&str] = &["new_version", "sourcePath"];

/// Bump the release version in oiseau's version, CMake and Python files.
#[derive(Parser, Debug)]
#[command(name = "oiseau-release")]
#[command(about = "Bump the release version in oiseau's version, CMake and Python files")]
#[command(version)]
pub struct Cli {
    /// The new version number (e.g. 1.2.3) to write
    #[arg(long = "new_version", value_name = "X.Y.Z")]
    pub new_version: Option<String>,

    /// Base path of the project's source directory. 'version', 'CMakeLists.txt',
    /// 'python/pyproject.toml' and 'python/oiseau/__init__.py' are resolved
    /// relative to it.
    #[arg(long = "sourcePath", value_name = "DIR", default_value = ".")]
    pub source_path: PathBuf,

    /// Validate and report without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse flags from an argument list, accepting single-dash long flags.
    pub fn parse_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_flag_args(args))
    }

    /// Validate flags into a release configuration.
    pub fn into_config(self) -> Result<ReleaseConfig, ReleaseError> {
        let Some(raw) = self.new_version.filter(|v| !v.is_empty()) else {
            return Err(ReleaseError::MissingRequiredFlag {
                flag: "-new_version",
                usage: "oiseau-release -new_version <version_string> [-sourcePath <path>]".to_string(),
            });
        };

        let new_version = VersionNumber::parse(&raw)?;

        Ok(ReleaseConfig {
            source_path: self.source_path,
            new_version,
            dry_run: self.dry_run,
        })
    }
}

/// Rewrite `-flag` and `-flag=value` into `--flag` forms for known long flags.
///
/// The argument after a value flag (`-sourcePath -verbose`) is its value and
/// is never rewritten. Everything after a bare `--` is passed through
/// untouched.
pub fn normalize_flag_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    let mut value_next = false;
    let mut normalized = Vec::new();

    for arg in args {
        let arg: OsString = arg.into();
        if passthrough || value_next {
            value_next = false;
            normalized.push(arg);
            continue;
        }

        value_next = arg.to_str().is_some_and(takes_value);

        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(text) => text
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-') && is_long_flag(rest))
                .map(|_| OsString::from(format!("-{}", text))),
            None => None,
        };
        normalized.push(rewritten.unwrap_or(arg));
    }

    normalized
}

fn takes_value(arg: &str) -> bool {
    let name = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-'));
    name.is_some_and(|name| VALUE_FLAGS.contains(&name))
}

fn is_long_flag(arg: &str) -> bool {
    let name = arg.split_once('=').map_or(arg, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}
