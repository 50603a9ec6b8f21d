//! Secondary files that carry a copy of the release version.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::bytes::{Captures, Regex};

use crate::version::VersionNumber;

// Every pattern has three groups: prefix through the marker, the version, suffix.
// Unicode is off so files with non-UTF-8 bytes still match byte for byte.
static CMAKE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u)(project\s*\([^)]*?VERSION\s+)(\d+\.\d+\.\d+)([^)]*?\))")
        .expect("valid CMake version regex")
});

static PYPROJECT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m-u)^(version\s*=\s*")(\d+\.\d+\.\d+)(".*)"#)
        .expect("valid pyproject version regex")
});

static PYTHON_INIT_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m-u)^(__version__\s*=\s*")(\d+\.\d+\.\d+)(".*)"#)
        .expect("valid __init__.py version regex")
});

/// Capture group holding the version triple.
pub const VERSION_GROUP: usize = 2;

/// The kind of secondary file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    CMake,
    PyProject,
    PythonInit,
}

impl TargetKind {
    /// All kinds, in the order a release updates them.
    pub const ALL: [TargetKind; 3] = [
        TargetKind::CMake,
        TargetKind::PyProject,
        TargetKind::PythonInit,
    ];

    /// Location relative to the source directory.
    pub fn relative_path(self) -> PathBuf {
        match self {
            TargetKind::CMake => PathBuf::from("CMakeLists.txt"),
            TargetKind::PyProject => ["python", "pyproject.toml"].iter().collect(),
            TargetKind::PythonInit => ["python", "oiseau", "__init__.py"].iter().collect(),
        }
    }

    pub fn pattern(self) -> &'static Regex {
        match self {
            TargetKind::CMake => &CMAKE_VERSION,
            TargetKind::PyProject => &PYPROJECT_VERSION,
            TargetKind::PythonInit => &PYTHON_INIT_VERSION,
        }
    }

    /// Rebuild one match with `version` between the unchanged prefix and suffix.
    pub fn render_replacement(self, caps: &Captures<'_>, version: &VersionNumber) -> Vec<u8> {
        [&caps[1], version.to_string().as_bytes(), &caps[3]].concat()
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::CMake => write!(f, "CMake"),
            TargetKind::PyProject => write!(f, "pyproject.toml"),
            TargetKind::PythonInit => write!(f, "Python __init__.py"),
        }
    }
}

/// A secondary file resolved against a source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    pub kind: TargetKind,
    pub path: PathBuf,
}

impl TargetFile {
    pub fn new(source_path: &Path, kind: TargetKind) -> Self {
        Self {
            kind,
            path: source_path.join(kind.relative_path()),
        }
    }

    /// All secondary files under `source_path`.
    pub fn all(source_path: &Path) -> Vec<TargetFile> {
        TargetKind::ALL
            .iter()
            .map(|kind| TargetFile::new(source_path, *kind))
            .collect()
    }
}
