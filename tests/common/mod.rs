//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Read a fixture file as a string.
pub fn read_fixture(path: PathBuf) -> String {
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// Fixed release date used by tests so outputs are deterministic.
pub fn release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

/// Relative paths of every file a release touches.
pub const PROJECT_FILES: [&str; 4] = [
    "version",
    "CMakeLists.txt",
    "python/pyproject.toml",
    "python/oiseau/__init__.py",
];

/// A source tree in a temp directory.
pub struct TestProject {
    pub dir: tempfile::TempDir,
}

impl TestProject {
    /// Create an empty source directory.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { dir }
    }

    /// Create a source directory populated with the fixture project at 0.3.1.
    pub fn from_fixture() -> Self {
        let project = Self::empty();
        for file in PROJECT_FILES {
            project.write(file, &read_fixture(fixtures_dir().join("project").join(file)));
        }
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write project file");
    }

    /// Read a file relative to the project root.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.dir.path().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.dir.path().join(relative).exists()
    }

    pub fn remove(&self, relative: &str) {
        fs::remove_file(self.dir.path().join(relative)).expect("Failed to remove project file");
    }

    /// Contents of every existing project file, for before/after comparisons.
    pub fn snapshot(&self) -> Vec<(String, Option<Vec<u8>>)> {
        PROJECT_FILES
            .iter()
            .map(|file| (file.to_string(), fs::read(self.dir.path().join(file)).ok()))
            .collect()
    }
}
