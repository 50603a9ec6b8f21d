//! Whole-file reads and rewrites shared by the record codec and the
//! secondary file updater.
//!
//! Existing files are rewritten in place so symlinks, ownership and
//! permission bits stay as they are. Only a file that does not exist yet is
//! created through a temp file and renamed into place.

use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Read a file as UTF-8 text, returning `Ok(None)` when it does not exist.
pub fn read_optional_string(path: &Path) -> io::Result<Option<String>> {
    not_found_as_none(fs::read_to_string(path))
}

/// Read a file as raw bytes, returning `Ok(None)` when it does not exist.
pub fn read_optional_bytes(path: &Path) -> io::Result<Option<Vec<u8>>> {
    not_found_as_none(fs::read(path))
}

fn not_found_as_none<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Permissions for files this tool creates: `rw-r--r--`.
#[cfg(unix)]
pub fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
pub fn new_file_permissions() -> Option<Permissions> {
    None
}

/// Overwrite an existing file in place, following symlinks.
pub fn rewrite_in_place(path: &Path, content: &[u8]) -> io::Result<()> {
    fs::write(path, content)
}

/// Write `content` to `path`.
///
/// An existing path (including a symlink, dangling or not) is written
/// through in place. A missing path is created atomically with
/// `new_permissions`.
pub fn write_file(path: &Path, content: &[u8], new_permissions: Option<Permissions>) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(_) => rewrite_in_place(path, content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => create_atomic(path, content, new_permissions),
        Err(e) => Err(e),
    }
}

/// Create `path` through a temp file in the same directory.
fn create_atomic(path: &Path, content: &[u8], permissions: Option<Permissions>) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    if let Some(permissions) = permissions {
        tmp.as_file().set_permissions(permissions)?;
    }
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
