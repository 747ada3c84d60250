//! Files and directories.
//!
//! `remove` only removes non-directories and `rmdir`/`rmdir_all` only remove
//! directories. Pointing them at the wrong kind of path returns `Ok(false)`
//! and leaves the path alone.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Mode given to files created by [`write_file`].
pub const FILE_MODE: u32 = 0o660;

/// Read a whole file as text. Invalid UTF-8 is replaced, not rejected.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::io("open", path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Create or truncate `path` and write `contents` to it.
pub fn write_file(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    use std::io::Write;

    let path = path.as_ref();
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path).map_err(|e| Error::io("open", path, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| Error::io("write", path, e))
}

pub fn rename(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let (from, to) = (from.as_ref(), to.as_ref());
    fs::rename(from, to).map_err(|source| Error::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Remove a file. Returns `Ok(false)` without touching anything when `path`
/// is a directory.
pub fn remove(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if is_dir(path)? {
        return Ok(false);
    }
    fs::remove_file(path).map_err(|e| Error::io("remove", path, e))?;
    Ok(true)
}

/// Set the permission bits of `path` to `mode`.
pub fn chmod(path: impl AsRef<Path>, mode: u32) -> Result<()> {
    let path = path.as_ref();
    let metadata = fs::metadata(path).map_err(|e| Error::io("chmod", path, e))?;
    let mut permissions = metadata.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(mode);
    }
    #[cfg(not(unix))]
    permissions.set_readonly(mode & 0o222 == 0);

    fs::set_permissions(path, permissions).map_err(|e| Error::io("chmod", path, e))
}

/// Create a single directory. The parent must exist.
pub fn mkdir(path: impl AsRef<Path>, mode: u32) -> Result<()> {
    create_dir(path.as_ref(), mode, false)
}

/// Create a directory and any missing parents, like `mkdir -p`.
pub fn mkdir_all(path: impl AsRef<Path>, mode: u32) -> Result<()> {
    create_dir(path.as_ref(), mode, true)
}

fn create_dir(path: &Path, mode: u32, recursive: bool) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path).map_err(|e| Error::io("mkdir", path, e))
}

/// Remove an empty directory. Returns `Ok(false)` when `path` is not a
/// directory.
pub fn rmdir(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !is_dir(path)? {
        return Ok(false);
    }
    fs::remove_dir(path).map_err(|e| Error::io("rmdir", path, e))?;
    Ok(true)
}

/// Remove a directory and everything below it. Returns `Ok(false)` when
/// `path` is not a directory.
pub fn rmdir_all(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if !is_dir(path)? {
        return Ok(false);
    }
    fs::remove_dir_all(path).map_err(|e| Error::io("rmdir", path, e))?;
    Ok(true)
}

/// Every path under `start`, `start` included, in lexical walk order.
///
/// The first unreadable entry aborts the walk.
pub fn find(start: impl AsRef<Path>) -> Result<Vec<String>> {
    let start = start.as_ref();
    WalkDir::new(start)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry
                .map(|entry| entry.path().to_string_lossy().into_owned())
                .map_err(|source| Error::Walk {
                    path: source.path().unwrap_or(start).to_path_buf(),
                    source,
                })
        })
        .collect()
}

/// Symlinks are not followed, so a link to a directory counts as a file.
fn is_dir(path: &Path) -> Result<bool> {
    fs::symlink_metadata(path)
        .map(|metadata| metadata.is_dir())
        .map_err(|e| Error::io("stat", path, e))
}
