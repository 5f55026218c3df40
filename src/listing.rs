//! Directory listing backend.
//!
//! The sidebar builder never calls `std::fs` directly. It asks a
//! [`DirectoryLister`] for the names in a folder and, per candidate entry,
//! whether that entry is a regular file. The split mirrors the two reads the
//! builder performs: one listing per folder, one stat per entry that
//! survives the name check.
//!
//! The production implementation is [`FsLister`]. Tests use
//! [`MemoryLister`](tests::MemoryLister), which hands back entries in
//! exactly the order they were registered. Real filesystems make no
//! ordering promise, and the builder preserves whatever order it is given.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

/// Read-only view of a directory tree.
pub trait DirectoryLister {
    /// Names of the immediate entries of `dir`, in backend order.
    fn list(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    /// Whether `path` is a regular file. Symlinks are followed.
    fn is_file(&self, path: &Path) -> io::Result<bool>;
}

/// Lists directories on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn is_file(&self, path: &Path) -> io::Result<bool> {
        Ok(fs::metadata(path)?.is_file())
    }
}
