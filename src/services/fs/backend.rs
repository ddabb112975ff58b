use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Represents one raw directory entry as returned by a listing
///
/// `entry_type` is the type of the entry itself, without following
/// symlinks. Use `FsBackend::metadata` to learn what a link points at.
#[derive(Debug, Clone)]
pub struct FsEntry {
    pub path: PathBuf,
    pub name: String,
    pub entry_type: FsEntryType,
}

impl FsEntry {
    pub fn new(path: PathBuf, name: String, entry_type: FsEntryType) -> Self {
        Self {
            path,
            name,
            entry_type,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == FsEntryType::Directory
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == FsEntryType::File
    }

    pub fn is_symlink(&self) -> bool {
        self.entry_type == FsEntryType::Symlink
    }
}

/// Type of filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FsEntryType {
    File,
    Directory,
    Symlink,
    /// Sockets, FIFOs, devices, or anything the platform can't classify
    Other,
}

/// Metadata about a filesystem entry, with symlinks followed
#[derive(Debug, Clone)]
pub struct FsMetadata {
    pub file_type: FsEntryType,
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub is_executable: bool,
}

impl FsMetadata {
    pub fn new(file_type: FsEntryType) -> Self {
        Self {
            file_type,
            size: 0,
            modified: None,
            is_executable: false,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_modified(mut self, modified: SystemTime) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn with_executable(mut self, executable: bool) -> Self {
        self.is_executable = executable;
        self
    }
}

/// Filesystem backend trait
///
/// Abstracts the directory-listing and stat primitives the tree model needs,
/// so the model can run against the local disk or a test double. All calls
/// are synchronous and complete on the calling thread.
pub trait FsBackend: Send + Sync {
    /// List entries in a directory (non-recursive)
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read (permission denied,
    /// doesn't exist, not a directory, etc.)
    fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>>;

    /// Stat a path, following symlinks
    fn metadata(&self, path: &Path) -> io::Result<FsMetadata>;

    /// Read the raw target text of a symlink
    fn read_link(&self, path: &Path) -> io::Result<PathBuf>;

    /// Get canonical (absolute, normalized) path
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;

    /// Returns false if the path doesn't exist or is not a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns false if the path doesn't exist or is not a regular file.
    fn is_file(&self, path: &Path) -> bool;
}
