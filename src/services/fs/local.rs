use super::backend::{FsBackend, FsEntry, FsEntryType, FsMetadata};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filesystem backend over the local disk (`std::fs`)
#[derive(Debug, Default, Clone)]
pub struct LocalFsBackend;

impl LocalFsBackend {
    pub fn new() -> Self {
        Self
    }
}

fn entry_type_of(file_type: fs::FileType) -> FsEntryType {
    if file_type.is_symlink() {
        FsEntryType::Symlink
    } else if file_type.is_dir() {
        FsEntryType::Directory
    } else if file_type.is_file() {
        FsEntryType::File
    } else {
        FsEntryType::Other
    }
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    // S_IXUSR | S_IXGRP | S_IXOTH
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    false
}

impl FsBackend for LocalFsBackend {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(path)? {
            let dir_entry = match dir_entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry in {:?}: {}", path, e);
                    continue;
                }
            };
            // file_type() doesn't follow symlinks; a failure here means the
            // entry vanished, which classification will report as Broken
            let entry_type = dir_entry
                .file_type()
                .map(entry_type_of)
                .unwrap_or(FsEntryType::Other);
            entries.push(FsEntry::new(
                dir_entry.path(),
                dir_entry.file_name().to_string_lossy().into_owned(),
                entry_type,
            ));
        }
        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> io::Result<FsMetadata> {
        let metadata = fs::metadata(path)?;
        let mut result = FsMetadata::new(entry_type_of(metadata.file_type()))
            .with_size(metadata.len())
            .with_executable(is_executable(&metadata));
        if let Ok(modified) = metadata.modified() {
            result = result.with_modified(modified);
        }
        Ok(result)
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        fs::read_link(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_dir() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path();

        std_fs::write(temp_path.join("file1.txt"), "content1").unwrap();
        std_fs::create_dir(temp_path.join("subdir")).unwrap();
        std_fs::write(temp_path.join("subdir/nested.txt"), "nested").unwrap();

        let backend = LocalFsBackend::new();
        let entries = backend.read_dir(temp_path).unwrap();

        assert_eq!(entries.len(), 2);
        let file = entries.iter().find(|e| e.name == "file1.txt").unwrap();
        assert!(file.is_file());
        assert_eq!(file.path, temp_path.join("file1.txt"));
        let dir = entries.iter().find(|e| e.name == "subdir").unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_read_dir_missing() {
        let temp_dir = TempDir::new().unwrap();
        let backend = LocalFsBackend::new();
        assert!(backend.read_dir(&temp_dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        std_fs::write(&file_path, "test content").unwrap();

        let backend = LocalFsBackend::new();
        let metadata = backend.metadata(&file_path).unwrap();

        assert_eq!(metadata.file_type, FsEntryType::File);
        assert_eq!(metadata.size, 12);
        assert!(metadata.modified.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_executable_bit() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let script = temp_dir.path().join("run.sh");
        std_fs::write(&script, "#!/bin/sh\n").unwrap();

        let backend = LocalFsBackend::new();
        std_fs::set_permissions(&script, std_fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!backend.metadata(&script).unwrap().is_executable);

        std_fs::set_permissions(&script, std_fs::Permissions::from_mode(0o754)).unwrap();
        assert!(backend.metadata(&script).unwrap().is_executable);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_entry_type() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path();
        std_fs::write(temp_path.join("target.txt"), "x").unwrap();
        std::os::unix::fs::symlink("target.txt", temp_path.join("link.txt")).unwrap();

        let backend = LocalFsBackend::new();
        let entries = backend.read_dir(temp_path).unwrap();
        let link = entries.iter().find(|e| e.name == "link.txt").unwrap();

        assert!(link.is_symlink());
        assert_eq!(
            backend.metadata(&link.path).unwrap().file_type,
            FsEntryType::File
        );
        assert_eq!(
            backend.read_link(&link.path).unwrap(),
            PathBuf::from("target.txt")
        );
    }

    #[test]
    fn test_exists_is_dir_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = temp_dir.path();
        let file_path = temp_path.join("test.txt");

        let backend = LocalFsBackend::new();
        assert!(!backend.exists(&file_path));
        assert!(!backend.is_file(&file_path));

        std_fs::write(&file_path, "content").unwrap();

        assert!(backend.exists(&file_path));
        assert!(backend.is_file(&file_path));
        assert!(!backend.is_dir(&file_path));
        assert!(backend.is_dir(temp_path));
    }
}
