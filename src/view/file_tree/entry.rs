//! Listing and classification of one directory level
//!
//! Every raw entry returned by the backend becomes exactly one `Entry`,
//! whatever happens when it is stat'ed. The kind is decided once here and
//! never re-derived.

use super::format::{epoch_secs, format_size, format_time};
use crate::services::fs::{FsBackend, FsEntry, FsEntryType, FsMetadata};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Separator drawn between a link's name and its target
pub const LINK_ARROW: &str = " → ";

/// What a listed entry turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File(FileInfo),
    /// Symlink to a regular file; `target` is the raw link text
    FileLink { file: FileInfo, target: PathBuf },
    Directory,
    /// Symlink to a directory; `target` is the resolved destination
    DirectoryLink { target: PathBuf },
    /// Stat failed (dangling link, permission denied, vanished)
    Broken,
    /// Neither a directory nor a regular file
    Invalid,
}

/// Fields that only exist for regular files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub size: u64,
    pub extension: String,
    pub executable: bool,
}

/// Presentation marker standing in for the name color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStyle {
    Folder,
    File,
    Executable,
    Link,
    Error,
}

/// One filesystem object as shown in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    raw_name: String,
    /// Display name, possibly decorated with a trailing separator or link target
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Modification time in epoch seconds, 0 if unavailable
    pub modified: i64,
}

impl Entry {
    pub fn new(raw_name: String, path: PathBuf, kind: EntryKind, modified: i64) -> Self {
        let name = display_name(&raw_name, &kind);
        Self {
            raw_name,
            name,
            path,
            kind,
            modified,
        }
    }

    /// The unmodified filesystem name
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    pub fn is_dir(&self) -> bool {
        matches!(
            self.kind,
            EntryKind::Directory | EntryKind::DirectoryLink { .. }
        )
    }

    pub fn is_link(&self) -> bool {
        matches!(
            self.kind,
            EntryKind::FileLink { .. } | EntryKind::DirectoryLink { .. }
        )
    }

    fn file_info(&self) -> Option<&FileInfo> {
        match &self.kind {
            EntryKind::File(file) | EntryKind::FileLink { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Size in bytes, -1 for directories
    pub fn size_bytes(&self) -> i64 {
        if self.is_dir() {
            return -1;
        }
        self.file_info().map(|f| f.size as i64).unwrap_or(0)
    }

    pub fn size_display(&self) -> String {
        format_size(self.size_bytes())
    }

    pub fn mod_time_display(&self) -> String {
        format_time(self.modified)
    }

    pub fn extension(&self) -> &str {
        self.file_info().map(|f| f.extension.as_str()).unwrap_or("")
    }

    pub fn is_executable(&self) -> bool {
        self.file_info().is_some_and(|f| f.executable)
    }

    /// Text for the Type column
    pub fn type_label(&self) -> String {
        match &self.kind {
            EntryKind::Directory => "Folder".to_string(),
            EntryKind::DirectoryLink { .. } => "Folder Link".to_string(),
            EntryKind::File(file) => file_label(file).to_string(),
            EntryKind::FileLink { file, .. } => format!("{} Link", file_label(file)),
            EntryKind::Broken => "Broken".to_string(),
            EntryKind::Invalid => "Invalid".to_string(),
        }
    }

    pub fn style(&self) -> EntryStyle {
        match &self.kind {
            EntryKind::Directory => EntryStyle::Folder,
            EntryKind::File(file) if file.executable => EntryStyle::Executable,
            EntryKind::Broken | EntryKind::Invalid => EntryStyle::Error,
            _ if self.is_link() => EntryStyle::Link,
            _ => EntryStyle::File,
        }
    }
}

fn file_label(file: &FileInfo) -> &'static str {
    if file.executable {
        "File (Exec)"
    } else {
        "File"
    }
}

fn display_name(raw_name: &str, kind: &EntryKind) -> String {
    let sep = MAIN_SEPARATOR;
    match kind {
        EntryKind::Directory => format!("{}{}", raw_name.trim_end_matches(sep), sep),
        EntryKind::DirectoryLink { target } => {
            let target = target.to_string_lossy();
            format!(
                "{}{}{}{}{}",
                raw_name,
                sep,
                LINK_ARROW,
                target.trim_end_matches(sep),
                sep
            )
        }
        EntryKind::FileLink { target, .. } => {
            format!("{}{}{}", raw_name, LINK_ARROW, target.to_string_lossy())
        }
        _ => raw_name.to_string(),
    }
}

/// Lowercased text after the last '.', without the dot
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// List the immediate children of `path`, one `Entry` per child
///
/// Never descends into subdirectories. A failure to read the directory
/// itself yields an empty list.
pub fn list_entries(backend: &dyn FsBackend, path: &Path) -> Vec<Entry> {
    match backend.read_dir(path) {
        Ok(raw) => raw
            .into_iter()
            .map(|fs_entry| classify(backend, fs_entry))
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to list {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Decide the kind of one raw entry
pub fn classify(backend: &dyn FsBackend, fs_entry: FsEntry) -> Entry {
    let FsEntry {
        path,
        name,
        entry_type,
    } = fs_entry;
    let is_link = entry_type == FsEntryType::Symlink;

    let metadata = match backend.metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::debug!("Failed to stat {:?}: {}", path, e);
            return Entry::new(name, path, EntryKind::Broken, 0);
        }
    };
    let modified = epoch_secs(metadata.modified);

    let kind = match metadata.file_type {
        FsEntryType::Directory if is_link => EntryKind::DirectoryLink {
            target: resolve_dir_target(backend, &path),
        },
        FsEntryType::Directory => EntryKind::Directory,
        FsEntryType::File => {
            let file = file_info(&name, &metadata);
            if is_link {
                match backend.read_link(&path) {
                    Ok(target) => EntryKind::FileLink { file, target },
                    Err(e) => {
                        // Replaced by something else between stat and readlink
                        tracing::debug!("Failed to read link {:?}: {}", path, e);
                        EntryKind::File(file)
                    }
                }
            } else {
                EntryKind::File(file)
            }
        }
        FsEntryType::Symlink | FsEntryType::Other => {
            return Entry::new(name, path, EntryKind::Invalid, 0);
        }
    };

    Entry::new(name, path, kind, modified)
}

fn file_info(name: &str, metadata: &FsMetadata) -> FileInfo {
    FileInfo {
        size: metadata.size,
        extension: extension_of(name),
        executable: metadata.is_executable,
    }
}

fn resolve_dir_target(backend: &dyn FsBackend, path: &Path) -> PathBuf {
    backend
        .canonicalize(path)
        .or_else(|_| backend.read_link(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fs::LocalFsBackend;
    use std::fs as std_fs;
    use tempfile::TempDir;

    fn find<'a>(entries: &'a [Entry], name: &str) -> &'a Entry {
        entries
            .iter()
            .find(|e| e.raw_name() == name)
            .unwrap_or_else(|| panic!("{} not listed", name))
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("main.RS"), "rs");
        assert_eq!(extension_of("archive.tar.gz"), "gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of("trailing."), "");
    }

    #[test]
    fn test_link_style_wins_over_exec_bit() {
        let exec = FileInfo {
            size: 1,
            extension: String::new(),
            executable: true,
        };
        let link = Entry::new(
            "run".to_string(),
            PathBuf::from("/t/run"),
            EntryKind::FileLink {
                file: exec.clone(),
                target: PathBuf::from("bin/run"),
            },
            0,
        );
        let plain = Entry::new("run".to_string(), PathBuf::from("/t/run"), EntryKind::File(exec), 0);

        assert!(link.is_link());
        assert_eq!(link.style(), EntryStyle::Link);
        assert_eq!(link.type_label(), "File (Exec) Link");
        assert!(!plain.is_link());
        assert_eq!(plain.style(), EntryStyle::Executable);
    }

    #[test]
    fn test_lists_one_level_only() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        std_fs::create_dir(root.join("dir1")).unwrap();
        std_fs::write(root.join("dir1/inner.txt"), "inner").unwrap();
        std_fs::write(root.join("a.txt"), "a").unwrap();
        std_fs::write(root.join("b.md"), "b").unwrap();

        let entries = list_entries(&LocalFsBackend::new(), root);

        let mut names: Vec<_> = entries.iter().map(|e| e.raw_name().to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["a.txt", "b.md", "dir1"]);
        assert!(entries.iter().all(|e| e.path.parent() == Some(root)));
    }

    #[test]
    fn test_directory_fields() {
        let temp_dir = TempDir::new().unwrap();
        std_fs::create_dir(temp_dir.path().join("src")).unwrap();

        let entries = list_entries(&LocalFsBackend::new(), temp_dir.path());
        let dir = find(&entries, "src");

        assert_eq!(dir.kind, EntryKind::Directory);
        assert_eq!(dir.name, format!("src{}", MAIN_SEPARATOR));
        assert_eq!(dir.size_bytes(), -1);
        assert_eq!(dir.size_display(), "");
        assert_eq!(dir.extension(), "");
        assert_eq!(dir.type_label(), "Folder");
        assert_eq!(dir.style(), EntryStyle::Folder);
        assert_ne!(dir.modified, 0);
        assert!(!dir.mod_time_display().is_empty());
    }

    #[test]
    fn test_file_fields() {
        let temp_dir = TempDir::new().unwrap();
        std_fs::write(temp_dir.path().join("Notes.TXT"), vec![b'x'; 2048]).unwrap();

        let entries = list_entries(&LocalFsBackend::new(), temp_dir.path());
        let file = find(&entries, "Notes.TXT");

        assert_eq!(file.name, "Notes.TXT");
        assert_eq!(file.size_bytes(), 2048);
        assert_eq!(file.size_display(), "2.00 KB");
        assert_eq!(file.extension(), "txt");
        assert_eq!(file.type_label(), "File");
        assert_eq!(file.style(), EntryStyle::File);
        assert!(!file.is_executable());
    }

    #[test]
    fn test_missing_directory_yields_empty() {
        let temp_dir = TempDir::new().unwrap();
        let backend = LocalFsBackend::new();

        assert!(list_entries(&backend, &temp_dir.path().join("gone")).is_empty());

        let file = temp_dir.path().join("plain.txt");
        std_fs::write(&file, "x").unwrap();
        assert!(list_entries(&backend, &file).is_empty());
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::{symlink, PermissionsExt};

        #[test]
        fn test_executable_file() {
            let temp_dir = TempDir::new().unwrap();
            let script = temp_dir.path().join("build.sh");
            std_fs::write(&script, "#!/bin/sh\n").unwrap();
            std_fs::set_permissions(&script, std_fs::Permissions::from_mode(0o755)).unwrap();

            let entries = list_entries(&LocalFsBackend::new(), temp_dir.path());
            let entry = find(&entries, "build.sh");

            assert!(entry.is_executable());
            assert_eq!(entry.type_label(), "File (Exec)");
            assert_eq!(entry.style(), EntryStyle::Executable);
        }

        #[test]
        fn test_file_link_keeps_raw_target() {
            let temp_dir = TempDir::new().unwrap();
            let root = temp_dir.path();
            std_fs::write(root.join("real.txt"), "hello").unwrap();
            symlink("./real.txt", root.join("alias.txt")).unwrap();

            let entries = list_entries(&LocalFsBackend::new(), root);
            let link = find(&entries, "alias.txt");

            assert_eq!(
                link.kind,
                EntryKind::FileLink {
                    file: FileInfo {
                        size: 5,
                        extension: "txt".to_string(),
                        executable: false,
                    },
                    target: PathBuf::from("./real.txt"),
                }
            );
            assert_eq!(link.name, "alias.txt → ./real.txt");
            assert_eq!(link.raw_name(), "alias.txt");
            assert_eq!(link.type_label(), "File Link");
            assert_eq!(link.style(), EntryStyle::Link);
        }

        #[test]
        fn test_directory_link_shows_resolved_target() {
            let temp_dir = TempDir::new().unwrap();
            let root = temp_dir.path();
            std_fs::create_dir(root.join("real_dir")).unwrap();
            symlink("real_dir/", root.join("shortcut")).unwrap();

            let entries = list_entries(&LocalFsBackend::new(), root);
            let link = find(&entries, "shortcut");
            let resolved = std_fs::canonicalize(root.join("real_dir")).unwrap();

            assert_eq!(
                link.kind,
                EntryKind::DirectoryLink {
                    target: resolved.clone()
                }
            );
            assert_eq!(
                link.name,
                format!("shortcut/ → {}/", resolved.to_string_lossy())
            );
            assert!(link.is_dir());
            assert!(link.is_link());
            assert_eq!(link.style(), EntryStyle::Link);
            assert_eq!(link.size_display(), "");
            assert_eq!(link.type_label(), "Folder Link");
        }

        #[test]
        fn test_dangling_link_is_broken_but_listed() {
            let temp_dir = TempDir::new().unwrap();
            let root = temp_dir.path();
            symlink(root.join("nowhere"), root.join("dangling")).unwrap();
            std_fs::write(root.join("sibling.txt"), "still here").unwrap();

            let entries = list_entries(&LocalFsBackend::new(), root);
            assert_eq!(entries.len(), 2);

            let broken = find(&entries, "dangling");
            assert_eq!(broken.kind, EntryKind::Broken);
            assert_eq!(broken.name, "dangling");
            assert_eq!(broken.size_display(), "");
            assert_eq!(broken.mod_time_display(), "");
            assert_eq!(broken.style(), EntryStyle::Error);
            assert_eq!(broken.type_label(), "Broken");

            assert_eq!(find(&entries, "sibling.txt").size_bytes(), 10);
        }

        #[test]
        fn test_socket_is_invalid() {
            let temp_dir = TempDir::new().unwrap();
            let socket_path = temp_dir.path().join("app.sock");
            let _listener = std::os::unix::net::UnixListener::bind(&socket_path).unwrap();

            let entries = list_entries(&LocalFsBackend::new(), temp_dir.path());
            let invalid = find(&entries, "app.sock");

            assert_eq!(invalid.kind, EntryKind::Invalid);
            assert_eq!(invalid.extension(), "");
            assert_eq!(invalid.size_display(), "");
            assert_eq!(invalid.mod_time_display(), "");
            assert_eq!(invalid.style(), EntryStyle::Error);
        }
    }
}
