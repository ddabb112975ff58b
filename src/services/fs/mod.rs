// Filesystem abstraction layer for pluggable file system access
//
// The tree model only ever talks to the filesystem through `FsBackend`, so
// tests can count or slow down calls and hosts can swap in other sources.

pub mod backend;
pub mod local;
pub mod slow;

pub use backend::{FsBackend, FsEntry, FsEntryType, FsMetadata};
pub use local::LocalFsBackend;
pub use slow::{BackendMetrics, SlowFsBackend, SlowFsConfig};
