//! Slow filesystem backend for testing
//!
//! This module provides a decorator around any FsBackend that adds
//! configurable delays and counts every call. The delays simulate slow
//! disks or network mounts; the counters let tests assert how often the
//! tree model actually touched the filesystem.

use super::backend::{FsBackend, FsEntry, FsMetadata};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Configuration for slow filesystem simulation
#[derive(Debug, Clone)]
pub struct SlowFsConfig {
    /// Delay for read_dir operations
    pub read_dir_delay: Duration,
    /// Delay for metadata operations
    pub metadata_delay: Duration,
    /// Delay for exists/is_dir/is_file checks
    pub check_delay: Duration,
    /// Delay for read_link and canonicalize operations
    pub link_delay: Duration,
}

impl SlowFsConfig {
    /// Create a config with uniform delay for all operations
    pub fn uniform(delay: Duration) -> Self {
        Self {
            read_dir_delay: delay,
            metadata_delay: delay,
            check_delay: delay,
            link_delay: delay,
        }
    }

    /// Create a config with no delays (useful as a baseline)
    pub fn none() -> Self {
        Self::uniform(Duration::ZERO)
    }
}

impl Default for SlowFsConfig {
    fn default() -> Self {
        Self::none()
    }
}

/// Metrics tracking for filesystem operations
#[derive(Debug, Clone, Default)]
pub struct BackendMetrics {
    pub read_dir_calls: usize,
    pub metadata_calls: usize,
    pub read_link_calls: usize,
    pub canonicalize_calls: usize,
    /// exists, is_dir and is_file calls
    pub check_calls: usize,
    /// Total time spent in artificial delays
    pub total_delay_time: Duration,
}

impl BackendMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Get total number of filesystem calls
    pub fn total_calls(&self) -> usize {
        self.read_dir_calls
            + self.metadata_calls
            + self.read_link_calls
            + self.canonicalize_calls
            + self.check_calls
    }
}

/// Slow filesystem backend wrapper for testing
///
/// Wraps any FsBackend implementation and adds configurable delays to each
/// operation. Also tracks metrics about operation counts and timing.
pub struct SlowFsBackend {
    inner: Arc<dyn FsBackend>,
    config: SlowFsConfig,
    metrics: Arc<Mutex<BackendMetrics>>,
}

impl SlowFsBackend {
    pub fn new(inner: Arc<dyn FsBackend>, config: SlowFsConfig) -> Self {
        Self {
            inner,
            config,
            metrics: Arc::new(Mutex::new(BackendMetrics::new())),
        }
    }

    /// Wrap a backend without adding any delay, only counting calls
    pub fn counting(inner: Arc<dyn FsBackend>) -> Self {
        Self::new(inner, SlowFsConfig::none())
    }

    /// Get a snapshot of current metrics
    pub fn metrics(&self) -> BackendMetrics {
        self.lock_metrics().clone()
    }

    pub fn reset_metrics(&self) {
        self.lock_metrics().reset();
    }

    fn lock_metrics(&self) -> MutexGuard<'_, BackendMetrics> {
        // Metrics stay usable even if a panicking test poisoned the lock
        self.metrics.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn add_delay(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
            self.lock_metrics().total_delay_time += delay;
        }
    }
}

impl FsBackend for SlowFsBackend {
    fn read_dir(&self, path: &Path) -> io::Result<Vec<FsEntry>> {
        self.add_delay(self.config.read_dir_delay);
        self.lock_metrics().read_dir_calls += 1;
        self.inner.read_dir(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<FsMetadata> {
        self.add_delay(self.config.metadata_delay);
        self.lock_metrics().metadata_calls += 1;
        self.inner.metadata(path)
    }

    fn read_link(&self, path: &Path) -> io::Result<PathBuf> {
        self.add_delay(self.config.link_delay);
        self.lock_metrics().read_link_calls += 1;
        self.inner.read_link(path)
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.add_delay(self.config.link_delay);
        self.lock_metrics().canonicalize_calls += 1;
        self.inner.canonicalize(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.add_delay(self.config.check_delay);
        self.lock_metrics().check_calls += 1;
        self.inner.exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.add_delay(self.config.check_delay);
        self.lock_metrics().check_calls += 1;
        self.inner.is_dir(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.add_delay(self.config.check_delay);
        self.lock_metrics().check_calls += 1;
        self.inner.is_file(path)
    }
}
