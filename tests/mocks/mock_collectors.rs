use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use hostaudit_auditor::collector::{KernelLogSource, MetricsSource, RawDiskUsage, RawMemory};
use hostaudit_auditor::error::{CollectorResult, KernelLogResult};
use hostaudit_auditor::{CollectorError, KernelLogError};

const GB: u64 = 1_000_000_000;

fn used_of(total: u64, pct: f64) -> u64 {
    (total as f64 * pct / 100.0).round() as u64
}

#[derive(Debug, Clone)]
enum MockDisk {
    Usage(RawDiskUsage),
    Error,
}

/// Scripted host: memory, swap and a fixed set of mounts.
///
/// Mounts that were never added behave like paths that do not exist.
#[derive(Debug, Clone)]
pub struct MockMetricsSource {
    memory: RawMemory,
    disks: Vec<(String, MockDisk)>,
    memory_unavailable: bool,
}

impl Default for MockMetricsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMetricsSource {
    /// 16 GB of RAM at 40%, 4 GB of idle swap, no mounts
    pub fn new() -> Self {
        Self {
            memory: RawMemory {
                total_bytes: 0,
                used_bytes: 0,
                available_bytes: 0,
                swap_total_bytes: 0,
                swap_used_bytes: 0,
            },
            disks: Vec::new(),
            memory_unavailable: false,
        }
        .with_memory(16, 40.0)
        .with_swap(4, 0.0)
    }

    /// Host with `/`, `/var` and `/home` all at `pct`
    pub fn uniform(pct: f64) -> Self {
        Self::new()
            .with_disk("/", 250, pct)
            .with_disk("/var", 50, pct)
            .with_disk("/home", 500, pct)
    }

    pub fn with_memory(mut self, total_gb: u64, used_pct: f64) -> Self {
        let total = total_gb * GB;
        let used = used_of(total, used_pct);
        self.memory.total_bytes = total;
        self.memory.used_bytes = used;
        self.memory.available_bytes = total - used;
        self
    }

    pub fn with_swap(mut self, total_gb: u64, used_pct: f64) -> Self {
        let total = total_gb * GB;
        self.memory.swap_total_bytes = total;
        self.memory.swap_used_bytes = used_of(total, used_pct);
        self
    }

    /// Add or replace a mount with no reserved blocks
    pub fn with_disk(mut self, mount: &str, total_gb: u64, used_pct: f64) -> Self {
        let total = total_gb * GB;
        let used = used_of(total, used_pct);
        self.set(
            mount,
            MockDisk::Usage(RawDiskUsage {
                total_bytes: total,
                used_bytes: used,
                available_bytes: total - used,
            }),
        );
        self
    }

    /// Make statistics for `mount` fail with an I/O error other than "not found"
    pub fn with_disk_error(mut self, mount: &str) -> Self {
        self.set(mount, MockDisk::Error);
        self
    }

    pub fn without_disk(mut self, mount: &str) -> Self {
        self.disks.retain(|(m, _)| m != mount);
        self
    }

    pub fn with_memory_unavailable(mut self) -> Self {
        self.memory_unavailable = true;
        self
    }

    fn set(&mut self, mount: &str, disk: MockDisk) {
        match self.disks.iter_mut().find(|(m, _)| m == mount) {
            Some(slot) => slot.1 = disk,
            None => self.disks.push((mount.to_string(), disk)),
        }
    }
}

impl MetricsSource for MockMetricsSource {
    fn memory(&self) -> CollectorResult<RawMemory> {
        if self.memory_unavailable {
            return Err(CollectorError::MemoryUnavailable {
                reason: "mock host has no memory statistics".to_string(),
            });
        }
        Ok(self.memory)
    }

    fn disk_usage(&self, path: &Path) -> CollectorResult<Option<RawDiskUsage>> {
        let found = self.disks.iter().find(|(m, _)| Path::new(m) == path);
        match found {
            Some((_, MockDisk::Usage(usage))) => Ok(Some(*usage)),
            Some((mount, MockDisk::Error)) => Err(CollectorError::Filesystem {
                path: mount.clone(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            }),
            None => Ok(None),
        }
    }
}

#[derive(Debug, Clone)]
enum KernelLogReply {
    Text(String),
    Exit(i32),
}

/// Scripted kernel log that records every window it was asked for
#[derive(Debug, Clone)]
pub struct MockKernelLog {
    reply: KernelLogReply,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockKernelLog {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            reply: KernelLogReply::Text(text.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn empty() -> Self {
        Self::new("")
    }

    /// A log query that exits with `status`
    pub fn failing(status: i32) -> Self {
        Self {
            reply: KernelLogReply::Exit(status),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// `since` arguments received so far, shared across clones
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

impl KernelLogSource for MockKernelLog {
    fn fetch(&self, since: &str) -> KernelLogResult<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(since.to_string());
        }

        match &self.reply {
            KernelLogReply::Text(text) => Ok(text.clone()),
            KernelLogReply::Exit(status) => Err(KernelLogError::CommandFailed {
                command: "journalctl".to_string(),
                status: *status,
                stderr: "Failed to access the journal".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_counters() {
        let raw = MockMetricsSource::new().with_memory(32, 90.0).memory().unwrap();
        assert_eq!(raw.total_bytes, 32 * GB);
        assert_eq!(raw.used_bytes, 28_800_000_000);
        assert_eq!(raw.available_bytes, 3_200_000_000);
    }

    #[test]
    fn test_unknown_mount_is_missing() {
        let source = MockMetricsSource::uniform(10.0).without_disk("/home");
        assert!(source.disk_usage(Path::new("/home")).unwrap().is_none());
        assert!(source.disk_usage(Path::new("/var")).unwrap().is_some());
    }

    #[test]
    fn test_kernel_log_records_calls() {
        let log = MockKernelLog::empty();
        let shared = log.clone();
        log.fetch("7 days ago").unwrap();
        assert_eq!(shared.calls(), vec!["7 days ago".to_string()]);
    }
}
