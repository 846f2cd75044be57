//! Host metrics backed by `sysinfo`, `/proc/meminfo` and `statvfs(2)`

use std::path::Path;

use sysinfo::System;

use super::{disk, MetricsSource, RawDiskUsage, RawMemory};
use crate::error::{CollectorError, CollectorResult};

/// Kernel memory counters in bytes, as listed in `/proc/meminfo`
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MeminfoCounters {
    pub total: u64,
    pub free: u64,
    pub buffers: u64,
    pub cached: u64,
    pub s_reclaimable: u64,
}

impl MeminfoCounters {
    /// Memory held by processes: `total - free - buffers - (cached + reclaimable slab)`.
    ///
    /// When the cache counters exceed the non-free memory, as seen inside
    /// some containers, this falls back to `total - free`.
    pub(crate) fn used_bytes(&self) -> u64 {
        let not_free = self.total.saturating_sub(self.free);
        let cache = self.buffers + self.cached + self.s_reclaimable;
        not_free.checked_sub(cache).unwrap_or(not_free)
    }
}

#[cfg(target_os = "linux")]
fn kernel_used_bytes(_sys: &System) -> CollectorResult<u64> {
    use procfs::{Current, Meminfo};

    let meminfo = Meminfo::current().map_err(|e| CollectorError::MemoryUnavailable {
        reason: format!("reading /proc/meminfo: {e}"),
    })?;

    let counters = MeminfoCounters {
        total: meminfo.mem_total,
        free: meminfo.mem_free,
        buffers: meminfo.buffers,
        cached: meminfo.cached,
        s_reclaimable: meminfo.s_reclaimable.unwrap_or(0),
    };
    Ok(counters.used_bytes())
}

#[cfg(not(target_os = "linux"))]
fn kernel_used_bytes(sys: &System) -> CollectorResult<u64> {
    Ok(sys.used_memory())
}

/// Reads live counters from the running host
#[derive(Debug, Default, Clone, Copy)]
pub struct HostMetrics;

impl HostMetrics {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsSource for HostMetrics {
    fn memory(&self) -> CollectorResult<RawMemory> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(CollectorError::MemoryUnavailable {
                reason: "platform not supported by sysinfo".to_string(),
            });
        }

        let mut sys = System::new();
        sys.refresh_memory();

        let total_bytes = sys.total_memory();
        if total_bytes == 0 {
            return Err(CollectorError::MemoryUnavailable {
                reason: "kernel reported zero total memory".to_string(),
            });
        }

        Ok(RawMemory {
            total_bytes,
            used_bytes: kernel_used_bytes(&sys)?,
            available_bytes: sys.available_memory(),
            swap_total_bytes: sys.total_swap(),
            swap_used_bytes: sys.used_swap(),
        })
    }

    fn disk_usage(&self, path: &Path) -> CollectorResult<Option<RawDiskUsage>> {
        disk::filesystem_usage(path)
    }
}
