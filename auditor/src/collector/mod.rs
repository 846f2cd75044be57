//! Collection of host metrics and kernel log indicators
//!
//! The operating system is reached through two seams, [`MetricsSource`] and
//! [`KernelLogSource`], so the rest of the pipeline can run against fakes.
//! The free functions here turn raw counters into report snapshots.

mod disk;
mod kernel_log;
mod memory;

use std::path::Path;

use tracing::{debug, warn};

use crate::config::KernelLogConfig;
use crate::error::{CollectorResult, KernelLogResult};
use crate::model::{bytes_to_gb, round_to, DiskEntry, DiskSnapshot, DiskUsage, MemorySnapshot};

pub use kernel_log::{filter_indicators, Journalctl};
pub use memory::HostMetrics;

/// Raw memory and swap counters in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMemory {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    pub swap_total_bytes: u64,
    pub swap_used_bytes: u64,
}

/// Raw filesystem counters in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDiskUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    /// Space available to unprivileged users
    pub available_bytes: u64,
}

/// Source of memory and filesystem counters
pub trait MetricsSource {
    fn memory(&self) -> CollectorResult<RawMemory>;

    /// Usage of the filesystem holding `path`; `None` when the path does not exist
    fn disk_usage(&self, path: &Path) -> CollectorResult<Option<RawDiskUsage>>;
}

/// Source of raw kernel log text
pub trait KernelLogSource {
    fn fetch(&self, since: &str) -> KernelLogResult<String>;
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round_to(part as f64 / whole as f64 * 100.0, 1)
    }
}

impl From<RawMemory> for MemorySnapshot {
    fn from(raw: RawMemory) -> Self {
        // Percentages come from the byte counters, not from the rounded GB figures.
        MemorySnapshot {
            mem_total_gb: bytes_to_gb(raw.total_bytes),
            mem_used_gb: bytes_to_gb(raw.used_bytes),
            mem_used_pct: percent(raw.total_bytes.saturating_sub(raw.available_bytes), raw.total_bytes),
            swap_total_gb: bytes_to_gb(raw.swap_total_bytes),
            swap_used_pct: percent(raw.swap_used_bytes, raw.swap_total_bytes),
        }
    }
}

impl From<RawDiskUsage> for DiskUsage {
    fn from(raw: RawDiskUsage) -> Self {
        DiskUsage {
            total_gb: bytes_to_gb(raw.total_bytes),
            used_gb: bytes_to_gb(raw.used_bytes),
            used_pct: percent(raw.used_bytes, raw.used_bytes + raw.available_bytes),
        }
    }
}

/// Read current memory and swap usage
pub fn collect_memory(source: &dyn MetricsSource) -> CollectorResult<MemorySnapshot> {
    let raw = source.memory()?;
    let snapshot = MemorySnapshot::from(raw);
    debug!(
        "Memory: {} / {} GB ({}%), swap {}%",
        snapshot.mem_used_gb, snapshot.mem_total_gb, snapshot.mem_used_pct, snapshot.swap_used_pct
    );
    Ok(snapshot)
}

/// Read filesystem usage for each mount, in order.
///
/// A mount that does not exist is recorded with the missing-mount marker and
/// collection continues; any other failure aborts.
pub fn collect_disks(source: &dyn MetricsSource, mounts: &[String]) -> CollectorResult<DiskSnapshot> {
    let mut disks = DiskSnapshot::new();
    for mount in mounts {
        match source.disk_usage(Path::new(mount))? {
            Some(raw) => {
                let usage = DiskUsage::from(raw);
                debug!("Disk {}: {} / {} GB ({}%)", mount, usage.used_gb, usage.total_gb, usage.used_pct);
                disks.insert(mount.as_str(), DiskEntry::Usage(usage));
            }
            None => {
                warn!("Mount point not found: {}", mount);
                disks.insert(mount.as_str(), DiskEntry::missing());
            }
        }
    }
    Ok(disks)
}

/// Query the kernel log window and keep the most recent matching lines
pub fn collect_kernel_logs(source: &dyn KernelLogSource, config: &KernelLogConfig) -> KernelLogResult<Vec<String>> {
    let text = source.fetch(&config.since)?;
    let indicators = filter_indicators(&text, &config.keywords, config.max_lines);
    debug!("Kernel log: {} indicator line(s) since {}", indicators.len(), config.since);
    Ok(indicators)
}
