//! Human-readable analysis of an audit

use crate::model::DiskSnapshot;
use crate::risk::{RiskTag, RiskTags};

pub const MEMORY_PRESSURE: &str = "Memory pressure detected. The system is operating close to its limit, \
     with a risk of freezes and elevated latency.";

pub const ALL_CLEAR: &str = "The system is operating within acceptable parameters, with no signs of \
     near-lockup during the analyzed period.";

/// Warning sentence for a mount at or above `threshold` percent
pub fn disk_pressure(mount: &str, threshold: f64) -> String {
    format!(
        "Partition {mount} is above {threshold}% usage, which can cause write failures, \
         service lockups and overall degradation."
    )
}

/// Turn risk tags and disk pressure into analysis sentences.
///
/// Disk pressure is checked against the snapshot directly with
/// `disk_threshold`, independently of any `DISK_CRITICAL` tags. The result
/// is never empty.
pub fn analyze(risk: &RiskTags, disks: &DiskSnapshot, disk_threshold: f64) -> Vec<String> {
    let mut analysis = Vec::new();

    if risk.contains(&RiskTag::RamCritical) || risk.contains(&RiskTag::SwapCritical) {
        analysis.push(MEMORY_PRESSURE.to_string());
    }

    for (mount, usage) in disks.usages() {
        if usage.used_pct >= disk_threshold {
            analysis.push(disk_pressure(mount, disk_threshold));
        }
    }

    if analysis.is_empty() {
        analysis.push(ALL_CLEAR.to_string());
    }

    analysis
}
