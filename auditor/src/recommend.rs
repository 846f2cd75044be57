//! Capacity recommendations
//!
//! RAM and per-mount disk targets are linear scalings of current usage,
//! rounded up to whole gigabytes. The journald retention policy is constant.

use serde::{Deserialize, Serialize};

use crate::config::{ScalingConfig, Thresholds};
use crate::model::{DiskSnapshot, MemorySnapshot, OrderedMap};

/// Suggested size for one mount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskRecommendation {
    pub current_total_gb: f64,
    pub recommended_total_gb: u64,
}

/// Disk recommendations keyed by mount, in snapshot order
pub type DiskRecommendations = OrderedMap<DiskRecommendation>;

/// journald retention limits included in every report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournaldLimits {
    #[serde(rename = "SystemMaxUse")]
    pub system_max_use: String,
    #[serde(rename = "SystemKeepFree")]
    pub system_keep_free: String,
    #[serde(rename = "RuntimeMaxUse")]
    pub runtime_max_use: String,
    #[serde(rename = "MaxFileSec")]
    pub max_file_sec: String,
}

impl Default for JournaldLimits {
    fn default() -> Self {
        Self {
            system_max_use: "500M".to_string(),
            system_keep_free: "1G".to_string(),
            runtime_max_use: "200M".to_string(),
            max_file_sec: "7day".to_string(),
        }
    }
}

impl JournaldLimits {
    /// `journald.conf` key/value pairs in display order
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("SystemMaxUse", self.system_max_use.as_str()),
            ("SystemKeepFree", self.system_keep_free.as_str()),
            ("RuntimeMaxUse", self.runtime_max_use.as_str()),
            ("MaxFileSec", self.max_file_sec.as_str()),
        ]
    }
}

/// Capacity-planning output of one audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub ram_gb_recommended: u64,
    pub disk_recommendations: DiskRecommendations,
    pub journald_limits: JournaldLimits,
}

fn ceil_gb(value: f64) -> u64 {
    value.ceil().max(0.0) as u64
}

/// Derive capacity targets from the current snapshot.
///
/// RAM: when usage is at or above `ram_recommend_pct`, size from used memory
/// times `ram_factor`; otherwise keep the installed total. Disk: used size
/// times `disk_factor` for every mount that resolved.
pub fn recommend(
    mem: &MemorySnapshot,
    disks: &DiskSnapshot,
    thresholds: &Thresholds,
    scaling: &ScalingConfig,
) -> Recommendations {
    let ram_gb_recommended = if mem.mem_used_pct >= thresholds.ram_recommend_pct {
        ceil_gb(mem.mem_used_gb * scaling.ram_factor)
    } else {
        ceil_gb(mem.mem_total_gb)
    };

    let mut disk_recommendations = DiskRecommendations::default();
    for (mount, usage) in disks.usages() {
        disk_recommendations.insert(
            mount,
            DiskRecommendation {
                current_total_gb: usage.total_gb,
                recommended_total_gb: ceil_gb(usage.used_gb * scaling.disk_factor),
            },
        );
    }

    Recommendations {
        ram_gb_recommended,
        disk_recommendations,
        journald_limits: JournaldLimits::default(),
    }
}
