//! The assembled audit report

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::model::{DiskSnapshot, MemorySnapshot};
use crate::recommend::Recommendations;
use crate::risk::RiskTags;

/// Everything produced by one audit run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Local time of the run, ISO-8601 without offset
    pub timestamp: String,

    #[serde(rename = "risk_level")]
    pub risk: RiskTags,

    pub analysis: Vec<String>,

    pub memory: MemorySnapshot,

    pub disks: DiskSnapshot,

    pub recommendations: Recommendations,

    pub log_indicators: Vec<String>,
}

/// Current local time formatted like `2024-05-01T13:37:00.123456`
pub fn timestamp_now() -> String {
    Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

impl AuditReport {
    /// Flattened `(metric, value)` view: memory scalars, then the used
    /// percentage of each mount that resolved
    pub fn metric_rows(&self) -> Vec<(String, f64)> {
        let mut rows: Vec<(String, f64)> = self
            .memory
            .metrics()
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();

        rows.extend(
            self.disks
                .usages()
                .map(|(mount, usage)| (format!("disk_used_pct:{mount}"), usage.used_pct)),
        );

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ScalingConfig, Thresholds};
    use crate::model::{DiskEntry, DiskUsage};
    use crate::recommend::recommend;
    use crate::risk::classify_risk;

    fn sample() -> AuditReport {
        let memory = MemorySnapshot {
            mem_total_gb: 16.78,
            mem_used_gb: 9.12,
            mem_used_pct: 61.3,
            swap_total_gb: 2.15,
            swap_used_pct: 12.4,
        };
        let mut disks = DiskSnapshot::new();
        disks.insert(
            "/",
            DiskEntry::Usage(DiskUsage {
                total_gb: 245.11,
                used_gb: 201.93,
                used_pct: 86.9,
            }),
        );
        disks.insert("/home", DiskEntry::missing());

        let thresholds = Thresholds::default();
        let risk = classify_risk(&memory, &disks, &thresholds);
        let recommendations = recommend(&memory, &disks, &thresholds, &ScalingConfig::default());

        AuditReport {
            timestamp: "2024-05-01T13:37:00.123456".to_string(),
            risk,
            analysis: vec!["Partition / is above 80% usage.".to_string()],
            memory,
            disks,
            recommendations,
            log_indicators: vec!["kernel: Out of memory: Killed process 1".to_string()],
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let report = sample();
        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: AuditReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["risk_level"][0], "DISK_CRITICAL:/");
        assert_eq!(json["memory"]["mem_used_pct"], 61.3);
        assert_eq!(json["disks"]["/home"]["error"], "mount not found");
        assert!(json["recommendations"]["disk_recommendations"]["/"].is_object());
        assert_eq!(json["log_indicators"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_metric_rows_skip_missing_mounts() {
        let rows = sample().metric_rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], ("mem_total_gb".to_string(), 16.78));
        assert_eq!(rows[4], ("swap_used_pct".to_string(), 12.4));
        assert_eq!(rows[5], ("disk_used_pct:/".to_string(), 86.9));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }
}
