//! Configuration for an audit run
//!
//! All values are compiled-in defaults; the CLI may only relocate the output
//! files. The three 80% comparisons (classifier disk threshold, recommender
//! RAM branch, narrator disk check) are separate fields and must not be
//! collapsed into one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Mount points audited when none are configured
pub const DEFAULT_MOUNTS: [&str; 3] = ["/", "/var", "/home"];

/// Kernel log keywords that indicate memory or storage distress
pub const DEFAULT_KEYWORDS: [&str; 6] = [
    "oom",
    "out of memory",
    "allocation failure",
    "enospc",
    "no space left",
    "memory pressure",
];

/// Main configuration structure for the audit pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Risk and recommendation thresholds
    pub thresholds: Thresholds,

    /// Capacity scaling factors
    pub scaling: ScalingConfig,

    /// Mount points to inspect, in report order
    pub mounts: Vec<String>,

    /// Output file locations
    pub output: OutputConfig,

    /// Kernel log query settings
    pub kernel_log: KernelLogConfig,
}

/// Percentage thresholds, each in `[0, 100]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Classifier: RAM usage at or above this is `RAM_CRITICAL`
    pub mem_used_pct: f64,

    /// Classifier: swap usage at or above this is `SWAP_CRITICAL`
    pub swap_used_pct: f64,

    /// Classifier: disk usage at or above this is `DISK_CRITICAL:<mount>`
    pub disk_used_pct: f64,

    /// Recommender: RAM usage at or above this sizes RAM from usage
    pub ram_recommend_pct: f64,

    /// Narrator: disk usage at or above this produces a warning sentence
    pub disk_analysis_pct: f64,
}

/// Multipliers applied to current usage when sizing capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingConfig {
    pub ram_factor: f64,
    pub disk_factor: f64,
}

/// Output file locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub json_path: PathBuf,
    pub csv_path: PathBuf,
    pub db_path: PathBuf,
}

/// Kernel log query configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelLogConfig {
    /// Window passed to `journalctl --since`
    pub since: String,

    /// Maximum number of matching lines kept (most recent last)
    pub max_lines: usize,

    /// Case-insensitive match keywords
    pub keywords: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            scaling: ScalingConfig::default(),
            mounts: DEFAULT_MOUNTS.iter().map(|m| m.to_string()).collect(),
            output: OutputConfig::default(),
            kernel_log: KernelLogConfig::default(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            mem_used_pct: 85.0,
            swap_used_pct: 60.0,
            disk_used_pct: 80.0,
            ram_recommend_pct: 80.0,
            disk_analysis_pct: 80.0,
        }
    }
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            ram_factor: 1.5,
            disk_factor: 1.4,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: PathBuf::from("audit_report.json"),
            csv_path: PathBuf::from("audit_report.csv"),
            db_path: PathBuf::from("audit_history.db"),
        }
    }
}

impl Default for KernelLogConfig {
    fn default() -> Self {
        Self {
            since: "7 days ago".to_string(),
            max_lines: 20,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl OutputConfig {
    /// Place all three output files inside `dir`, keeping their file names
    pub fn in_dir(dir: &Path) -> Self {
        let defaults = Self::default();
        Self {
            json_path: dir.join(defaults.json_path),
            csv_path: dir.join(defaults.csv_path),
            db_path: dir.join(defaults.db_path),
        }
    }
}

impl AuditConfig {
    /// Relocate the output files into `dir`
    pub fn with_output_dir(mut self, dir: &Path) -> Self {
        self.output = OutputConfig::in_dir(dir);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let pct_fields = [
            ("thresholds.mem_used_pct", self.thresholds.mem_used_pct),
            ("thresholds.swap_used_pct", self.thresholds.swap_used_pct),
            ("thresholds.disk_used_pct", self.thresholds.disk_used_pct),
            ("thresholds.ram_recommend_pct", self.thresholds.ram_recommend_pct),
            ("thresholds.disk_analysis_pct", self.thresholds.disk_analysis_pct),
        ];
        for (field, value) in pct_fields {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        for (field, value) in [
            ("scaling.ram_factor", self.scaling.ram_factor),
            ("scaling.disk_factor", self.scaling.disk_factor),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if self.mounts.is_empty() {
            return Err(ConfigError::MissingField {
                field: "mounts".to_string(),
            });
        }

        if self.kernel_log.max_lines == 0 {
            return Err(ConfigError::InvalidValue {
                field: "kernel_log.max_lines".to_string(),
                value: "0".to_string(),
            });
        }

        if self.kernel_log.keywords.is_empty() {
            return Err(ConfigError::MissingField {
                field: "kernel_log.keywords".to_string(),
            });
        }

        Ok(())
    }
}
