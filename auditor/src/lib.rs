//! hostaudit core library
//!
//! Performs a point-in-time audit of a host's memory, swap and disk usage:
//! collects counters from the OS and kernel log indicators from journald,
//! classifies risk against fixed thresholds, derives capacity
//! recommendations and analysis sentences, and persists the resulting
//! [`AuditReport`] to an SQLite history, a JSON file and a CSV file.
//!
//! ```no_run
//! use hostaudit_auditor::{AuditConfig, AuditPipeline};
//!
//! let pipeline = AuditPipeline::new(AuditConfig::default())?;
//! let report = pipeline.run()?;
//! println!("risk: {}", report.risk.join(","));
//! # Ok::<(), hostaudit_auditor::AuditError>(())
//! ```

pub mod analysis;
pub mod collector;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod recommend;
pub mod report;
pub mod risk;
pub mod sink;

// Re-export commonly used types
pub use analysis::analyze;
pub use collector::{HostMetrics, Journalctl, KernelLogSource, MetricsSource, RawDiskUsage, RawMemory};
pub use config::{AuditConfig, KernelLogConfig, OutputConfig, ScalingConfig, Thresholds};
pub use error::{AuditError, CollectorError, ConfigError, KernelLogError, Result, SinkError};
pub use model::{DiskEntry, DiskSnapshot, DiskUsage, MemorySnapshot, OrderedMap};
pub use pipeline::AuditPipeline;
pub use recommend::{recommend, DiskRecommendation, DiskRecommendations, JournaldLimits, Recommendations};
pub use report::AuditReport;
pub use risk::{classify_risk, RiskTag, RiskTags};
pub use sink::{CsvSink, JsonSink, ReportSink, SqliteSink};
