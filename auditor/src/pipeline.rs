//! The audit pipeline: collect, classify, recommend, narrate, persist

use tracing::{info, warn};

use crate::analysis::analyze;
use crate::collector::{
    collect_disks, collect_kernel_logs, collect_memory, HostMetrics, Journalctl, KernelLogSource, MetricsSource,
};
use crate::config::AuditConfig;
use crate::error::{AuditError, Result};
use crate::recommend::recommend;
use crate::report::{timestamp_now, AuditReport};
use crate::risk::classify_risk;
use crate::sink::{default_sinks, ReportSink};

/// One-shot audit driver.
///
/// Stages run strictly in sequence. The first failing stage or sink aborts
/// the run; sinks that already wrote keep their output.
pub struct AuditPipeline {
    config: AuditConfig,
    metrics: Box<dyn MetricsSource>,
    kernel_log: Box<dyn KernelLogSource>,
    sinks: Vec<Box<dyn ReportSink>>,
}

impl AuditPipeline {
    /// Pipeline reading the live host and writing the default sinks
    pub fn new(config: AuditConfig) -> Result<Self> {
        config.validate()?;
        let sinks = default_sinks(&config.output);
        Ok(Self {
            config,
            metrics: Box::new(HostMetrics::new()),
            kernel_log: Box::new(Journalctl::new()),
            sinks,
        })
    }

    pub fn with_metrics_source(mut self, source: Box<dyn MetricsSource>) -> Self {
        self.metrics = source;
        self
    }

    pub fn with_kernel_log_source(mut self, source: Box<dyn KernelLogSource>) -> Self {
        self.kernel_log = source;
        self
    }

    pub fn with_sinks(mut self, sinks: Vec<Box<dyn ReportSink>>) -> Self {
        self.sinks = sinks;
        self
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Run the audit stamped with the current local time
    pub fn run(&self) -> Result<AuditReport> {
        self.run_at(timestamp_now())
    }

    /// Run the audit with a caller-supplied timestamp
    pub fn run_at(&self, timestamp: String) -> Result<AuditReport> {
        info!("Starting resource audit at {}", timestamp);

        let memory = collect_memory(self.metrics.as_ref())?;
        let disks = collect_disks(self.metrics.as_ref(), &self.config.mounts)?;
        let log_indicators = collect_kernel_logs(self.kernel_log.as_ref(), &self.config.kernel_log)?;
        if !log_indicators.is_empty() {
            warn!("Found {} kernel memory/storage indicator(s)", log_indicators.len());
        }

        let thresholds = &self.config.thresholds;
        let risk = classify_risk(&memory, &disks, thresholds);
        let recommendations = recommend(&memory, &disks, thresholds, &self.config.scaling);
        let analysis = analyze(&risk, &disks, thresholds.disk_analysis_pct);

        let report = AuditReport {
            timestamp,
            risk,
            analysis,
            memory,
            disks,
            recommendations,
            log_indicators,
        };
        info!("Risk level: {}", report.risk.join(","));

        self.persist(&report)?;
        Ok(report)
    }

    fn persist(&self, report: &AuditReport) -> Result<()> {
        for sink in &self.sinks {
            sink.persist(report).map_err(|e| AuditError::sink(sink.name(), e))?;
        }
        Ok(())
    }
}
