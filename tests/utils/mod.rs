use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Deserialize;

use hostaudit_auditor::{AuditConfig, AuditPipeline, ReportSink};

use crate::mocks::{MockKernelLog, MockMetricsSource};

/// Pipeline over mock sources; `sinks` of `None` keeps the configured file sinks
pub fn pipeline_with(
    config: AuditConfig,
    metrics: MockMetricsSource,
    kernel_log: MockKernelLog,
    sinks: Option<Vec<Box<dyn ReportSink>>>,
) -> Result<AuditPipeline> {
    let pipeline = AuditPipeline::new(config)?
        .with_metrics_source(Box::new(metrics))
        .with_kernel_log_source(Box::new(kernel_log));

    Ok(match sinks {
        Some(sinks) => pipeline.with_sinks(sinks),
        None => pipeline,
    })
}

/// Kernel log text with `indicators` OOM lines interleaved with noise
pub fn kernel_log_text(indicators: usize, noise: usize) -> String {
    let mut text = String::new();
    for i in 0..indicators.max(noise) {
        if i < noise {
            text.push_str(&format!("May 01 10:{:02}:00 host kernel: usb 1-{}: new device\n", i % 60, i));
        }
        if i < indicators {
            text.push_str(&format!(
                "May 01 10:{:02}:01 host kernel: Out of memory: Killed process {} (worker)\n",
                i % 60,
                1000 + i
            ));
        }
    }
    text
}

/// One row of the `audits` table
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub timestamp: String,
    pub ram_used_pct: f64,
    pub swap_used_pct: f64,
    pub ram_total_gb: f64,
    pub disk_root_pct: Option<f64>,
    pub disk_var_pct: Option<f64>,
    pub disk_home_pct: Option<f64>,
    pub risk_level: String,
}

/// All history rows ordered by id
pub fn history_rows(db_path: &Path) -> Result<Vec<HistoryRow>> {
    let conn = Connection::open(db_path).with_context(|| format!("opening {}", db_path.display()))?;
    let mut stmt = conn.prepare(
        "SELECT timestamp, ram_used_pct, swap_used_pct, ram_total_gb,
                disk_root_pct, disk_var_pct, disk_home_pct, risk_level
         FROM audits ORDER BY id",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(HistoryRow {
                timestamp: row.get(0)?,
                ram_used_pct: row.get(1)?,
                swap_used_pct: row.get(2)?,
                ram_total_gb: row.get(3)?,
                disk_root_pct: row.get(4)?,
                disk_var_pct: row.get(5)?,
                disk_home_pct: row.get(6)?,
                risk_level: row.get(7)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// One data row of the CSV report
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CsvRow {
    pub timestamp: String,
    pub metric: String,
    pub value: f64,
}

pub fn csv_rows(csv_path: &Path) -> Result<Vec<CsvRow>> {
    let mut reader = csv::Reader::from_path(csv_path).with_context(|| format!("opening {}", csv_path.display()))?;
    let rows = reader.deserialize().collect::<std::result::Result<Vec<CsvRow>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_log_text_counts() {
        let text = kernel_log_text(3, 5);
        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().filter(|l| l.contains("Out of memory")).count(), 3);
    }
}
