use std::path::{Path, PathBuf};

use tracing::info;

use super::ReportSink;
use crate::error::SinkResult;
use crate::report::AuditReport;

/// Column names of the metric view
pub const CSV_HEADER: [&str; 3] = ["timestamp", "metric", "value"];

/// Flattened metric view: memory scalars plus per-mount used percentage.
/// Recommendations, analysis and log indicators are not written.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for CsvSink {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn persist(&self, report: &AuditReport) -> SinkResult<()> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(CSV_HEADER)?;

        let rows = report.metric_rows();
        for (metric, value) in &rows {
            let value = format!("{value:?}");
            writer.write_record([report.timestamp.as_str(), metric.as_str(), value.as_str()])?;
        }
        writer.flush()?;

        info!("Wrote {} metric row(s) to {}", rows.len(), self.path.display());
        Ok(())
    }
}
