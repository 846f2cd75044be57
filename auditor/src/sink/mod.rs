//! Persistence sinks
//!
//! Each sink receives the finished report and writes its own view of it.
//! Sinks are independent: there is no transaction spanning them, and a
//! failure in one does not roll back the others.

mod csv_file;
mod history;
mod json_file;

use crate::config::OutputConfig;
use crate::error::SinkResult;
use crate::report::AuditReport;

pub use csv_file::CsvSink;
pub use history::SqliteSink;
pub use json_file::JsonSink;

/// A destination for audit reports
pub trait ReportSink {
    /// Short identifier used in logs and error messages
    fn name(&self) -> &'static str;

    fn persist(&self, report: &AuditReport) -> SinkResult<()>;
}

/// The relational history, JSON and CSV sinks, in that order
pub fn default_sinks(output: &OutputConfig) -> Vec<Box<dyn ReportSink>> {
    vec![
        Box::new(SqliteSink::new(&output.db_path)),
        Box::new(JsonSink::new(&output.json_path)),
        Box::new(CsvSink::new(&output.csv_path)),
    ]
}
