use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use super::ReportSink;
use crate::error::SinkResult;
use crate::report::AuditReport;

/// Full report as pretty-printed JSON, overwriting the previous file
#[derive(Debug, Clone)]
pub struct JsonSink {
    path: PathBuf,
}

impl JsonSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for JsonSink {
    fn name(&self) -> &'static str {
        "json"
    }

    fn persist(&self, report: &AuditReport) -> SinkResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        report.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        info!("Wrote JSON report to {}", self.path.display());
        Ok(())
    }
}
