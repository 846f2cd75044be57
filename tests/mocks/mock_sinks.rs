use std::io;
use std::sync::{Arc, Mutex};

use hostaudit_auditor::error::SinkResult;
use hostaudit_auditor::{AuditReport, ReportSink, SinkError};

/// Shared record of `(sink name, report)` in the order sinks were called
#[derive(Debug, Clone, Default)]
pub struct SinkJournal {
    entries: Arc<Mutex<Vec<(&'static str, AuditReport)>>>,
}

impl SinkJournal {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, name: &'static str, report: &AuditReport) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((name, report.clone()));
        }
    }

    /// Sink names in call order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries
            .lock()
            .map(|entries| entries.iter().map(|(name, _)| *name).collect())
            .unwrap_or_default()
    }

    pub fn reports(&self) -> Vec<AuditReport> {
        self.entries
            .lock()
            .map(|entries| entries.iter().map(|(_, report)| report.clone()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sink that keeps reports in memory
#[derive(Debug, Clone)]
pub struct MemorySink {
    name: &'static str,
    journal: SinkJournal,
}

impl MemorySink {
    pub fn new(name: &'static str, journal: &SinkJournal) -> Self {
        Self {
            name,
            journal: journal.clone(),
        }
    }

    /// Boxed in-memory stand-ins for the sqlite, json and csv sinks
    pub fn default_chain(journal: &SinkJournal) -> Vec<Box<dyn ReportSink>> {
        vec![
            Box::new(Self::new("sqlite", journal)),
            Box::new(Self::new("json", journal)),
            Box::new(Self::new("csv", journal)),
        ]
    }
}

impl ReportSink for MemorySink {
    fn name(&self) -> &'static str {
        self.name
    }

    fn persist(&self, report: &AuditReport) -> SinkResult<()> {
        self.journal.record(self.name, report);
        Ok(())
    }
}

/// Sink that always fails with a permission error
#[derive(Debug, Clone)]
pub struct FailingSink {
    name: &'static str,
}

impl FailingSink {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl ReportSink for FailingSink {
    fn name(&self) -> &'static str {
        self.name
    }

    fn persist(&self, _report: &AuditReport) -> SinkResult<()> {
        Err(SinkError::Io(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{} is read-only", self.name),
        )))
    }
}
