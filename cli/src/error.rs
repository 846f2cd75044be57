use hostaudit_auditor::AuditError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Audit(AuditError::Config(_)) => 2,
            CliError::Audit(AuditError::Collector(_)) => 3,
            CliError::Audit(AuditError::KernelLog(_)) => 4,
            CliError::Audit(AuditError::Sink { .. }) => 5,
            CliError::Io(_) => 6,
            CliError::Json(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Format error for user-friendly display
pub fn format_error(error: &CliError) -> String {
    match error {
        CliError::Audit(AuditError::KernelLog(e)) => {
            format!(
                "Kernel Log Error: {}\n\nThe audit reads the kernel log with journalctl. Make sure systemd-journald \
                 is running and that this user may read the system journal (for example as a member of the \
                 'systemd-journal' or 'adm' group).",
                e
            )
        }
        CliError::Audit(AuditError::Sink { sink, source }) => {
            format!(
                "Persistence Error ({}): {}\n\nCheck that the output directory exists and is writable, and that \
                 no other process is holding the audit history database.",
                sink, source
            )
        }
        CliError::Audit(AuditError::Collector(e)) => {
            format!("Collection Error: {}\n\nMemory or filesystem statistics could not be read from the host.", e)
        }
        CliError::Audit(AuditError::Config(e)) => {
            format!("Configuration Error: {}", e)
        }
        _ => format!("Error: {}", error),
    }
}
