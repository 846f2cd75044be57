//! Error handling for the hostaudit core
//!
//! One error enum per concern: metric collection, kernel log retrieval,
//! configuration validation and sink persistence. `AuditError` is the
//! umbrella type returned by the pipeline.

use std::io;

use thiserror::Error;

/// The main error type for an audit run
#[derive(Error, Debug)]
pub enum AuditError {
    /// Memory, swap or filesystem statistics could not be read
    #[error("Collector error: {0}")]
    Collector(#[from] CollectorError),

    /// The kernel log query failed
    #[error("Kernel log error: {0}")]
    KernelLog(#[from] KernelLogError),

    /// The supplied configuration is not usable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A persistence sink rejected the report
    #[error("Sink '{sink}' failed: {source}")]
    Sink {
        sink: &'static str,
        #[source]
        source: SinkError,
    },
}

/// Metric collection errors
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Memory statistics unavailable: {reason}")]
    MemoryUnavailable { reason: String },

    #[error("Filesystem statistics for {path} failed: {source}")]
    Filesystem {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Kernel log retrieval errors
#[derive(Error, Debug)]
pub enum KernelLogError {
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{command} exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },
}

/// Configuration related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {field} = {value}")]
    InvalidValue { field: String, value: String },

    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },
}

/// Persistence sink errors
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AuditError>;

/// A specialized result type for collector operations
pub type CollectorResult<T> = std::result::Result<T, CollectorError>;

/// A specialized result type for kernel log operations
pub type KernelLogResult<T> = std::result::Result<T, KernelLogError>;

/// A specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// A specialized result type for sink operations
pub type SinkResult<T> = std::result::Result<T, SinkError>;

impl AuditError {
    /// Wrap a sink failure with the name of the sink that produced it
    pub fn sink(sink: &'static str, source: SinkError) -> Self {
        AuditError::Sink { sink, source }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AuditError::Collector(_) => "collector",
            AuditError::KernelLog(_) => "kernel_log",
            AuditError::Config(_) => "config",
            AuditError::Sink { .. } => "sink",
        }
    }
}
