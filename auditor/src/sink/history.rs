use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tracing::{debug, info};

use super::ReportSink;
use crate::error::{SinkError, SinkResult};
use crate::report::AuditReport;

const CREATE_AUDITS: &str = "
    CREATE TABLE IF NOT EXISTS audits (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT,
        ram_used_pct REAL,
        swap_used_pct REAL,
        ram_total_gb REAL,
        disk_root_pct REAL,
        disk_var_pct REAL,
        disk_home_pct REAL,
        risk_level TEXT
    )";

const INSERT_AUDIT: &str = "
    INSERT INTO audits (
        timestamp,
        ram_used_pct,
        swap_used_pct,
        ram_total_gb,
        disk_root_pct,
        disk_var_pct,
        disk_home_pct,
        risk_level
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";

/// Append-only audit history in SQLite.
///
/// The column set is fixed to `/`, `/var` and `/home` regardless of the
/// configured mount list; a mount that is absent or missing is stored as
/// NULL.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    path: PathBuf,
}

impl SqliteSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> SinkResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(CREATE_AUDITS)?;
        debug!("Audit history schema ready at {}", self.path.display());
        Ok(conn)
    }

    /// Create the `audits` table if it does not exist
    pub fn ensure_schema(&self) -> SinkResult<()> {
        close(self.open()?)
    }

    /// Number of rows in the history
    pub fn row_count(&self) -> SinkResult<i64> {
        let conn = self.open()?;
        let count = conn.query_row("SELECT COUNT(*) FROM audits", [], |row| row.get(0))?;
        close(conn)?;
        Ok(count)
    }
}

fn close(conn: Connection) -> SinkResult<()> {
    conn.close().map_err(|(_, err)| SinkError::from(err))
}

impl ReportSink for SqliteSink {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn persist(&self, report: &AuditReport) -> SinkResult<()> {
        let mut conn = self.open()?;

        // Dropping an uncommitted transaction rolls it back, so an early
        // return leaves the database unchanged and unlocked.
        let tx = conn.transaction()?;
        tx.execute(
            INSERT_AUDIT,
            params![
                report.timestamp,
                report.memory.mem_used_pct,
                report.memory.swap_used_pct,
                report.memory.mem_total_gb,
                report.disks.used_pct("/"),
                report.disks.used_pct("/var"),
                report.disks.used_pct("/home"),
                report.risk.join(","),
            ],
        )?;
        tx.commit()?;
        close(conn)?;

        info!("Appended audit to history {}", self.path.display());
        Ok(())
    }
}
