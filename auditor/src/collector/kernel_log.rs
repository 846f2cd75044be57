//! Kernel ring-buffer log via `journalctl`

use std::process::Command;

use tracing::debug;

use super::KernelLogSource;
use crate::error::{KernelLogError, KernelLogResult};

/// Runs `journalctl --since <window> -k --no-pager`
#[derive(Debug, Clone)]
pub struct Journalctl {
    program: String,
}

impl Default for Journalctl {
    fn default() -> Self {
        Self {
            program: "journalctl".to_string(),
        }
    }
}

impl Journalctl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different executable with the same arguments
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl KernelLogSource for Journalctl {
    fn fetch(&self, since: &str) -> KernelLogResult<String> {
        debug!("Running {} --since '{}' -k --no-pager", self.program, since);

        let output = Command::new(&self.program)
            .args(["--since", since, "-k", "--no-pager"])
            .output()
            .map_err(|source| KernelLogError::Spawn {
                command: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(KernelLogError::CommandFailed {
                command: self.program.clone(),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Lines containing any keyword (case-insensitive), keeping the last `max_lines`
/// in their original order.
pub fn filter_indicators(text: &str, keywords: &[String], max_lines: usize) -> Vec<String> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let matches: Vec<&str> = text
        .lines()
        .filter(|line| {
            let line = line.to_lowercase();
            keywords.iter().any(|k| line.contains(k.as_str()))
        })
        .collect();

    let skip = matches.len().saturating_sub(max_lines);
    matches[skip..].iter().map(|line| line.to_string()).collect()
}
