use console::Style;
use hostaudit_auditor::{AuditReport, Thresholds};
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;

const RED: u8 = 196;
const ORANGE: u8 = 208;
const YELLOW: u8 = 226;
const GREEN: u8 = 46;
const CYAN: u8 = 51;
const BLUE: u8 = 39;
const GRAY: u8 = 245;

/// Colour band for a usage percentage
pub fn pct_color(pct: f64) -> u8 {
    if pct >= 90.0 {
        RED
    } else if pct >= 80.0 {
        ORANGE
    } else if pct >= 70.0 {
        YELLOW
    } else {
        GREEN
    }
}

/// Swap status label against the critical threshold, coloured by usage band
pub fn swap_status(pct: f64, critical_pct: f64) -> (&'static str, u8) {
    let label = if pct >= critical_pct { "CRITICAL" } else { "OK" };
    (label, pct_color(pct))
}

pub struct OutputManager {
    colored: bool,
}

impl OutputManager {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn color(&self, code: u8) -> Style {
        Style::new().color256(code).force_styling(self.colored)
    }

    fn heading(&self) -> Style {
        Style::new().bold().force_styling(self.colored)
    }

    fn pct(&self, pct: f64) -> String {
        self.color(pct_color(pct)).apply_to(format!("{:.1}%", pct)).to_string()
    }

    pub fn print_summary(&self, report: &AuditReport, thresholds: &Thresholds, json_path: &Path) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.render_summary(&mut out, report, thresholds, json_path)?;
        out.flush()?;
        Ok(())
    }

    pub fn render_summary<W: Write>(
        &self,
        out: &mut W,
        report: &AuditReport,
        thresholds: &Thresholds,
        json_path: &Path,
    ) -> io::Result<()> {
        writeln!(
            out,
            "\n{}  {}",
            self.color(CYAN).bold().apply_to("Linux Resource Audit"),
            self.color(GRAY).apply_to(&report.timestamp)
        )?;

        writeln!(out, "\n{}", self.heading().apply_to("Risk"))?;
        for tag in &report.risk {
            let code = if tag.is_critical() { RED } else { GREEN };
            writeln!(out, "  {} {}", self.color(code).apply_to("●"), self.color(code).bold().apply_to(tag))?;
        }

        let mem = &report.memory;
        writeln!(out, "\n{}", self.heading().apply_to("Memory"))?;
        writeln!(
            out,
            "  RAM:  {:.2} / {:.2} GB ({})",
            mem.mem_used_gb,
            mem.mem_total_gb,
            self.pct(mem.mem_used_pct)
        )?;
        let (label, code) = swap_status(mem.swap_used_pct, thresholds.swap_used_pct);
        writeln!(
            out,
            "  Swap: {} of {:.2} GB {}",
            self.pct(mem.swap_used_pct),
            mem.swap_total_gb,
            self.color(code).bold().apply_to(label)
        )?;
        writeln!(
            out,
            "  {}",
            self.color(BLUE)
                .apply_to(format!("→ Recommended RAM: {} GB", report.recommendations.ram_gb_recommended))
        )?;

        writeln!(out, "\n{}", self.heading().apply_to("Disk"))?;
        for (mount, usage) in report.disks.usages() {
            writeln!(
                out,
                "  {:<6} {:.2} / {:.2} GB ({})",
                mount,
                usage.used_gb,
                usage.total_gb,
                self.pct(usage.used_pct)
            )?;
            if let Some(rec) = report.recommendations.disk_recommendations.get(mount) {
                writeln!(
                    out,
                    "         {}",
                    self.color(BLUE)
                        .apply_to(format!("→ Recommended size: {} GB", rec.recommended_total_gb))
                )?;
            }
        }

        writeln!(out, "\n{}", self.heading().apply_to("journald retention"))?;
        for (key, value) in report.recommendations.journald_limits.entries() {
            writeln!(out, "  {}={}", self.color(GRAY).apply_to(key), value)?;
        }

        writeln!(out, "\n{}", self.heading().apply_to("Analysis"))?;
        for line in &report.analysis {
            writeln!(out, "  - {}", line)?;
        }

        writeln!(
            out,
            "\n{} Report saved to {}",
            self.color(GREEN).bold().apply_to("✓"),
            json_path.display()
        )?;

        Ok(())
    }
}
