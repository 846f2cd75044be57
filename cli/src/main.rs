use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod error;
mod output;

use error::Result;
use hostaudit_auditor::{AuditConfig, AuditPipeline};
use output::OutputManager;

#[derive(Parser)]
#[command(name = "hostaudit")]
#[command(about = "hostaudit - point-in-time memory, swap and disk audit for Linux hosts")]
#[command(version)]
#[command(long_about = "
hostaudit collects memory, swap and per-mount disk usage, scans the last seven days
of the kernel log for memory and storage pressure, classifies risk, suggests
capacity targets and persists the report to audit_history.db, audit_report.json
and audit_report.csv before printing a summary.

Examples:
  hostaudit                                   # Audit and write into the current directory
  hostaudit --output-dir /var/lib/hostaudit   # Write the report files elsewhere
  hostaudit --show-config                     # Print the effective configuration
")]
struct Cli {
    /// Directory for the JSON, CSV and SQLite outputs
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    show_config: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    if let Err(e) = run(cli) {
        let error_msg = error::format_error(&e);
        eprintln!("{}", error_msg);
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = build_config(&cli);

    if cli.show_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let pipeline = AuditPipeline::new(config)?;
    let report = pipeline.run()?;
    info!("Audit complete: {}", report.risk.join(","));

    let colored = !cli.no_color && console::Term::stdout().features().colors_supported();
    let output = OutputManager::new(colored);
    let config = pipeline.config();
    output.print_summary(&report, &config.thresholds, &config.output.json_path)?;

    Ok(())
}

fn build_config(cli: &Cli) -> AuditConfig {
    let config = AuditConfig::default();
    match &cli.output_dir {
        Some(dir) => {
            debug!("Writing outputs into {}", dir.display());
            config.with_output_dir(dir)
        }
        None => config,
    }
}

fn init_logging(cli: &Cli) {
    // Set log level based on CLI flags
    let log_level = if cli.debug {
        tracing::Level::DEBUG
    } else if cli.verbose {
        tracing::Level::INFO
    } else if cli.quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::WARN
    };

    // Logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("hostaudit={0},hostaudit_auditor={0}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("hostaudit started");
}
