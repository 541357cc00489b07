//! CLI entry point: one-shot JSON report in, XLSX dashboard out.
//!
//! Stdout carries exactly one JSON status line (success or error) so the
//! calling process can parse the result; logs go to stderr.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use task_analytics::{generate_dashboard, Report, ReportError};

#[derive(Parser)]
#[command(name = "task-analytics", about = "Render a task analytics report as an XLSX dashboard")]
struct Cli {
    /// Path to the JSON report payload.
    input: PathBuf,
    /// Path the XLSX dashboard is written to.
    output: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => return report_failure(&ReportError::Usage),
    };

    match run(&cli) {
        Ok(()) => {
            println!(
                "{}",
                json!({
                    "success": true,
                    "output_path": cli.output.display().to_string(),
                    "message": "Task performance analytics dashboard created successfully",
                })
            );
            ExitCode::SUCCESS
        }
        Err(e) => report_failure(&e),
    }
}

fn run(cli: &Cli) -> Result<(), ReportError> {
    if !cli.input.exists() {
        return Err(ReportError::InputNotFound(cli.input.display().to_string()));
    }

    let raw = fs::read_to_string(&cli.input)?;
    let report: Report = serde_json::from_str(&raw)?;
    debug!(input = %cli.input.display(), "report decoded");

    // Bytes are produced in memory and written in one shot, so a failed
    // render never leaves a partial file behind.
    let bytes = generate_dashboard(&report, Local::now())?;
    fs::write(&cli.output, bytes)?;
    debug!(output = %cli.output.display(), "dashboard written");

    Ok(())
}

fn report_failure(error: &ReportError) -> ExitCode {
    println!(
        "{}",
        json!({
            "success": false,
            "error": error.to_string(),
        })
    );
    ExitCode::FAILURE
}
