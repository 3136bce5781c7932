//! Batch CLI commands
//!
//! Reads `id,value` rows from CSV, runs every row concurrently and reports
//! one outcome per row. A failed row never stops the others.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::batch::{run_batch, BatchMode, BatchReport};
use crate::config::settings::{OutputFormat, Settings};
use crate::display::{format_batch_summary, format_batch_table};
use crate::error::{AegisError, AegisResult};
use crate::export::{read_batch_items, write_batch_json, write_batch_records};

use super::input::KeyArgs;

/// Batch subcommands
#[derive(Subcommand, Debug)]
pub enum BatchCommands {
    /// Encrypt every row of a CSV file
    Encrypt(BatchArgs),

    /// Decrypt every row of a CSV file
    Decrypt(BatchArgs),
}

/// Shared batch options
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// CSV file with an `id,value` header
    pub file: PathBuf,

    /// Write results here instead of stdout (always CSV)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format for stdout (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Worker threads (defaults to the configured value, then all cores)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    #[command(flatten)]
    pub key: KeyArgs,
}

/// Handle batch commands
///
/// Returns an error when any row failed, after all rows have been reported.
pub fn handle_batch_command(settings: &Settings, cmd: BatchCommands) -> AegisResult<()> {
    let (mode, args) = match cmd {
        BatchCommands::Encrypt(args) => (BatchMode::Seal, args),
        BatchCommands::Decrypt(args) => (BatchMode::Open, args),
    };

    let file = File::open(&args.file).map_err(|e| {
        AegisError::Io(format!("Failed to open {}: {}", args.file.display(), e))
    })?;
    let items = read_batch_items(BufReader::new(file))?;

    let passphrase = args.key.resolve(mode == BatchMode::Seal)?;
    let jobs = args.jobs.or(settings.batch_parallelism);
    if jobs == Some(0) {
        return Err(AegisError::Input("--jobs must be at least 1".into()));
    }

    let report = run_batch(mode, &items, &passphrase, jobs)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                AegisError::Io(format!("Failed to create {}: {}", path.display(), e))
            })?;
            write_batch_records(BufWriter::new(file), &report.records())?;
            eprintln!("Results written to {}", path.display());
        }
        None => print_report(&report, args.format.unwrap_or(settings.output_format))?,
    }

    eprintln!("{}", format_batch_summary(&report));

    if report.failed() > 0 {
        return Err(AegisError::Input(format!(
            "{} of {} item(s) failed",
            report.failed(),
            report.outcomes.len()
        )));
    }
    Ok(())
}

fn print_report(report: &BatchReport, format: OutputFormat) -> AegisResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => writeln!(out, "{}", format_batch_table(report))?,
        OutputFormat::Json => write_batch_json(&mut out, report)?,
        OutputFormat::Csv => write_batch_records(&mut out, &report.records())?,
    }
    Ok(())
}
