//! csvmerge CLI
//!
//! Merges every CSV file in an input directory into one timestamped report.
//! All settings have defaults and can come from flags or the environment,
//! so the tool runs with no arguments.

use clap::Parser;
use csvmerge_core::{run, CsvTable, DuplicateScan, Error, RunOutcome, RunSettings};
use std::path::PathBuf;
use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "csvmerge")]
#[command(about = "Merge per-organization CSV extracts into one report", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing the source CSV files
    #[arg(long, env = "INPUT_DIR", default_value = "./input")]
    input_dir: PathBuf,

    /// Directory the merged file is written to
    #[arg(long, env = "OUTPUT_DIR", default_value = "./output")]
    output_dir: PathBuf,

    /// Base name of the merged file (a timestamp is appended)
    #[arg(long, env = "OUTPUT_FILENAME", default_value = "merged")]
    output_name: String,

    /// Path to the JSON column config
    #[arg(long, env = "CONFIG_PATH", default_value = "./config.json")]
    config: PathBuf,

    /// Print the summary and duplicate report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease log verbosity
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    quiet: u8,
}

impl Cli {
    fn settings(&self) -> RunSettings {
        RunSettings {
            input_dir: self.input_dir.clone(),
            output_dir: self.output_dir.clone(),
            output_name: self.output_name.clone(),
            config_path: self.config.clone(),
        }
    }
}

fn init_tracing(verbose: u8, quiet: u8) {
    let level = match (1 + verbose as i16) - quiet as i16 {
        i16::MIN..=0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    let _ = set_global_default(subscriber);
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run_cli(&cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = error_hint(&e, &cli) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}

/// Extra guidance for errors raised before any source file is read
fn error_hint(err: &Error, cli: &Cli) -> Option<String> {
    err.is_config_error().then(|| {
        format!(
            "Check the column config at '{}' (set with --config or CONFIG_PATH)",
            cli.config.display()
        )
    })
}

fn run_cli(cli: &Cli) -> csvmerge_core::Result<()> {
    let outcome = run(&cli.settings(), &CsvTable, &CsvTable)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}

fn print_outcome(outcome: &RunOutcome) {
    let summary = &outcome.summary;

    println!("Merge complete: {}", outcome.output_path.display());
    println!();
    println!("Summary:");
    println!("  Files processed:         {}", summary.files_processed);
    println!("  Total records:           {}", summary.total_records);
    println!("  Output columns:          {}", summary.output_columns);
    println!("  Warnings:                {}", summary.warnings);
    println!("  Excluded columns:        {}", summary.excluded_columns);
    println!("  Duplicate-check columns: {}", summary.duplicate_check_columns);

    if !outcome.warnings.is_empty() {
        println!("\nWarnings ({}):", outcome.warnings.len());
        for warning in &outcome.warnings {
            println!("  - {}", warning);
        }
    }

    if let Some(scan) = &outcome.duplicates {
        print_duplicates(scan);
    }
}

fn duplicates_header(scan: &DuplicateScan) -> String {
    match scan.duplicate_value_count() {
        0 => "Duplicate check: no duplicates".to_string(),
        1 => "Duplicate check: 1 duplicated value".to_string(),
        n => format!("Duplicate check: {} duplicated values", n),
    }
}

fn print_duplicates(scan: &DuplicateScan) {
    println!("\n{}", duplicates_header(scan));

    for column in &scan.skipped {
        println!("  {}: skipped (column not in output)", column);
    }

    for report in &scan.reports {
        if !report.has_duplicates() {
            println!("  {}: no duplicates", report.column);
            continue;
        }

        println!("  {} ({} duplicated values):", report.column, report.entries.len());
        for entry in &report.entries {
            let rows: Vec<String> = entry.rows.iter().map(|r| r.to_string()).collect();
            println!(
                "    \"{}\" x{} (rows {})",
                entry.value,
                entry.count,
                rows.join(", ")
            );
        }
    }
}
