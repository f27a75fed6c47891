//! End-to-end merge run: config, discovery, merge, output, duplicate report

use crate::config::ColumnConfig;
use crate::duplicates::{detect, DuplicateScan};
use crate::error::Result;
use crate::merger::MergeEngine;
use crate::order::{order, output_columns};
use crate::parser::{output_path, TableReader, TableWriter};
use crate::provenance::ProvenanceResolver;
use crate::scanner::discover_csv_files;
use chrono::Local;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Where a run reads from and writes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    /// Directory scanned for source CSV files
    pub input_dir: PathBuf,
    /// Directory the merged file is written to
    pub output_dir: PathBuf,
    /// Output file name before the timestamp suffix
    pub output_name: String,
    /// JSON column config
    pub config_path: PathBuf,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./input"),
            output_dir: PathBuf::from("./output"),
            output_name: "merged".to_string(),
            config_path: PathBuf::from("./config.json"),
        }
    }
}

/// Counts describing a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub files_processed: usize,
    pub total_records: usize,
    pub output_columns: usize,
    pub warnings: usize,
    /// Distinct columns configured for exclusion
    pub excluded_columns: usize,
    pub duplicate_check_columns: usize,
}

/// Everything a successful run produces
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub summary: Summary,
    pub output_path: PathBuf,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
    /// Present when duplicate checking was configured
    pub duplicates: Option<DuplicateScan>,
}

/// Run a full merge with the default provenance table
pub fn run<R, W>(settings: &RunSettings, reader: &R, writer: &W) -> Result<RunOutcome>
where
    R: TableReader,
    W: TableWriter,
{
    run_with_resolver(settings, reader, writer, ProvenanceResolver::default())
}

/// Run a full merge.
///
/// Any fatal error stops the run before output is written. Once the merge
/// succeeds, ordering, writing, and duplicate reporting always run.
pub fn run_with_resolver<R, W>(
    settings: &RunSettings,
    reader: &R,
    writer: &W,
    resolver: ProvenanceResolver,
) -> Result<RunOutcome>
where
    R: TableReader,
    W: TableWriter,
{
    let config = ColumnConfig::load(&settings.config_path)?;

    let files = discover_csv_files(&settings.input_dir)?;
    info!(
        dir = %settings.input_dir.display(),
        files = files.len(),
        "found input files"
    );

    let merged = MergeEngine::with_resolver(reader, resolver).merge(&files, &config)?;

    let columns = output_columns(&config);
    let ordered = order(&merged.records, &config);

    let path = output_path(&settings.output_dir, &settings.output_name, &Local::now());
    writer.write(&path, &ordered, &columns)?;
    info!(path = %path.display(), rows = ordered.len(), "wrote merged output");

    let duplicates = (!config.duplicate_check_columns().is_empty())
        .then(|| detect(&ordered, config.duplicate_check_columns()));

    let summary = Summary {
        files_processed: merged.files_processed,
        total_records: merged.records_processed,
        output_columns: columns.len(),
        warnings: merged.warning_count(),
        excluded_columns: config.columns_to_exclude().len(),
        duplicate_check_columns: config.duplicate_check_columns().len(),
    };

    Ok(RunOutcome {
        summary,
        output_path: path,
        warnings: merged.warnings,
        notes: merged.notes,
        duplicates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = RunSettings::default();

        assert_eq!(settings.input_dir, PathBuf::from("./input"));
        assert_eq!(settings.output_name, "merged");
    }

    #[test]
    fn test_summary_serializes() {
        let summary = Summary {
            files_processed: 2,
            total_records: 5,
            output_columns: 3,
            ..Summary::default()
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["files_processed"], 2);
        assert_eq!(json["output_columns"], 3);
        assert_eq!(json["warnings"], 0);
    }
}
