//! Merge engine for combining source files with provenance tagging

use crate::config::ColumnConfig;
use crate::error::{Error, Result};
use crate::parser::TableReader;
use crate::provenance::{ProvenanceResolver, PROVENANCE_COLUMN};
use crate::reconcile::{filter_record, reconcile};
use crate::record::Record;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Everything accumulated by a successful merge
#[derive(Debug, Clone, Default)]
pub struct MergeResult {
    /// Tagged records from all files, in file then row order
    pub records: Vec<Record>,
    /// Number of files merged
    pub files_processed: usize,
    /// Number of records merged
    pub records_processed: usize,
    /// Per-file warnings (unexpected columns)
    pub warnings: Vec<String>,
    /// Per-file informational notes (excluded columns); not warnings
    pub notes: Vec<String>,
}

impl MergeResult {
    /// Number of warnings raised during the merge
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Unions records from many source files into one tagged row set.
///
/// Fails fast: the first file that cannot be tagged or read aborts the
/// whole merge, and nothing from earlier files is returned.
pub struct MergeEngine<'a, R: TableReader> {
    reader: &'a R,
    resolver: ProvenanceResolver,
}

impl<'a, R: TableReader> MergeEngine<'a, R> {
    /// Create an engine with the default provenance table
    pub fn new(reader: &'a R) -> Self {
        Self::with_resolver(reader, ProvenanceResolver::default())
    }

    /// Create an engine with a custom provenance resolver
    pub fn with_resolver(reader: &'a R, resolver: ProvenanceResolver) -> Self {
        Self { reader, resolver }
    }

    /// Merge files in the given order
    pub fn merge(&self, files: &[PathBuf], config: &ColumnConfig) -> Result<MergeResult> {
        if files.is_empty() {
            return Err(Error::EmptyFileList);
        }

        let mut result = MergeResult::default();

        for path in files {
            let records = self.merge_file(path, config, &mut result)?;
            result.files_processed += 1;
            result.records_processed += records.len();
            result.records.extend(records);
        }

        info!(
            files = result.files_processed,
            records = result.records_processed,
            warnings = result.warnings.len(),
            "merge complete"
        );
        Ok(result)
    }

    /// Tag, reconcile, and read one file
    fn merge_file(
        &self,
        path: &Path,
        config: &ColumnConfig,
        result: &mut MergeResult,
    ) -> Result<Vec<Record>> {
        let filename = display_name(path);
        let tag = self.resolver.resolve(path)?;

        let headers = self.reader.headers(path)?;
        let reconciliation = reconcile(&filename, &headers, config);
        if let Some(warning) = reconciliation.warning {
            warn!("{}", warning);
            result.warnings.push(warning);
        }
        if let Some(note) = reconciliation.note {
            info!("{}", note);
            result.notes.push(note);
        }

        let records: Vec<Record> = self
            .reader
            .read(path)?
            .iter()
            .map(|record| {
                let mut record = filter_record(record, config.columns_to_exclude());
                record.insert_first(PROVENANCE_COLUMN, tag.as_str());
                record
            })
            .collect();

        debug!(file = %filename, tag = %tag, records = records.len(), "merged file");
        Ok(records)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
