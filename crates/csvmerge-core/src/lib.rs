//! csvmerge-core: Core library for merging CSV extracts into one report
//!
//! This library provides functionality to:
//! - Discover CSV files in an input directory
//! - Tag each file's rows with a provenance label taken from its filename
//! - Reconcile each file's headers against a configured column set
//! - Union all rows into one table with a fixed column order
//! - Report duplicate values in selected columns

pub mod config;
pub mod duplicates;
pub mod error;
pub mod merger;
pub mod order;
pub mod parser;
pub mod pipeline;
pub mod provenance;
pub mod reconcile;
pub mod record;
pub mod scanner;

pub use config::ColumnConfig;
pub use duplicates::{detect, DuplicateEntry, DuplicateReport, DuplicateScan};
pub use error::{Error, Result};
pub use merger::{MergeEngine, MergeResult};
pub use order::{order, output_columns};
pub use parser::{output_path, parse_csv_str, CsvTable, TableReader, TableWriter};
pub use pipeline::{run, run_with_resolver, RunOutcome, RunSettings, Summary};
pub use provenance::{ProvenanceResolver, ProvenanceTable, PROVENANCE_COLUMN};
pub use reconcile::{filter_record, reconcile, Reconciliation};
pub use record::Record;
pub use scanner::discover_csv_files;
