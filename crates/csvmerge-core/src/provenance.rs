//! Provenance tagging from source filenames
//!
//! A source file named `ghec_acme_repos.csv` contributes rows tagged `GHEC`.
//! The prefix before the first `_` selects the tag from a lookup table.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the column that carries the provenance tag in merged output
pub const PROVENANCE_COLUMN: &str = "Enterprise";

/// Known filename prefixes and their provenance tags
const DEFAULT_PREFIXES: &[(&str, &str)] = &[("ghec", "GHEC"), ("ghes", "GHES")];

/// Immutable mapping from lowercase filename prefix to provenance tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceTable {
    entries: BTreeMap<String, String>,
}

impl ProvenanceTable {
    /// Create an empty table
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Return a copy of this table with one more prefix. Prefixes are
    /// matched case-insensitively.
    pub fn with_entry(mut self, prefix: &str, tag: impl Into<String>) -> Self {
        self.entries.insert(prefix.to_lowercase(), tag.into());
        self
    }

    /// Look up the tag for a prefix
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries.get(&prefix.to_lowercase()).map(String::as_str)
    }

    /// All known prefixes, sorted
    pub fn prefixes(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

impl Default for ProvenanceTable {
    fn default() -> Self {
        DEFAULT_PREFIXES
            .iter()
            .fold(Self::empty(), |table, (prefix, tag)| {
                table.with_entry(prefix, *tag)
            })
    }
}

/// Derives provenance tags from filenames using a [`ProvenanceTable`]
#[derive(Debug, Clone, Default)]
pub struct ProvenanceResolver {
    table: ProvenanceTable,
}

impl ProvenanceResolver {
    /// Create a resolver over the given table
    pub fn new(table: ProvenanceTable) -> Self {
        Self { table }
    }

    /// Resolve the provenance tag for a file
    ///
    /// Examples:
    /// - "ghec_orgA_data.csv" -> "GHEC"
    /// - "data/GHES_orgB.csv" -> "GHES"
    /// - "report.csv" -> InvalidFilenameFormat
    /// - "abc_org.csv" -> UnknownProvenancePrefix
    pub fn resolve<P: AsRef<Path>>(&self, filename: P) -> Result<String> {
        let path = filename.as_ref();
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::InvalidFilenameFormat(display_name.clone()))?;

        let (prefix, _) = stem
            .split_once('_')
            .ok_or_else(|| Error::InvalidFilenameFormat(display_name.clone()))?;

        let prefix = prefix.to_lowercase();
        match self.table.get(&prefix) {
            Some(tag) => Ok(tag.to_string()),
            None => Err(Error::UnknownProvenancePrefix {
                filename: display_name,
                prefix,
                known: self.table.prefixes().join(", "),
            }),
        }
    }
}
