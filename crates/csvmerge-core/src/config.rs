//! Column configuration for a merge run
//!
//! Loaded from a JSON file shaped like:
//!
//! ```json
//! {
//!   "columns": ["Org_Name", "Repo_Name"],
//!   "columnsToExclude": ["Full_URL"],
//!   "duplicateCheckColumns": ["Repo_Name"]
//! }
//! ```

use crate::error::{Error, Result};
use crate::provenance::PROVENANCE_COLUMN;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// On-disk shape; every field is optional so validation can report
/// missing pieces with a clear message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    columns: Option<Vec<String>>,
    columns_to_exclude: Option<Vec<String>>,
    duplicate_check_columns: Option<Vec<String>>,
}

/// Validated column configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfig {
    columns: Vec<String>,
    columns_to_exclude: Vec<String>,
    duplicate_check_columns: Vec<String>,
}

impl ColumnConfig {
    /// Config with canonical columns only
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self> {
        Self::from_parts(columns, Vec::<String>::new(), Vec::<String>::new())
    }

    /// Build and validate a config from its three lists.
    ///
    /// Names are trimmed the same way source headers are, so `"Name "`
    /// matches a `Name` header.
    pub fn from_parts<A, B, C>(
        columns: impl IntoIterator<Item = A>,
        columns_to_exclude: impl IntoIterator<Item = B>,
        duplicate_check_columns: impl IntoIterator<Item = C>,
    ) -> Result<Self>
    where
        A: Into<String>,
        B: Into<String>,
        C: Into<String>,
    {
        let mut exclude: Vec<String> = Vec::new();
        for name in columns_to_exclude.into_iter().map(trimmed) {
            if !exclude.contains(&name) {
                exclude.push(name);
            }
        }

        let config = Self {
            columns: columns.into_iter().map(trimmed).collect(),
            columns_to_exclude: exclude,
            duplicate_check_columns: duplicate_check_columns.into_iter().map(trimmed).collect(),
        };
        config.validate()
    }

    /// Load a config file from disk and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::ConfigNotFound(path.to_path_buf()),
            _ => Error::ConfigRead {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let raw: RawConfig = serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let columns = raw.columns.ok_or_else(|| {
            Error::ConfigInvalid(format!("'{}' has no 'columns' array", path.display()))
        })?;

        let config = Self::from_parts(
            columns,
            raw.columns_to_exclude.unwrap_or_default(),
            raw.duplicate_check_columns.unwrap_or_default(),
        )?;

        debug!(
            path = %path.display(),
            columns = config.columns.len(),
            excluded = config.columns_to_exclude.len(),
            "loaded column config"
        );
        Ok(config)
    }

    /// Check column rules. Canonical columns that are also excluded are
    /// dropped from the canonical list.
    fn validate(mut self) -> Result<Self> {
        if self.columns.is_empty() {
            return Err(Error::ConfigInvalid("'columns' must not be empty".to_string()));
        }

        {
            let mut seen: HashSet<&str> = HashSet::new();
            for name in &self.columns {
                if name.is_empty() {
                    return Err(Error::ConfigInvalid(
                        "'columns' contains a blank column name".to_string(),
                    ));
                }
                if name == PROVENANCE_COLUMN {
                    return Err(Error::ConfigInvalid(format!(
                        "'{}' is reserved for the provenance column",
                        PROVENANCE_COLUMN
                    )));
                }
                if !seen.insert(name.as_str()) {
                    return Err(Error::ConfigInvalid(format!(
                        "duplicate column '{}' in 'columns'",
                        name
                    )));
                }
            }
        }

        let overlap: Vec<String> = self
            .columns
            .iter()
            .filter(|c| self.columns_to_exclude.contains(*c))
            .cloned()
            .collect();
        if !overlap.is_empty() {
            warn!(
                columns = %overlap.join(", "),
                "columns listed in both 'columns' and 'columnsToExclude' are excluded"
            );
            self.columns.retain(|c| !overlap.contains(c));
            if self.columns.is_empty() {
                return Err(Error::ConfigInvalid(
                    "every column in 'columns' is also excluded".to_string(),
                ));
            }
        }

        Ok(self)
    }

    /// Canonical output columns, in output order (provenance not included)
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Columns dropped from every source file
    pub fn columns_to_exclude(&self) -> &[String] {
        &self.columns_to_exclude
    }

    /// Columns to scan for repeated values after the merge
    pub fn duplicate_check_columns(&self) -> &[String] {
        &self.duplicate_check_columns
    }

    /// Whether a header is one of the canonical columns
    pub fn is_canonical(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Whether a header is configured for exclusion
    pub fn is_excluded(&self, name: &str) -> bool {
        self.columns_to_exclude.iter().any(|c| c == name)
    }
}

fn trimmed<S: Into<String>>(name: S) -> String {
    name.into().trim().to_string()
}
