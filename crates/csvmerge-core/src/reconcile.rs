//! Header reconciliation against the configured column set

use crate::config::ColumnConfig;
use crate::record::Record;

/// Outcome of checking one file's headers against the config
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Headers in neither the canonical nor the exclusion list, in header order
    pub unexpected: Vec<String>,
    /// Headers configured for exclusion, in header order
    pub excluded: Vec<String>,
    /// Warning for this file, set when `unexpected` is non-empty
    pub warning: Option<String>,
    /// Informational note, set when `excluded` is non-empty
    pub note: Option<String>,
}

/// Classify a file's headers.
///
/// Exclusion and unexpectedness are checked independently: an excluded
/// header is never reported as unexpected, even when it is not canonical.
pub fn reconcile(filename: &str, headers: &[String], config: &ColumnConfig) -> Reconciliation {
    let mut unexpected = Vec::new();
    let mut excluded = Vec::new();

    for header in headers {
        let is_excluded = config.is_excluded(header);
        if is_excluded {
            excluded.push(header.clone());
        }
        if !is_excluded && !config.is_canonical(header) {
            unexpected.push(header.clone());
        }
    }

    let warning = (!unexpected.is_empty())
        .then(|| format!("{}: unexpected columns: {}", filename, unexpected.join(", ")));
    let note = (!excluded.is_empty())
        .then(|| format!("{}: excluding columns: {}", filename, excluded.join(", ")));

    Reconciliation {
        unexpected,
        excluded,
        warning,
        note,
    }
}

/// Copy a record without the excluded columns, keeping field order
pub fn filter_record(record: &Record, columns_to_exclude: &[String]) -> Record {
    record
        .iter()
        .filter(|(key, _)| !columns_to_exclude.iter().any(|c| c == *key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_reconcile_clean_headers() {
        let config = ColumnConfig::new(["Org_Name", "Repo_Name"]).unwrap();
        let result = reconcile("a.csv", &headers(&["Repo_Name", "Org_Name"]), &config);

        assert!(result.unexpected.is_empty());
        assert!(result.excluded.is_empty());
        assert!(result.warning.is_none());
        assert!(result.note.is_none());
    }

    #[test]
    fn test_reconcile_unexpected_column() {
        let config = ColumnConfig::new(["Org_Name", "Repo_Name"]).unwrap();
        let result = reconcile(
            "ghes_orgB_data.csv",
            &headers(&["Org_Name", "Zeta", "Repo_Name", "Extra_Col"]),
            &config,
        );

        assert_eq!(result.unexpected, vec!["Zeta", "Extra_Col"]);
        assert_eq!(
            result.warning.as_deref(),
            Some("ghes_orgB_data.csv: unexpected columns: Zeta, Extra_Col")
        );
    }

    #[test]
    fn test_reconcile_excluded_is_not_unexpected() {
        let config =
            ColumnConfig::from_parts(["Org_Name"], ["Full_URL"], Vec::<String>::new()).unwrap();
        let result = reconcile("a.csv", &headers(&["Org_Name", "Full_URL"]), &config);

        assert_eq!(result.excluded, vec!["Full_URL"]);
        assert!(result.unexpected.is_empty());
        assert!(result.warning.is_none());
        assert_eq!(
            result.note.as_deref(),
            Some("a.csv: excluding columns: Full_URL")
        );
    }

    #[test]
    fn test_filter_record_keeps_order() {
        let record: Record = [("c", "3"), ("Full_URL", "x"), ("a", "1")]
            .into_iter()
            .collect();
        let filtered = filter_record(&record, &["Full_URL".to_string()]);

        assert_eq!(
            filtered.iter().collect::<Vec<_>>(),
            vec![("c", "3"), ("a", "1")]
        );
        // Input is untouched
        assert_eq!(record.len(), 3);
    }
}
