//! Projection of merged records onto the output column order

use crate::config::ColumnConfig;
use crate::provenance::PROVENANCE_COLUMN;
use crate::record::Record;

/// Output columns: provenance first, then the canonical columns
pub fn output_columns(config: &ColumnConfig) -> Vec<String> {
    std::iter::once(PROVENANCE_COLUMN.to_string())
        .chain(config.columns().iter().cloned())
        .collect()
}

/// Project every record onto [`output_columns`].
///
/// Missing columns become empty strings and columns outside the output
/// sequence are dropped, so every row has the same shape. Applying this to
/// its own output changes nothing.
pub fn order(records: &[Record], config: &ColumnConfig) -> Vec<Record> {
    let columns = output_columns(config);
    records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| (c.as_str(), record.get(c).unwrap_or("")))
                .collect::<Record>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ColumnConfig {
        ColumnConfig::new(["Org_Name", "Repo_Name", "Visibility"]).unwrap()
    }

    #[test]
    fn test_output_columns() {
        assert_eq!(
            output_columns(&config()),
            vec!["Enterprise", "Org_Name", "Repo_Name", "Visibility"]
        );
    }

    #[test]
    fn test_order_fills_and_drops() {
        let records: Vec<Record> = vec![[
            ("Enterprise", "GHEC"),
            ("Repo_Name", "api"),
            ("Extra_Col", "x"),
            ("Org_Name", "acme"),
        ]
        .into_iter()
        .collect()];

        let ordered = order(&records, &config());

        assert_eq!(
            ordered[0].iter().collect::<Vec<_>>(),
            vec![
                ("Enterprise", "GHEC"),
                ("Org_Name", "acme"),
                ("Repo_Name", "api"),
                ("Visibility", ""),
            ]
        );
    }

    #[test]
    fn test_every_row_has_fixed_width() {
        let config = config();
        let records: Vec<Record> = vec![
            Record::new(),
            [("Org_Name", "a")].into_iter().collect(),
            [("Other", "b"), ("Another", "c")].into_iter().collect(),
        ];

        for row in order(&records, &config) {
            assert_eq!(row.len(), config.columns().len() + 1);
        }
    }

    #[test]
    fn test_order_is_idempotent() {
        let config = config();
        let records: Vec<Record> = vec![
            [("Repo_Name", "r"), ("Enterprise", "GHES"), ("Junk", "j")]
                .into_iter()
                .collect(),
            [("Visibility", "private")].into_iter().collect(),
        ];

        let once = order(&records, &config);
        let twice = order(&once, &config);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_order_empty_input() {
        assert!(order(&[], &config()).is_empty());
    }
}
