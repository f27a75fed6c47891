//! CSV reading and writing for merge inputs and output
//!
//! The merge engine only sees the [`TableReader`] and [`TableWriter`] traits;
//! [`CsvTable`] is the implementation backed by the `csv` crate.

use crate::error::{Error, Result};
use crate::record::Record;
use chrono::{DateTime, TimeZone};
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};

/// Reads headers and records from a tabular source
pub trait TableReader {
    /// Column names from the header row, in file order
    fn headers(&self, path: &Path) -> Result<Vec<String>>;

    /// Every data row as a record keyed by header
    fn read(&self, path: &Path) -> Result<Vec<Record>>;
}

/// Writes records to a tabular destination
pub trait TableWriter {
    /// Write a header row of `columns`, then one row per record in that
    /// column order. Parent directories are created as needed.
    fn write(&self, path: &Path, records: &[Record], columns: &[String]) -> Result<()>;
}

/// Comma-separated files with a header row
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTable;

impl TableReader for CsvTable {
    fn headers(&self, path: &Path) -> Result<Vec<String>> {
        let mut reader = open_reader(path)?;
        read_headers(&mut reader, path)
    }

    fn read(&self, path: &Path) -> Result<Vec<Record>> {
        let reader = open_reader(path)?;
        read_records(reader, path)
    }
}

impl TableWriter for CsvTable {
    fn write(&self, path: &Path, records: &[Record], columns: &[String]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::OutputDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let write_err = |e: csv::Error| Error::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        };

        let mut writer = csv::Writer::from_path(path).map_err(write_err)?;
        writer.write_record(columns).map_err(write_err)?;

        for record in records {
            let row = columns.iter().map(|c| record.get(c).unwrap_or(""));
            writer.write_record(row).map_err(write_err)?;
        }

        writer.flush().map_err(|e| write_err(e.into()))?;
        Ok(())
    }
}

/// Build the timestamped output path `{dir}/{base}_{YYYYMMDD_HHMMSS}.csv`
pub fn output_path<Tz: TimeZone>(dir: &Path, base: &str, timestamp: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    dir.join(format!("{}_{}.csv", base, timestamp.format("%Y%m%d_%H%M%S")))
}

/// Parse CSV from a string (useful for testing)
pub fn parse_csv_str(content: &str, source_name: &str) -> Result<(Vec<String>, Vec<Record>)> {
    let path = PathBuf::from(source_name);
    let mut reader = csv_builder().from_reader(content.as_bytes());
    let headers = read_headers(&mut reader, &path)?;
    let records = read_records(reader, &path)?;
    Ok((headers, records))
}

fn csv_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // Ragged rows are malformed input, not something to pad over
    builder.has_headers(true).flexible(false);
    builder
}

fn open_reader(path: &Path) -> Result<csv::Reader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::SourceNotFound(path.to_path_buf()),
        _ => Error::SourceUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    Ok(csv_builder().from_reader(BufReader::new(file)))
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>, path: &Path) -> Result<Vec<String>> {
    let headers = reader.headers().map_err(|e| Error::SourceMalformed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = if i == 0 {
                name.trim_start_matches('\u{feff}')
            } else {
                name
            };
            name.trim().to_string()
        })
        .collect();

    if columns.iter().all(|c| c.is_empty()) {
        return Err(Error::EmptyHeader(path.to_path_buf()));
    }

    Ok(columns)
}

fn read_records<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<Vec<Record>> {
    let headers = read_headers(&mut reader, path)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| Error::SourceMalformed {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut record = Record::with_capacity(headers.len());
        for (name, value) in headers.iter().zip(row.iter()) {
            record.insert(name.as_str(), value);
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;

    #[test]
    fn test_parse_simple_csv() {
        let csv = "Org_Name,Repo_Name\nacme,api\nacme,web\n";
        let (headers, records) = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(headers, vec!["Org_Name", "Repo_Name"]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Repo_Name"), Some("api"));
        assert_eq!(records[1].keys().collect::<Vec<_>>(), vec!["Org_Name", "Repo_Name"]);
    }

    #[test]
    fn test_parse_keeps_values_as_text() {
        let csv = "Id,Size\n007,  1.50 \n";
        let (_, records) = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(records[0].get("Id"), Some("007"));
        assert_eq!(records[0].get("Size"), Some("  1.50 "));
    }

    #[test]
    fn test_parse_strips_bom_and_trims_headers() {
        let csv = "\u{feff}Org_Name , Repo_Name\nacme,api\n";
        let (headers, records) = parse_csv_str(csv, "test.csv").unwrap();

        assert_eq!(headers, vec!["Org_Name", "Repo_Name"]);
        assert_eq!(records[0].get("Org_Name"), Some("acme"));
    }

    #[test]
    fn test_parse_ragged_row_is_malformed() {
        let csv = "A,B\n1,2\n3\n";
        assert!(matches!(
            parse_csv_str(csv, "bad.csv"),
            Err(Error::SourceMalformed { .. })
        ));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(matches!(
            parse_csv_str("", "empty.csv"),
            Err(Error::EmptyHeader(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("ghec_missing.csv");

        assert!(matches!(
            CsvTable.read(&missing),
            Err(Error::SourceNotFound(p)) if p == missing
        ));
        assert!(matches!(
            CsvTable.headers(&missing),
            Err(Error::SourceNotFound(_))
        ));
    }

    #[test]
    fn test_write_creates_parent_dirs_and_quotes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/out/merged.csv");
        let columns = vec!["Enterprise".to_string(), "Name".to_string()];
        let records: Vec<Record> = vec![
            [("Enterprise", "GHEC"), ("Name", "a,b")].into_iter().collect(),
            [("Enterprise", "GHES")].into_iter().collect(),
        ];

        CsvTable.write(&path, &records, &columns).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Enterprise,Name\nGHEC,\"a,b\"\nGHES,\n");

        let read_back = CsvTable.read(&path).unwrap();
        assert_eq!(read_back[0].get("Name"), Some("a,b"));
    }

    #[test]
    fn test_write_reports_output_directory_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();
        let path = blocker.join("nested/merged.csv");
        let columns = vec!["Enterprise".to_string()];

        let err = CsvTable.write(&path, &[], &columns).unwrap_err();

        match &err {
            Error::OutputDirectory { path: failed, .. } => {
                assert_eq!(failed, &blocker.join("nested"))
            }
            other => panic!("expected OutputDirectory, got {:?}", other),
        }
        assert!(err.to_string().contains("nested"));
    }

    #[test]
    fn test_output_path_format() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap()
            .and_utc();
        let path = output_path(Path::new("out"), "merged", &timestamp);

        assert_eq!(path, PathBuf::from("out/merged_20240309_070501.csv"));

        // Same shape for the current time
        let now = output_path(Path::new("out"), "merged", &Utc::now());
        let name = now.file_name().unwrap().to_str().unwrap();
        assert_eq!(name.len(), "merged_YYYYMMDD_HHMMSS.csv".len());
    }
}
