use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use practices_core::{ListingRecord, SENTINEL};
use practices_logging::practices_info;

use crate::persist::{AtomicFileWriter, PersistError};

/// Serializes `records` as CSV at `destination`, replacing any existing file.
///
/// An empty slice is rejected before anything touches the filesystem, so a
/// previous dataset is never overwritten with an empty one.
pub fn write_dataset(
    records: &[ListingRecord],
    destination: &Path,
) -> Result<PathBuf, PersistError> {
    if records.is_empty() {
        return Err(PersistError::NoRecords);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let buffer = writer
        .into_inner()
        .map_err(|err| PersistError::Io(err.into_error()))?;

    let path = AtomicFileWriter::new(destination.to_path_buf()).write(&buffer)?;
    practices_info!("Saved {} records to {}", records.len(), path.display());
    Ok(path)
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Could not find dataset at {path}. Run scrape_practices first.")]
    Missing { path: PathBuf },
    #[error("failed to read dataset at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("malformed dataset at {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

/// Rows of a CSV file with a header row, kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Loads a CSV dataset previously written by [`write_dataset`].
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            DatasetError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            DatasetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let csv_err = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|row| row.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()
        .map_err(csv_err)?;

    Ok(Dataset { headers, rows })
}

impl Dataset {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Occurrences of each distinct value in `column`, most frequent first.
    ///
    /// Ties keep the order of first appearance. Empty cells and the `N/A`
    /// sentinel count as missing and are left out. `None` when the column
    /// does not exist.
    pub fn value_counts(&self, column: &str) -> Option<Vec<(String, usize)>> {
        let idx = self.column_index(column)?;
        let mut counts: Vec<(String, usize)> = Vec::new();
        for value in self.rows.iter().filter_map(|row| row.get(idx)) {
            let value = value.trim();
            if value.is_empty() || value == SENTINEL {
                continue;
            }
            match counts.iter_mut().find(|(v, _)| v.as_str() == value) {
                Some((_, n)) => *n += 1,
                None => counts.push((value.to_string(), 1)),
            }
        }
        // Stable sort keeps first-appearance order among equal counts.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        Some(counts)
    }
}
