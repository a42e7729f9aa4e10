//! Parquet dataset reader

use super::convert::batch_to_records;
use crate::error::{Error, Result, ResultExt};
use crate::record::Record;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Rows loaded from a parquet file
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Where the rows came from
    pub path: PathBuf,
    /// Column names in file order
    pub columns: Vec<String>,
    /// Rows in file order
    pub records: Vec<Record>,
}

impl Dataset {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the file had no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// File name for display, falling back to the full path
    pub fn file_name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().to_string(),
        )
    }
}

/// Load every row of a parquet file.
///
/// A missing file is reported as `Error::InputNotFound` with the absolute
/// path that was tried, and tells the operator how to produce it.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::input_not_found(resolved(path).display().to_string()));
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let expected_rows = usize::try_from(builder.metadata().file_metadata().num_rows()).unwrap_or(0);

    let reader = builder.build()?;
    let mut records = Vec::with_capacity(expected_rows);
    for batch in reader {
        let batch = batch?;
        records.extend(batch_to_records(&batch)?);
    }

    debug!(
        path = %path.display(),
        rows = records.len(),
        columns = columns.len(),
        "Loaded dataset"
    );

    Ok(Dataset {
        path: path.to_path_buf(),
        columns,
        records,
    })
}

/// Absolute form of `path`, joined onto the working directory if relative
fn resolved(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
}
