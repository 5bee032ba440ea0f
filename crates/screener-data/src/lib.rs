//! Session data repository: loads the screener CSV export once and hands the
//! pipeline an immutable, name-indexed dataset.
//!
//! Schema violations (a missing required column) are fatal at load time; the
//! pipeline never sees a partially loaded dataset.

use std::io::Read;
use std::path::Path;

use assessment_core::{AssessmentError, CompanyDataset, CompanyRecord};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid dataset: {0}")]
    Invalid(#[from] AssessmentError),
}

pub type DataResult<T> = Result<T, DataError>;

/// Load the screener export from a CSV file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> DataResult<CompanyDataset> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "loading screener dataset");
    let file = std::fs::File::open(path)?;
    read_dataset(file)
}

/// Deserialize screener rows from any reader. Row order is preserved; it is
/// the tie-break order the ranker depends on.
pub fn read_dataset<R: Read>(reader: R) -> DataResult<CompanyDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records: Vec<CompanyRecord> = Vec::new();
    for row in csv_reader.deserialize() {
        records.push(row?);
    }
    tracing::info!(companies = records.len(), "screener dataset loaded");

    Ok(CompanyDataset::new(records)?)
}
