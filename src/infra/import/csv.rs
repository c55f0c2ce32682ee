use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::domain::entities::row::Row;
use crate::usecase::ports::upload::{RowSource, UploadError};

/// Parses the picked file in-process; used when no upload endpoint is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalCsvSource;

impl RowSource for LocalCsvSource {
    async fn fetch_rows(&self, path: &Path) -> Result<Vec<Row>, UploadError> {
        read_csv_rows(path)
    }
}

pub fn read_csv_rows(csv_path: &Path) -> Result<Vec<Row>, UploadError> {
    let file = std::fs::File::open(csv_path).map_err(|source| UploadError::Io {
        path: csv_path.display().to_string(),
        source,
    })?;
    let rows = parse_csv_rows(file)?;
    debug!(path = %csv_path.display(), row_count = rows.len(), "parsed local csv");
    Ok(rows)
}

pub fn parse_csv_rows<R: Read>(input: R) -> Result<Vec<Row>, UploadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = reader.headers()?.clone();

    if headers.is_empty() {
        return Err(UploadError::MissingHeader);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = headers
            .iter()
            .enumerate()
            .map(|(col_idx, header)| (header, record.get(col_idx).unwrap_or("")))
            .collect::<Row>();
        rows.push(row);
    }

    Ok(rows)
}
