use std::path::Path;

use thiserror::Error;

use crate::domain::entities::row::Row;

/// Failures while turning a picked file into rows.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv header is required")]
    MissingHeader,
    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upload service answered HTTP {0}")]
    Status(u16),
    #[error("upload response could not be decoded: {0}")]
    Decode(String),
}

/// Anything that can turn a file on disk into table rows.
#[allow(async_fn_in_trait)]
pub trait RowSource {
    async fn fetch_rows(&self, path: &Path) -> Result<Vec<Row>, UploadError>;
}
