use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::UploadSettings;
use crate::domain::entities::row::Row;
use crate::domain::entities::table::TableStore;
use crate::infra::import::csv::LocalCsvSource;
use crate::infra::upload::http::HttpUploadClient;
use crate::usecase::ports::upload::{RowSource, UploadError};

#[derive(Debug, Clone)]
pub enum UploadBackend {
    Remote(HttpUploadClient),
    Local(LocalCsvSource),
}

impl UploadBackend {
    pub fn describe(&self) -> String {
        match self {
            UploadBackend::Remote(client) => format!("upload service {}", client.endpoint()),
            UploadBackend::Local(_) => "local parser".to_string(),
        }
    }
}

impl RowSource for UploadBackend {
    async fn fetch_rows(&self, path: &Path) -> Result<Vec<Row>, UploadError> {
        match self {
            UploadBackend::Remote(client) => client.fetch_rows(path).await,
            UploadBackend::Local(source) => source.fetch_rows(path).await,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImportService {
    backend: UploadBackend,
}

impl ImportService {
    pub fn new(backend: UploadBackend) -> Self {
        Self { backend }
    }

    /// Uses the configured endpoint, or parses locally when none is set.
    pub fn from_settings(settings: &UploadSettings) -> Result<Self, UploadError> {
        let backend = match settings.endpoint.as_deref().map(str::trim) {
            Some(endpoint) if !endpoint.is_empty() => UploadBackend::Remote(HttpUploadClient::new(
                endpoint,
                &settings.field_name,
                Duration::from_secs(settings.timeout_secs),
            )?),
            _ => UploadBackend::Local(LocalCsvSource),
        };
        Ok(Self::new(backend))
    }

    pub fn backend(&self) -> &UploadBackend {
        &self.backend
    }

    pub async fn fetch_rows(&self, path: &Path) -> Result<Vec<Row>, UploadError> {
        self.backend.fetch_rows(path).await
    }
}

/// Replaces the table on success; on failure logs and leaves it untouched.
///
/// Returns the number of rows loaded, if any.
pub fn apply_upload(
    store: &mut TableStore,
    path: &Path,
    result: Result<Vec<Row>, UploadError>,
) -> Option<usize> {
    match result {
        Ok(rows) => {
            let row_count = rows.len();
            store.replace(rows);
            info!(path = %path.display(), row_count, "table loaded");
            Some(row_count)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "error uploading file");
            None
        }
    }
}
