use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ExportSettings;
use crate::domain::entities::table::TableStore;
use crate::infra::export::csv::{encode_rows, ExportFormat};

pub const EXPORT_FILE_NAME: &str = "updated_data.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl ExportArtifact {
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
        }
        std::fs::write(path, self.body.as_bytes())
            .with_context(|| format!("failed to write export: {}", path.display()))?;
        info!(
            path = %path.display(),
            content_type = self.content_type,
            bytes = self.body.len(),
            "table exported"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExportService {
    format: ExportFormat,
    include_header: bool,
}

impl ExportService {
    pub fn new(format: ExportFormat, include_header: bool) -> Self {
        Self {
            format,
            include_header,
        }
    }

    pub fn from_settings(settings: &ExportSettings) -> Self {
        Self::new(settings.format, settings.include_header)
    }

    pub fn export(&self, store: &TableStore) -> Result<ExportArtifact> {
        let columns = store.columns();
        let header = self.include_header.then_some(columns.as_slice());
        let body = encode_rows(
            store.rows().iter().map(|stored| &stored.row),
            header,
            self.format,
        )?;

        Ok(ExportArtifact {
            file_name: EXPORT_FILE_NAME,
            content_type: EXPORT_CONTENT_TYPE,
            body,
        })
    }
}
