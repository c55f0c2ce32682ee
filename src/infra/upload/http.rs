//! Client for the remote upload service that parses CSV files into rows.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::domain::entities::row::Row;
use crate::usecase::ports::upload::{RowSource, UploadError};

/// Multipart field the service reads the file from.
pub const DEFAULT_FIELD_NAME: &str = "csvFile";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: Vec<Map<String, Value>>,
}

#[derive(Debug, Clone)]
pub struct HttpUploadClient {
    client: Client,
    endpoint: String,
    field_name: String,
}

impl HttpUploadClient {
    pub fn new(endpoint: &str, field_name: &str, timeout: Duration) -> Result<Self, UploadError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim().to_string(),
            field_name: field_name.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RowSource for HttpUploadClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_rows(&self, path: &Path) -> Result<Vec<Row>, UploadError> {
        let bytes = std::fs::read(path).map_err(|source| UploadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload.csv")
            .to_string();
        debug!(size = bytes.len(), file_name = %file_name, "uploading file");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("text/csv")?;
        let form = Form::new().part(self.field_name.clone(), part);

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let rows = decode_upload_response(&body)?;
        info!(row_count = rows.len(), "upload service returned rows");
        Ok(rows)
    }
}

/// Decodes `{ "data": [ { column: value, .. }, .. ] }` keeping key order.
pub fn decode_upload_response(body: &str) -> Result<Vec<Row>, UploadError> {
    let response: UploadResponse =
        serde_json::from_str(body).map_err(|err| UploadError::Decode(err.to_string()))?;

    Ok(response
        .data
        .into_iter()
        .map(|record| {
            record
                .into_iter()
                .map(|(key, value)| (key, cell_to_string(value)))
                .collect::<Row>()
        })
        .collect())
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_to_string_handles_scalars() {
        assert_eq!(cell_to_string(Value::Null), "");
        assert_eq!(cell_to_string(Value::Bool(true)), "true");
        assert_eq!(cell_to_string(serde_json::json!(2.5)), "2.5");
        assert_eq!(cell_to_string(serde_json::json!("x")), "x");
    }

    #[test]
    fn cell_to_string_keeps_nested_values_as_json() {
        assert_eq!(cell_to_string(serde_json::json!([1, 2])), "[1,2]");
        assert_eq!(cell_to_string(serde_json::json!({"a": 1})), "{\"a\":1}");
    }
}
