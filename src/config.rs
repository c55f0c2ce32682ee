//! Optional user settings read from `settings.toml` in the platform config dir.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::infra::export::csv::ExportFormat;
use crate::infra::upload::http::{DEFAULT_FIELD_NAME, DEFAULT_TIMEOUT_SECS};

const SETTINGS_FILE_NAME: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub upload: UploadSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Remote parsing endpoint. Files are parsed locally when unset.
    pub endpoint: Option<String>,
    pub field_name: String,
    pub timeout_secs: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            field_name: DEFAULT_FIELD_NAME.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub format: ExportFormat,
    pub include_header: bool,
}

pub fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "csvdesk", "csvdesk")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_settings_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(SETTINGS_FILE_NAME))
}

impl Settings {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("failed to parse settings")
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid settings: {}", path.display()))
    }

    /// Loads the user's settings, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        match default_settings_path().and_then(|path| Self::load_from(&path)) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "falling back to default settings");
                Self::default()
            }
        }
    }
}
