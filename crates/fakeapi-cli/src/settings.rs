use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use fakeapi_core::DEFAULT_FREE_TIER_LIMIT;
use fakeapi_generate::MAX_PAGE_SIZE;
use fakeapi_store::StoreError;
use fakeapi_store::atomic::write_bytes_atomic;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("write error: {0}")]
    Write(#[from] StoreError),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Json,
    Text,
}

/// Contents of `fakeapi.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Socket address the server listens on.
    pub bind: String,
    pub free_tier_limit: usize,
    pub max_page_size: u64,
    /// Seed for reproducible output; entropy when absent.
    pub seed: Option<u64>,
    /// JSON file backing the schema store; in-memory when absent.
    pub store_path: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Append logs to this file instead of stdout.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
            free_tier_limit: DEFAULT_FREE_TIER_LIMIT,
            max_page_size: MAX_PAGE_SIZE,
            seed: None,
            store_path: None,
            log_format: LogFormat::Json,
            log_file: None,
        }
    }
}

pub fn load_or_create_settings(path: &Path) -> SettingsResult<Settings> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        return Ok(settings);
    }

    let settings = Settings::default();
    save_settings(path, &settings)?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> SettingsResult<()> {
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(path, encoded.as_bytes())?;
    Ok(())
}
