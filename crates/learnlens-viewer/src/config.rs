//! Configuration for the LearnLens viewer.
//!
//! Configuration lives in `learnlens.json`. Every field has a default, so a
//! missing file or a partial file is fine; malformed JSON or invalid values
//! are reported with a suggestion.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::embed::EmbedConfig;
use crate::error::{Result, ViewerError};
use crate::path::ProficiencyLevel;

/// The default config file name.
pub const CONFIG_FILE_NAME: &str = "learnlens.json";

/// Default base URL of the path generation backend.
fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

/// Viewer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the generation backend (without `/api/...`).
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Level preselected on the topic form.
    #[serde(default)]
    pub default_level: ProficiencyLevel,

    /// Video embed settings.
    #[serde(default)]
    pub embed: EmbedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            default_level: ProficiencyLevel::default(),
            embed: EmbedConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the current working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or validated.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            ViewerError::config_parse(
                "<current directory>",
                format!("cannot determine current directory: {e}"),
            )
        })?;
        Self::load_from_dir(&current_dir)
    }

    /// Loads `learnlens.json` from `dir`, or defaults if it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed or validated.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load_from_file(&dir.join(CONFIG_FILE_NAME))
    }

    /// Loads configuration from a specific file path.
    ///
    /// If the file does not exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError::ConfigParseError` if the file cannot be read or
    /// holds invalid JSON, and `ViewerError::ConfigValidationError` if a value
    /// is out of range.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => {
                return Err(ViewerError::config_parse(
                    path,
                    format!("failed to read file: {e}"),
                ));
            }
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ViewerError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// - `apiUrl` must be an `http://` or `https://` URL
    /// - `embed.baseUrl` must not be empty
    ///
    /// # Errors
    ///
    /// Returns `ViewerError::ConfigValidationError` if any check fails.
    pub fn validate(&self) -> Result<()> {
        let api_url = self.api_url.trim();
        if api_url.is_empty() {
            return Err(ViewerError::config_validation(
                "apiUrl must not be empty",
                "Set apiUrl to the backend address, e.g. http://localhost:8000",
            ));
        }

        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ViewerError::config_validation(
                format!("apiUrl '{api_url}' is not an http(s) URL"),
                "Prefix apiUrl with http:// or https://",
            ));
        }

        if self.embed.base_url.trim().is_empty() {
            return Err(ViewerError::config_validation(
                "embed.baseUrl must not be empty",
                "Remove embed.baseUrl from learnlens.json to use the default player",
            ));
        }

        Ok(())
    }

    /// Full URL of the path generation endpoint.
    #[must_use]
    pub fn create_path_url(&self) -> String {
        format!("{}/api/create-path", self.api_url.trim().trim_end_matches('/'))
    }
}
