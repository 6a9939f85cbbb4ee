use std::path::Path;

use serde::Deserialize;

use crate::errors::{constants::*, Result};
use crate::tts::voice::Voice;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_key_env: String,
    pub base_url: String,
    pub model: String,
    pub default_voice: Voice,
    pub download_timeout_secs: u64,
    pub listen_addr: String,
    pub otel_http_url: Option<String>,
    pub otel_export_interval_secs: u64,
    pub otel_sample_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key_env: API_KEY_ENV_VAR.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            default_voice: Voice::default(),
            download_timeout_secs: DOWNLOAD_TIMEOUT_SECS,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            otel_http_url: None,
            otel_export_interval_secs: OTEL_EXPORT_INTERVAL_SECS,
            otel_sample_ratio: 1.0,
        }
    }
}

impl Config {
    /// Load config from a TOML file, falling back to defaults when the file is absent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str::<Config>(&raw)?)
    }
}
