use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::artifact::DEFAULT_MAX_FILE_BYTES;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub progress: ProgressConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.service.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid("service.base_url is empty".into()));
        }
        let parsed = url::Url::parse(base_url).map_err(|e| {
            ConfigError::Invalid(format!("service.base_url '{base_url}' is not a valid URL: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ConfigError::Invalid(format!(
                "service.base_url '{base_url}' must be an http(s) URL"
            )));
        }
        self.progress.validate()?;
        if self.upload.max_file_bytes == 0 {
            return Err(ConfigError::Invalid("upload.max_file_bytes must be > 0".into()));
        }
        Ok(())
    }
}

/// Which success shape the redaction endpoint of this deployment returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationMode {
    /// JSON descriptor with a server-side job id; artifacts fetched later.
    #[default]
    Descriptor,
    /// The processed artifact itself, as the raw response body.
    Payload,
}

impl fmt::Display for IntegrationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrationMode::Descriptor => f.write_str("descriptor"),
            IntegrationMode::Payload => f.write_str("payload"),
        }
    }
}

impl FromStr for IntegrationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "descriptor" => Ok(IntegrationMode::Descriptor),
            "payload" => Ok(IntegrationMode::Payload),
            other => Err(format!(
                "unknown integration mode '{other}' (expected descriptor or payload)"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub mode: IntegrationMode,

    /// Transport-level timeout. Unset means the request may wait indefinitely.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            mode: IntegrationMode::default(),
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_max_increment")]
    pub max_increment: f64,

    #[serde(default = "default_ceiling")]
    pub ceiling: f64,

    /// Fixed RNG seed; unset seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_tick_interval_ms() -> u64 {
    500
}

fn default_max_increment() -> f64 {
    15.0
}

fn default_ceiling() -> f64 {
    90.0
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_increment: default_max_increment(),
            ceiling: default_ceiling(),
            seed: None,
        }
    }
}

impl ProgressConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("progress.tick_interval_ms must be > 0".into()));
        }
        if self.max_increment.is_nan() || self.max_increment <= 0.0 {
            return Err(ConfigError::Invalid("progress.max_increment must be > 0".into()));
        }
        if self.ceiling.is_nan() || self.ceiling <= 0.0 || self.ceiling >= 100.0 {
            return Err(ConfigError::Invalid(
                "progress.ceiling must be within (0, 100)".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_recent_limit() -> usize {
    5
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for daily rolling log files; stderr when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}
