//! Sampler configuration
//!
//! Describes how the external sampler is launched and where the exchange
//! files live. Supports JSON and TOML files, chosen by extension.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, SettingsResult};

#[cfg(windows)]
const DEFAULT_PYTHON_BIN: &str = "python.exe";
#[cfg(not(windows))]
const DEFAULT_PYTHON_BIN: &str = "python";

/// Where exchange files are written for each sampler invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeMode {
    /// Fixed names directly in the system temp directory.
    ///
    /// Only one invocation may be in flight per user at a time.
    Shared,
    /// A fresh uniquely named directory per invocation
    Scoped,
}

impl Default for ExchangeMode {
    fn default() -> Self {
        Self::Scoped
    }
}

impl fmt::Display for ExchangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => write!(f, "shared"),
            Self::Scoped => write!(f, "scoped"),
        }
    }
}

/// What to do when the sampler exits with a non-zero status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitStatusPolicy {
    /// Fail the sampling call before reading result files
    Abort,
    /// Log a warning and read whatever result files exist
    Ignore,
}

impl Default for ExitStatusPolicy {
    fn default() -> Self {
        Self::Abort
    }
}

/// External sampler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Interpreter used to run the sampler scripts
    pub python_bin: String,
    /// Directory holding the sampler scripts
    pub scripts_dir: PathBuf,
    /// Drop-cutter sampling script name
    pub sample_script: String,
    /// Waterline script name
    pub waterline_script: String,
    pub exchange_mode: ExchangeMode,
    pub exit_status: ExitStatusPolicy,
    /// Leave scoped exchange directories on disk after the call
    pub keep_exchange_files: bool,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            python_bin: DEFAULT_PYTHON_BIN.to_string(),
            scripts_dir: default_scripts_dir(),
            sample_script: "oclSample.py".to_string(),
            waterline_script: "oclWaterline.py".to_string(),
            exchange_mode: ExchangeMode::default(),
            exit_status: ExitStatusPolicy::default(),
            keep_exchange_files: false,
        }
    }
}

fn default_scripts_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("camsampler")
        .join("opencamlib")
}

impl SamplerConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        config.validate()?;
        debug!("Loaded sampler config from {:?}", path);
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        for (key, value) in [
            ("python_bin", &self.python_bin),
            ("sample_script", &self.sample_script),
            ("waterline_script", &self.waterline_script),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidSetting {
                    key: key.to_string(),
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
        }

        if self.scripts_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "scripts_dir".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Full path of the drop-cutter sampling script
    pub fn sample_script_path(&self) -> PathBuf {
        self.scripts_dir.join(&self.sample_script)
    }

    /// Full path of the waterline script
    pub fn waterline_script_path(&self) -> PathBuf {
        self.scripts_dir.join(&self.waterline_script)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
