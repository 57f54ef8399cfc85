use super::{ConfigError, LogFormat, LogLevel};
use crate::sender::{ClientConfig, StatusPolicy};
use crate::{DEFAULT_ENDPOINT, SDK_NAME, VERSION};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application identifier attached to every event
    #[arg(long, env = "DAIKI_APP_ID")]
    pub app_id: Option<String>,

    /// Ingestion endpoint URL
    #[arg(long, env = "DAIKI_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "DAIKI_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Treat non-2xx responses as failures
    #[arg(
        long,
        env = "DAIKI_STRICT_STATUS",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub strict_status: bool,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", default_value = "compact")]
    pub log_format: LogFormat,

    /// Configuration file path (optional)
    #[arg(long, env = "DAIKI_CONFIG_FILE")]
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: None,
            endpoint: None,
            timeout_secs: None,
            strict_status: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
            config_file: None,
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `config_file` if one was given and fills in whatever the
    /// command line and environment left at its default.
    pub fn resolve(self) -> Result<Self, ConfigError> {
        let config = match &self.config_file {
            Some(path) => {
                let file_config = Self::from_file(path)?;
                self.merge(file_config)
            }
            None => self,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn merge(mut self, base: Config) -> Self {
        let defaults = Config::default();

        if self.app_id.is_none() {
            self.app_id = base.app_id;
        }
        if self.endpoint.is_none() {
            self.endpoint = base.endpoint;
        }
        if self.timeout_secs.is_none() {
            self.timeout_secs = base.timeout_secs;
        }
        self.strict_status |= base.strict_status;
        if self.log_level == defaults.log_level {
            self.log_level = base.log_level;
        }
        if self.log_format == defaults.log_format {
            self.log_format = base.log_format;
        }
        self
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint().to_string(),
            timeout: self.timeout(),
            user_agent: format!("{SDK_NAME}/{VERSION}"),
            status_policy: if self.strict_status {
                StatusPolicy::Strict
            } else {
                StatusPolicy::Lenient
            },
        }
    }
}
