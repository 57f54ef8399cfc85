use super::{Config, ConfigError};
use url::Url;

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint();
        let url = Url::parse(endpoint).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid endpoint URL '{endpoint}': {e}"))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl(format!(
                "Endpoint '{endpoint}' must use http or https"
            )));
        }

        if self.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
