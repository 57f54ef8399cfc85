use crate::domain::SdkError;
use crate::{DEFAULT_ENDPOINT, SDK_NAME, VERSION};
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// How a completed HTTP exchange is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPolicy {
    /// Any response counts as delivered, whatever its status code.
    #[default]
    Lenient,
    /// Non-2xx responses are reported as `SdkError::HttpStatus`.
    Strict,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Whole-request timeout. `None` waits for the server indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    pub status_policy: StatusPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            user_agent: format!("{SDK_NAME}/{VERSION}"),
            status_policy: StatusPolicy::Lenient,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    pub client: Client,
    pub config: ClientConfig,
    pub endpoint_url: Url,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self, SdkError> {
        let endpoint_url: Url = config.endpoint.parse().map_err(|e| {
            SdkError::InvalidConfiguration(format!("Invalid endpoint URL: {e}"))
        })?;

        if !matches!(endpoint_url.scheme(), "http" | "https") {
            return Err(SdkError::InvalidConfiguration(format!(
                "Unsupported endpoint scheme: {}",
                endpoint_url.scheme()
            )));
        }

        let mut client_builder = ClientBuilder::new().user_agent(&config.user_agent);

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().map_err(|e| {
            SdkError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            config,
            endpoint_url,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint_url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_ingestion_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "https://app.dai.ki/api/v1/events/");
        assert_eq!(config.timeout, None);
        assert_eq!(config.status_policy, StatusPolicy::Lenient);
        assert_eq!(config.user_agent, format!("daiki.sdk.rs/{VERSION}"));
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let config = ClientConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        let err = HttpClient::new(config).unwrap_err();
        assert!(matches!(err, SdkError::InvalidConfiguration(_)));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = ClientConfig {
            endpoint: "ftp://app.dai.ki/api/v1/events/".to_string(),
            ..Default::default()
        };
        let err = HttpClient::new(config).unwrap_err();
        assert!(err.to_string().contains("ftp"));
    }
}
