use super::{HttpClient, StatusPolicy};
use crate::domain::{EventEnvelope, SdkError};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Outcome of one completed POST.
#[derive(Debug, Clone)]
pub struct TransmissionResult {
    pub status_code: u16,
    /// Raw response body.
    pub body: String,
    pub latency: Duration,
    pub bytes_sent: usize,
}

impl TransmissionResult {
    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Posts event envelopes to the ingestion endpoint, one request per call.
#[derive(Clone, Debug)]
pub struct EventTransmitter {
    pub client: HttpClient,
}

impl EventTransmitter {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    pub async fn send_event(
        &self,
        envelope: &EventEnvelope,
    ) -> Result<TransmissionResult, SdkError> {
        let start = Instant::now();
        let payload = envelope.to_json()?;
        let bytes_sent = payload.len();

        debug!(
            "Sending event '{}' for app {} ({} bytes)",
            envelope.event, envelope.app_id, bytes_sent
        );

        let response = self
            .client
            .client
            .post(self.client.endpoint_url.clone())
            .headers(Self::build_headers())
            .body(payload)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let body = response.text().await?;
        let latency = start.elapsed();

        let result = TransmissionResult {
            status_code,
            body,
            latency,
            bytes_sent,
        };

        if !result.is_success_status() {
            warn!(
                "Event '{}' answered with HTTP {} in {:?}",
                envelope.event, status_code, latency
            );
            if self.client.config.status_policy == StatusPolicy::Strict {
                return Err(SdkError::HttpStatus {
                    status: status_code,
                    body: result.body,
                });
            }
        } else {
            debug!(
                "Event '{}' delivered (HTTP {}) in {:?}",
                envelope.event, status_code, latency
            );
        }

        Ok(result)
    }

    pub fn build_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_carry_json_content_type() {
        let headers = EventTransmitter::build_headers();
        assert_eq!(
            headers.get(CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
    }

    #[test]
    fn success_status_range() {
        let mut result = TransmissionResult {
            status_code: 204,
            body: String::new(),
            latency: Duration::ZERO,
            bytes_sent: 0,
        };
        assert!(result.is_success_status());

        result.status_code = 404;
        assert!(!result.is_success_status());
    }
}
