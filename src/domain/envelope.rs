use crate::{SDK_NAME, VERSION};
use serde::{Deserialize, Serialize};

/// Caller-supplied event parameters.
pub type EventParams = serde_json::Map<String, serde_json::Value>;

/// One event as it goes over the wire.
///
/// `params` holds the JSON text of the caller mapping rather than a nested
/// object. Existing ingestion servers expect this double encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event: String,
    #[serde(rename = "appID")]
    pub app_id: String,
    pub sdk: String,
    pub version: String,
    pub params: String,
}

impl EventEnvelope {
    /// Builds an envelope stamped with this SDK's name and version.
    /// A missing parameter mapping is encoded as `{}`.
    pub fn new(
        event: impl Into<String>,
        app_id: impl Into<String>,
        params: Option<&EventParams>,
    ) -> Result<Self, serde_json::Error> {
        let params = match params {
            Some(params) => serde_json::to_string(params)?,
            None => serde_json::to_string(&EventParams::new())?,
        };

        Ok(Self {
            event: event.into(),
            app_id: app_id.into(),
            sdk: SDK_NAME.to_string(),
            version: VERSION.to_string(),
            params,
        })
    }

    /// Decodes the `params` field back into a mapping.
    pub fn decoded_params(&self) -> Result<EventParams, serde_json::Error> {
        serde_json::from_str(&self.params)
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
