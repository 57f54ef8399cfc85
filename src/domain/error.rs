use thiserror::Error;

/// Top-level error type for event delivery.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error(
        "AppID is required. Please set the AppID using Daiki::set_app_id() or Daiki::app_started()."
    )]
    MissingAppId,

    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {status} - {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Callback sends must be issued from within a Tokio runtime")]
    NoRuntime,
}

impl SdkError {
    pub fn is_missing_app_id(&self) -> bool {
        matches!(self, SdkError::MissingAppId)
    }
}
