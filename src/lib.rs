#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions, // e.g. SdkError in domain::error
    clippy::must_use_candidate,
    clippy::doc_markdown
)]

//! Event-tracking client for the Daiki ingestion endpoint.
//!
//! ```rust,no_run
//! use daiki_sdk::{Daiki, EventParams};
//! use serde_json::json;
//!
//! # async fn run() -> Result<(), daiki_sdk::SdkError> {
//! let daiki = Daiki::new()?;
//! daiki.app_started(Some("my-app-123"), None).await?;
//!
//! let mut params = EventParams::new();
//! params.insert("llm".into(), json!("chatgpt-o4"));
//! daiki.event("ai_chat_started", Some(params)).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod sender;
pub mod tracker;

pub use domain::{EventEnvelope, EventParams, SdkError, generate_app_id};
pub use sender::{ClientConfig, StatusPolicy, TransmissionResult};
pub use tracker::{Callbacks, Daiki};

/// Fixed ingestion endpoint receiving every event.
pub const DEFAULT_ENDPOINT: &str = "https://app.dai.ki/api/v1/events/";

/// SDK identifier carried in the `sdk` field of every envelope.
pub const SDK_NAME: &str = "daiki.sdk.rs";

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event name reported by [`Daiki::app_started`].
pub const APP_START_EVENT: &str = "app_start";
