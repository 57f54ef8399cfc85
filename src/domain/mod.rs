//! Domain layer for the Daiki SDK.
//!
//! Contains the types shared across modules:
//! - `EventEnvelope`: the record posted to the ingestion endpoint
//! - `EventParams`: caller-supplied parameter mapping
//! - `SdkError`: top-level error type

pub mod app_id;
pub mod envelope;
pub mod error;

pub use app_id::generate_app_id;
pub use envelope::{EventEnvelope, EventParams};
pub use error::SdkError;
