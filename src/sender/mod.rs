pub mod client;
pub mod transmission;

pub use client::{ClientConfig, HttpClient, StatusPolicy};
pub use transmission::{EventTransmitter, TransmissionResult};
