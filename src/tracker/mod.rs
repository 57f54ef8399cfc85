//! The event client.
//!
//! `Daiki` holds the application identifier and turns named events into
//! envelopes for the transmitter. Clones share one identifier; separately
//! constructed clients never see each other's.

pub mod callbacks;

pub use callbacks::{Callbacks, FailureCallback, SuccessCallback};

use crate::APP_START_EVENT;
use crate::domain::{EventEnvelope, EventParams, SdkError};
use crate::sender::{ClientConfig, EventTransmitter, HttpClient, TransmissionResult};
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Daiki {
    transmitter: EventTransmitter,
    app_id: Arc<RwLock<Option<String>>>,
}

impl Daiki {
    /// Client for the default ingestion endpoint with no identifier set.
    pub fn new() -> Result<Self, SdkError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, SdkError> {
        let client = HttpClient::new(config)?;
        Ok(Self {
            transmitter: EventTransmitter::new(client),
            app_id: Arc::new(RwLock::new(None)),
        })
    }

    pub fn with_app_id(app_id: impl Into<String>) -> Result<Self, SdkError> {
        let daiki = Self::new()?;
        daiki.set_app_id(app_id);
        Ok(daiki)
    }

    /// Overwrites the application identifier. Any string is accepted, but an
    /// empty one still counts as unset when sending.
    pub fn set_app_id(&self, app_id: impl Into<String>) {
        *self.app_id.write() = Some(app_id.into());
    }

    pub fn app_id(&self) -> Option<String> {
        self.app_id.read().clone()
    }

    pub fn endpoint(&self) -> &str {
        self.transmitter.client.endpoint()
    }

    /// Sends one event.
    ///
    /// The envelope, including the identifier, is captured when this is
    /// called, not when the returned future is first polled.
    pub fn send(
        &self,
        event: &str,
        params: Option<EventParams>,
    ) -> impl Future<Output = Result<TransmissionResult, SdkError>> + Send + use<> {
        let envelope = self.prepare(event, params.as_ref());
        let transmitter = self.transmitter.clone();

        async move { transmitter.send_event(&envelope?).await }
    }

    /// Reports an application start. A non-empty `new_app_id` replaces the
    /// stored identifier first.
    pub fn app_started(
        &self,
        new_app_id: Option<&str>,
        params: Option<EventParams>,
    ) -> impl Future<Output = Result<TransmissionResult, SdkError>> + Send + use<> {
        self.adopt_app_id(new_app_id);
        self.send(APP_START_EVENT, params)
    }

    /// Custom application event; same as [`Daiki::send`].
    pub fn event(
        &self,
        name: &str,
        values: Option<EventParams>,
    ) -> impl Future<Output = Result<TransmissionResult, SdkError>> + Send + use<> {
        self.send(name, values)
    }

    /// Fire-and-forget variant of [`Daiki::send`].
    ///
    /// Without an identifier, or outside a Tokio runtime, the failure
    /// handler runs immediately and no request is made; if there is no
    /// failure handler the error is returned instead. Otherwise the request
    /// runs on a spawned task whose handle is returned.
    pub fn send_with_callbacks(
        &self,
        event: &str,
        params: Option<EventParams>,
        callbacks: Callbacks,
    ) -> Result<Option<JoinHandle<()>>, SdkError> {
        let prepared = self.prepare(event, params.as_ref()).and_then(|envelope| {
            let runtime = Handle::try_current().map_err(|_| SdkError::NoRuntime)?;
            Ok((envelope, runtime))
        });

        let (envelope, runtime) = match prepared {
            Ok(prepared) => prepared,
            Err(err) if callbacks.has_failure_handler() => {
                callbacks.fail(err);
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        let transmitter = self.transmitter.clone();
        Ok(Some(runtime.spawn(async move {
            let outcome = transmitter.send_event(&envelope).await;
            callbacks.complete(outcome);
        })))
    }

    pub fn app_started_with_callbacks(
        &self,
        new_app_id: Option<&str>,
        params: Option<EventParams>,
        callbacks: Callbacks,
    ) -> Result<Option<JoinHandle<()>>, SdkError> {
        self.adopt_app_id(new_app_id);
        self.send_with_callbacks(APP_START_EVENT, params, callbacks)
    }

    pub fn event_with_callbacks(
        &self,
        name: &str,
        values: Option<EventParams>,
        callbacks: Callbacks,
    ) -> Result<Option<JoinHandle<()>>, SdkError> {
        self.send_with_callbacks(name, values, callbacks)
    }

    fn adopt_app_id(&self, new_app_id: Option<&str>) {
        if let Some(app_id) = new_app_id.filter(|id| !id.is_empty()) {
            debug!("Switching app ID to {}", app_id);
            self.set_app_id(app_id);
        }
    }

    fn prepare(
        &self,
        event: &str,
        params: Option<&EventParams>,
    ) -> Result<EventEnvelope, SdkError> {
        let Some(app_id) = self.app_id().filter(|id| !id.is_empty()) else {
            return Err(SdkError::MissingAppId);
        };
        Ok(EventEnvelope::new(event, app_id, params)?)
    }
}
