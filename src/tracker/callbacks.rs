use crate::domain::SdkError;
use crate::sender::TransmissionResult;
use tracing::{debug, error};

pub type SuccessCallback = Box<dyn FnOnce(TransmissionResult) + Send + 'static>;
pub type FailureCallback = Box<dyn FnOnce(SdkError) + Send + 'static>;

/// Optional per-call completion handlers.
///
/// An absent success handler logs the response body at debug level; an
/// absent failure handler logs the error and drops it.
#[derive(Default)]
pub struct Callbacks {
    on_success: Option<SuccessCallback>,
    on_failure: Option<FailureCallback>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_success<F>(mut self, f: F) -> Self
    where
        F: FnOnce(TransmissionResult) + Send + 'static,
    {
        self.on_success = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_failure<F>(mut self, f: F) -> Self
    where
        F: FnOnce(SdkError) + Send + 'static,
    {
        self.on_failure = Some(Box::new(f));
        self
    }

    pub fn has_failure_handler(&self) -> bool {
        self.on_failure.is_some()
    }

    pub(crate) fn complete(self, outcome: Result<TransmissionResult, SdkError>) {
        match outcome {
            Ok(result) => match self.on_success {
                Some(on_success) => on_success(result),
                None => debug!("{}", result.body),
            },
            Err(err) => self.fail(err),
        }
    }

    pub(crate) fn fail(self, err: SdkError) {
        match self.on_failure {
            Some(on_failure) => on_failure(err),
            None => error!("{}", err),
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}
