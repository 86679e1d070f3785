use thiserror::Error;

use crate::data::AcquisitionError;
use crate::lifecycle::LifecycleError;
use crate::pipeline::PipelineError;

/// Runtime failure reported to the `on_error` callback.
#[derive(Debug, Error)]
pub enum AutocompleteError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl AutocompleteError {
    /// True when the instance stopped because of this error.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AutocompleteError::Lifecycle(_))
    }
}
