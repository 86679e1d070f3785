use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::AcquisitionError;
use crate::host::WatchError;

/// How the dataset is supplied to pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindMode {
    /// Fetched once, reused by every run.
    Cache,
    /// Re-fetched before every run.
    Stream,
}

impl BindMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindMode::Cache => "cache",
            BindMode::Stream => "stream",
        }
    }
}

/// Lifecycle state of a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "mode", rename_all = "snake_case")]
pub enum LifecycleState {
    /// Constructed, not started.
    Unattached,
    /// Waiting for the input element to exist.
    AwaitingElement,
    /// Element resolved; preparing the listener.
    Bound(BindMode),
    /// Listening for input events.
    Ready(BindMode),
    /// Stopped on an error.
    Failed,
    /// Shut down, or the input stopped producing events.
    Stopped,
}

impl LifecycleState {
    /// True once the instance is listening or can no longer get there.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            LifecycleState::Ready(_) | LifecycleState::Failed | LifecycleState::Stopped
        )
    }

    pub fn mode(&self) -> Option<BindMode> {
        match self {
            LifecycleState::Bound(mode) | LifecycleState::Ready(mode) => Some(*mode),
            _ => None,
        }
    }
}

/// Errors that stop a widget instance.
#[derive(Debug, Clone, Error)]
pub enum LifecycleError {
    #[error("Element '{selector}' did not appear within {timeout_ms}ms")]
    AttachTimeout { selector: String, timeout_ms: u64 },

    #[error("Element watch failed: {0}")]
    Watch(#[from] WatchError),

    #[error("Dataset acquisition failed: {0}")]
    Acquisition(#[from] AcquisitionError),

    #[error("Lifecycle task aborted: {0}")]
    Aborted(String),
}

impl LifecycleError {
    /// Metric label for this failure.
    pub fn reason(&self) -> &'static str {
        match self {
            LifecycleError::AttachTimeout { .. } => "attach_timeout",
            LifecycleError::Watch(_) => "watch",
            LifecycleError::Acquisition(_) => "acquisition",
            LifecycleError::Aborted(_) => "aborted",
        }
    }
}
