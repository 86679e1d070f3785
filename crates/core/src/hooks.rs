//! Caller-supplied callbacks.
//!
//! Interceptors and predicates are fallible: returning an error aborts the
//! current pipeline run only. Notification callbacks are infallible; a panic
//! inside one is caught by the lifecycle and reported like an error.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::engine::{MatchResult, RankedResultSet};
use crate::error::AutocompleteError;

/// Error raised from inside a caller callback.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("Callback failed: {0}")]
    Failed(String),
}

impl HookError {
    pub fn failed(message: impl Into<String>) -> Self {
        HookError::Failed(message.into())
    }
}

/// Transforms the raw input value before comparison.
/// `Ok(None)` (or an empty string) suppresses matching for this event.
pub type QueryInterceptor = Arc<dyn Fn(&str) -> Result<Option<String>, HookError> + Send + Sync>;

/// Decides whether a query value should trigger matching.
pub type TriggerCondition = Arc<dyn Fn(&str) -> Result<bool, HookError> + Send + Sync>;

/// Invoked when an admitted event finds the dataset empty.
pub type NoResultsHandler = Arc<dyn Fn(&NoResults) + Send + Sync>;

/// Receives the ranked result set in headless mode.
pub type FeedbackHandler = Arc<dyn Fn(&RankedResultSet) + Send + Sync>;

/// Invoked by the renderer when the user picks a result.
pub type SelectionHandler = Arc<dyn Fn(&Selection) + Send + Sync>;

/// Formats one rendered item in place of its compared value.
pub type ItemContent = Arc<dyn Fn(&MatchResult) -> String + Send + Sync>;

/// Receives runtime failures that did not stop the instance (and the one that did).
pub type ErrorHandler = Arc<dyn Fn(&AutocompleteError) + Send + Sync>;

/// Context handed to the no-results callback.
#[derive(Debug, Clone, Serialize)]
pub struct NoResults {
    pub input_value: String,
    pub query_value: String,
}

/// A result picked from the rendered list.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub input_value: String,
    pub query_value: String,
    /// Position of the result in the rendered list.
    pub index: usize,
    pub result: MatchResult,
}

/// Callbacks resolved from the options, shared by the pipeline and lifecycle.
#[derive(Clone, Default)]
pub struct Hooks {
    pub(crate) query: Option<QueryInterceptor>,
    pub(crate) no_results: Option<NoResultsHandler>,
    pub(crate) feedback: Option<FeedbackHandler>,
    pub(crate) on_selection: Option<SelectionHandler>,
    pub(crate) item_content: Option<ItemContent>,
    pub(crate) on_error: Option<ErrorHandler>,
}

impl Hooks {
    pub(crate) fn report(&self, error: &AutocompleteError) {
        if let Some(on_error) = &self.on_error {
            on_error(error);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("query", &self.query.is_some())
            .field("no_results", &self.no_results.is_some())
            .field("feedback", &self.feedback.is_some())
            .field("on_selection", &self.on_selection.is_some())
            .field("item_content", &self.item_content.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
