use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{ResultItemConfig, ResultsListConfig};
use crate::engine::MatchResult;
use crate::hooks::ItemContent;

use super::traits::InputElement;

/// A raw event fired by the input element.
///
/// Carries no value: the pipeline reads the live value when it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub kind: String,
}

impl InputEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn input() -> Self {
        Self::new("input")
    }
}

/// Resolved input element plus what the watcher knows about how it appeared.
#[derive(Clone)]
pub struct Attachment {
    pub element: Arc<dyn InputElement>,
    /// Opaque description of the triggering change, forwarded in `Connected`.
    pub context: Value,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("element", &self.element.id())
            .field("context", &self.context)
            .finish()
    }
}

/// Callback handed to the renderer; takes the position of the picked item
/// in the rendered list.
pub type SelectCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Everything the renderer needs besides the list itself.
#[derive(Clone)]
pub struct RenderContext {
    pub input_value: String,
    pub query_value: String,
    pub results_list: ResultsListConfig,
    pub result_item: ResultItemConfig,
    pub item_content: Option<ItemContent>,
    pub on_select: SelectCallback,
}

impl RenderContext {
    /// Text to show for `result`: the caller's formatting, or the compared value.
    pub fn item_text(&self, result: &MatchResult) -> String {
        match &self.item_content {
            Some(content) => content(result),
            None => result.compared_value.clone(),
        }
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("input_value", &self.input_value)
            .field("query_value", &self.query_value)
            .field("results_list", &self.results_list)
            .field("result_item", &self.result_item)
            .finish_non_exhaustive()
    }
}

/// Handle to a registered listener. Dropping it unsubscribes.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}
