//! Collaborator traits implemented by the host environment.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::engine::MatchResult;

use super::types::{Attachment, InputEvent, RenderContext, Subscription};

/// Errors from the element watcher.
#[derive(Debug, Clone, Error)]
pub enum WatchError {
    #[error("Element watcher closed before '{0}' appeared")]
    Closed(String),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}

/// The live text input the widget is bound to.
pub trait InputElement: Send + Sync {
    /// Stable identifier, used in logs and notifications.
    fn id(&self) -> &str;

    /// Current content, read at call time.
    fn value(&self) -> String;

    fn set_placeholder(&self, text: &str);

    /// Start delivering raw events of the given kinds.
    ///
    /// The receiver ends when the element stops producing events.
    fn listen(&self, events: &[String]) -> mpsc::UnboundedReceiver<InputEvent>;
}

/// Presents ranked results next to an input.
pub trait Renderer: Send + Sync {
    /// Close any open results presentation for `input`.
    fn close_all(&self, input: &dyn InputElement);

    /// Replace the presentation for this input with `list`.
    fn render(&self, list: &[MatchResult], event: &InputEvent, context: RenderContext);
}

/// Wires directional selection among rendered items.
pub trait Navigator: Send + Sync {
    fn arm(&self, input: &dyn InputElement);
}

/// Reports interactions outside the widget.
pub trait OutsideClickSource: Send + Sync {
    /// Call `on_outside` for every interaction outside `input` until the
    /// returned subscription is dropped.
    fn subscribe(
        &self,
        input: &dyn InputElement,
        on_outside: Box<dyn Fn() + Send + Sync>,
    ) -> Subscription;
}

/// Resolves a selector to a live element, once.
#[async_trait]
pub trait ElementWatcher: Send + Sync {
    /// Wait until `selector` names a live element.
    async fn wait_for(&self, selector: &str) -> Result<Attachment, WatchError>;
}
