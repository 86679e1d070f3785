//! Mock input element for testing.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::host::{InputElement, InputEvent};

use super::lock;

struct Listener {
    kinds: Vec<String>,
    tx: mpsc::UnboundedSender<InputEvent>,
}

/// Mock implementation of the InputElement trait.
///
/// Provides controllable behavior for testing:
/// - Set the live value without firing events
/// - Fire raw events to every listener subscribed to their kind
/// - Inspect the placeholder and listener registrations
///
/// # Example
///
/// ```rust,ignore
/// use autocomplete_core::testing::MockInput;
///
/// let input = Arc::new(MockInput::new("city"));
/// registry.insert("#city", input.clone());
///
/// // Sets the value and fires an "input" event
/// input.type_text("lis");
/// ```
pub struct MockInput {
    id: String,
    value: Mutex<String>,
    placeholder: Mutex<Option<String>>,
    listeners: Mutex<Vec<Listener>>,
}

impl MockInput {
    /// Create a new mock input with an empty value.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: Mutex::new(String::new()),
            placeholder: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Wrap as a trait object.
    pub fn into_element(self) -> Arc<dyn InputElement> {
        Arc::new(self)
    }

    /// Replace the live value without firing anything.
    pub fn set_value(&self, value: &str) {
        *lock(&self.value) = value.to_string();
    }

    /// Fire a raw event. Returns how many listeners received it.
    pub fn fire(&self, kind: &str) -> usize {
        let mut listeners = lock(&self.listeners);
        listeners.retain(|listener| !listener.tx.is_closed());
        let mut delivered = 0;
        for listener in listeners.iter() {
            if listener.kinds.iter().any(|k| k == kind)
                && listener.tx.send(InputEvent::new(kind)).is_ok()
            {
                delivered += 1;
            }
        }
        delivered
    }

    /// Set the value and fire an `input` event, like a keystroke would.
    pub fn type_text(&self, value: &str) -> usize {
        self.set_value(value);
        self.fire("input")
    }

    /// End every listener's event stream.
    pub fn close(&self) {
        lock(&self.listeners).clear();
    }

    /// Get the placeholder text, if one was applied.
    pub fn placeholder(&self) -> Option<String> {
        lock(&self.placeholder).clone()
    }

    /// Get the number of live listeners.
    pub fn listener_count(&self) -> usize {
        let mut listeners = lock(&self.listeners);
        listeners.retain(|listener| !listener.tx.is_closed());
        listeners.len()
    }

    /// Get the event kinds each live listener subscribed to.
    pub fn listened_kinds(&self) -> Vec<Vec<String>> {
        lock(&self.listeners)
            .iter()
            .map(|listener| listener.kinds.clone())
            .collect()
    }
}

impl InputElement for MockInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> String {
        lock(&self.value).clone()
    }

    fn set_placeholder(&self, text: &str) {
        *lock(&self.placeholder) = Some(text.to_string());
    }

    fn listen(&self, events: &[String]) -> mpsc::UnboundedReceiver<InputEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.listeners).push(Listener {
            kinds: events.to_vec(),
            tx,
        });
        rx
    }
}

impl std::fmt::Debug for MockInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockInput")
            .field("id", &self.id)
            .field("value", &self.value())
            .finish_non_exhaustive()
    }
}
