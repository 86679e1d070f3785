//! Input element backed by lines of text.

use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::info;

use autocomplete_core::{InputElement, InputEvent};

/// A line-oriented input: each line replaces the value and fires `input`.
pub struct LineInput {
    id: String,
    value: Mutex<String>,
    listeners: Mutex<Vec<(Vec<String>, mpsc::UnboundedSender<InputEvent>)>>,
}

impl LineInput {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: Mutex::new(String::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Replace the value with `line` and notify `input` listeners.
    pub fn feed(&self, line: &str) {
        *lock(&self.value) = line.to_string();

        let mut listeners = lock(&self.listeners);
        listeners.retain(|(_, tx)| !tx.is_closed());
        for (kinds, tx) in listeners.iter() {
            if kinds.iter().any(|kind| kind == "input") {
                let _ = tx.send(InputEvent::input());
            }
        }
    }

    /// End every listener's stream.
    pub fn close(&self) {
        lock(&self.listeners).clear();
    }
}

impl InputElement for LineInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> String {
        lock(&self.value).clone()
    }

    fn set_placeholder(&self, text: &str) {
        info!(input = %self.id, placeholder = text, "Placeholder set");
    }

    fn listen(&self, events: &[String]) -> mpsc::UnboundedReceiver<InputEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.listeners).push((events.to_vec(), tx));
        rx
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
