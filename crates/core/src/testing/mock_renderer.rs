//! Mock renderer and navigator for testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::engine::{HighlightRange, MatchResult};
use crate::host::{InputElement, InputEvent, Navigator, RenderContext, Renderer, SelectCallback};

use super::lock;

/// A recorded render for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedRender {
    /// Compared values, in rendered order.
    pub values: Vec<String>,
    /// Highlight ranges per rendered item.
    pub highlights: Vec<Vec<HighlightRange>>,
    /// Item text as the renderer would show it.
    pub contents: Vec<String>,
    pub input_value: String,
    pub query_value: String,
    pub event: InputEvent,
    pub destination: Option<String>,
}

/// Mock implementation of the Renderer trait.
///
/// Records every render and close. The last render's selection callback is
/// kept so tests can simulate a pick with [`select`](Self::select).
#[derive(Default)]
pub struct MockRenderer {
    renders: Mutex<Vec<RecordedRender>>,
    closes: AtomicUsize,
    on_select: Mutex<Option<SelectCallback>>,
}

impl MockRenderer {
    /// Create a new mock renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded renders.
    pub fn renders(&self) -> Vec<RecordedRender> {
        lock(&self.renders).clone()
    }

    /// Get the most recent render.
    pub fn last_render(&self) -> Option<RecordedRender> {
        lock(&self.renders).last().cloned()
    }

    /// Get the number of close_all calls.
    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    /// Pick the item at `index` of the last render.
    ///
    /// Returns false when nothing has been rendered yet.
    pub fn select(&self, index: usize) -> bool {
        let on_select = lock(&self.on_select).clone();
        match on_select {
            Some(on_select) => {
                on_select(index);
                true
            }
            None => false,
        }
    }
}

impl Renderer for MockRenderer {
    fn close_all(&self, _input: &dyn InputElement) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }

    fn render(&self, list: &[MatchResult], event: &InputEvent, context: RenderContext) {
        lock(&self.renders).push(RecordedRender {
            values: list.iter().map(|m| m.compared_value.clone()).collect(),
            contents: list.iter().map(|m| context.item_text(m)).collect(),
            highlights: list.iter().map(|m| m.highlight.clone()).collect(),
            input_value: context.input_value,
            query_value: context.query_value,
            event: event.clone(),
            destination: context.results_list.destination,
        });
        *lock(&self.on_select) = Some(context.on_select);
    }
}

impl std::fmt::Debug for MockRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRenderer")
            .field("renders", &lock(&self.renders).len())
            .field("closes", &self.close_count())
            .finish()
    }
}

/// Mock implementation of the Navigator trait.
#[derive(Debug, Default)]
pub struct MockNavigator {
    armed: Mutex<Vec<String>>,
}

impl MockNavigator {
    /// Create a new mock navigator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the ids of inputs navigation was armed for, in call order.
    pub fn armed(&self) -> Vec<String> {
        lock(&self.armed).clone()
    }
}

impl Navigator for MockNavigator {
    fn arm(&self, input: &dyn InputElement) {
        lock(&self.armed).push(input.id().to_string());
    }
}
