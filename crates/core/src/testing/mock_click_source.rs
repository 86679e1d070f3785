//! Mock outside-click source for testing.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::host::{InputElement, OutsideClickSource, Subscription};

use super::lock;

type Handlers = Arc<Mutex<Vec<(u64, Arc<dyn Fn() + Send + Sync>)>>>;

/// Mock implementation of the OutsideClickSource trait.
///
/// Tracks live subscriptions; [`click_outside`](Self::click_outside) invokes
/// every live handler.
#[derive(Default)]
pub struct MockClickSource {
    handlers: Handlers,
    next_id: AtomicU64,
    total: AtomicUsize,
}

impl MockClickSource {
    /// Create a new mock click source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a click outside every subscribed input.
    pub fn click_outside(&self) {
        let handlers: Vec<_> = lock(&self.handlers)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler();
        }
    }

    /// Get the number of subscriptions ever made.
    pub fn subscriptions(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// Get the number of subscriptions still live.
    pub fn active(&self) -> usize {
        lock(&self.handlers).len()
    }
}

impl OutsideClickSource for MockClickSource {
    fn subscribe(
        &self,
        _input: &dyn InputElement,
        on_outside: Box<dyn Fn() + Send + Sync>,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.total.fetch_add(1, Ordering::SeqCst);
        lock(&self.handlers).push((id, Arc::from(on_outside)));

        let handlers = Arc::clone(&self.handlers);
        Subscription::new(move || {
            lock(&handlers).retain(|(handler_id, _)| *handler_id != id);
        })
    }
}

impl std::fmt::Debug for MockClickSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClickSource")
            .field("active", &self.active())
            .field("subscriptions", &self.subscriptions())
            .finish()
    }
}
