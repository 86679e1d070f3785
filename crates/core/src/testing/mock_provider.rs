//! Mock data provider for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::data::{AcquisitionError, DataProvider};

use super::lock;

/// Mock implementation of the DataProvider trait.
///
/// Cheaply cloneable; clones share state, so a test can keep one clone for
/// assertions and hand the other to the widget.
///
/// Queued responses are served first, then the default dataset.
#[derive(Clone, Default)]
pub struct MockProvider {
    dataset: Arc<Mutex<Vec<Value>>>,
    queued: Arc<Mutex<VecDeque<Result<Vec<Value>, AcquisitionError>>>>,
    delay: Arc<Mutex<Option<Duration>>>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider serving an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider serving `values`.
    pub fn with_dataset(values: Vec<Value>) -> Self {
        let provider = Self::new();
        provider.set_dataset(values);
        provider
    }

    /// Replace the default dataset.
    pub fn set_dataset(&self, values: Vec<Value>) {
        *lock(&self.dataset) = values;
    }

    /// Serve `response` on a future call, before the default dataset.
    pub fn push_response(&self, response: Result<Vec<Value>, AcquisitionError>) {
        lock(&self.queued).push_back(response);
    }

    /// Fail the next call.
    pub fn fail_next(&self, message: &str) {
        self.push_response(Err(AcquisitionError::ProviderFailed(message.to_string())));
    }

    /// Delay every fetch by `delay`.
    pub fn set_delay(&self, delay: Duration) {
        *lock(&self.delay) = Some(delay);
    }

    /// Get the number of fetches performed.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn fetch(&self) -> Result<Vec<Value>, AcquisitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *lock(&self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let queued = lock(&self.queued).pop_front();
        match queued {
            Some(response) => response,
            None => Ok(lock(&self.dataset).clone()),
        }
    }
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_queued_responses_come_first() {
        let provider = MockProvider::with_dataset(vec![json!("default")]);
        provider.fail_next("offline");
        provider.push_response(Ok(vec![json!("queued")]));

        assert!(provider.fetch().await.is_err());
        assert_eq!(provider.fetch().await.unwrap(), vec![json!("queued")]);
        assert_eq!(provider.fetch().await.unwrap(), vec![json!("default")]);
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let provider = MockProvider::new();
        let handle = provider.clone();

        provider.fetch().await.unwrap();
        handle.set_dataset(vec![json!(1)]);

        assert_eq!(provider.fetch().await.unwrap(), vec![json!(1)]);
        assert_eq!(handle.call_count(), 2);
    }
}
