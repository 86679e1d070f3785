use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use serde_json::Value;
use thiserror::Error;

/// Shared, read-only dataset.
pub type Dataset = Arc<Vec<Value>>;

/// Errors that can occur while acquiring the dataset.
#[derive(Debug, Clone, Error)]
pub enum AcquisitionError {
    #[error("Data provider failed: {0}")]
    ProviderFailed(String),

    #[error("Data provider panicked: {0}")]
    ProviderPanicked(String),
}

/// Trait for supplying the dataset lazily.
///
/// Called once per instance in cache mode and once per admitted event in
/// stream mode.
#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Value>, AcquisitionError>;
}

/// Resolved data source. Literal and lazy supplies are fetched the same way.
#[derive(Clone)]
pub enum DataSource {
    Static(Dataset),
    Provider(Arc<dyn DataProvider>),
}

impl DataSource {
    pub fn from_values(values: Vec<Value>) -> Self {
        DataSource::Static(Arc::new(values))
    }

    pub fn from_provider<P: DataProvider + 'static>(provider: P) -> Self {
        DataSource::Provider(Arc::new(provider))
    }

    /// Wrap an async closure as a provider.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<Value>, AcquisitionError>> + Send + 'static,
    {
        DataSource::Provider(Arc::new(FnProvider { f }))
    }

    /// Acquire the dataset. A panicking provider is reported as an error.
    pub async fn fetch(&self) -> Result<Dataset, AcquisitionError> {
        match self {
            DataSource::Static(values) => Ok(Arc::clone(values)),
            DataSource::Provider(provider) => {
                let values = AssertUnwindSafe(provider.fetch())
                    .catch_unwind()
                    .await
                    .map_err(|panic| AcquisitionError::ProviderPanicked(panic_message(&*panic)))??;
                Ok(Arc::new(values))
            }
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, DataSource::Provider(_))
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Static(values) => f.debug_tuple("Static").field(&values.len()).finish(),
            DataSource::Provider(_) => f.write_str("Provider"),
        }
    }
}

struct FnProvider<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> DataProvider for FnProvider<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Value>, AcquisitionError>> + Send,
{
    async fn fetch(&self) -> Result<Vec<Value>, AcquisitionError> {
        (self.f)().await
    }
}

pub(crate) fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
