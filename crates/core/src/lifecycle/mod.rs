//! Widget lifecycle.
//!
//! An [`Autocomplete`] waits for its input element, binds in cache or stream
//! mode, then feeds debounced input events into the [`QueryPipeline`] until it
//! is shut down or the input stops producing events.
//!
//! ```text
//! Unattached -> AwaitingElement -> Bound(cache|stream) -> Ready
//!                      |                   |
//!                      +----> Failed <-----+
//! ```

mod debounce;
mod state;

pub use debounce::Debouncer;
pub use state::{BindMode, LifecycleError, LifecycleState};

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::{AutocompleteOptions, ConfigError, Resolved, Settings};
use crate::data::{AcquisitionError, DataSource, Dataset};
use crate::error::AutocompleteError;
use crate::events::{EventBroadcaster, EventEnvelope, DEFAULT_EVENT_CAPACITY};
use crate::hooks::Hooks;
use crate::host::{Attachment, Host, InputElement, InputEvent};
use crate::metrics::{DATASET_ACQUISITIONS, LIFECYCLE_FAILURES, PIPELINE_RUNS};
use crate::pipeline::{PipelineError, QueryPipeline};

/// Handle to one widget instance.
///
/// Dropping the handle stops the lifecycle task.
pub struct Autocomplete {
    id: Uuid,
    settings: Arc<Settings>,
    events: EventBroadcaster,
    state: watch::Receiver<LifecycleState>,
    running: AtomicBool,
    shutdown_tx: broadcast::Sender<()>,
    driver: Mutex<Option<Driver>>,
    task: Mutex<Option<JoinHandle<Result<(), LifecycleError>>>>,
}

impl Autocomplete {
    /// Resolve `options` and prepare the instance.
    ///
    /// Fails immediately on invalid configuration or a missing data source.
    /// Nothing runs until [`start`](Self::start).
    pub fn new(options: AutocompleteOptions, host: Host) -> Result<Self, ConfigError> {
        let Resolved {
            settings,
            hooks,
            source,
            element,
        } = options.resolve()?;

        let id = Uuid::new_v4();
        let events = EventBroadcaster::new(id, DEFAULT_EVENT_CAPACITY);
        let (state_tx, state) = watch::channel(LifecycleState::Unattached);
        let (shutdown_tx, _) = broadcast::channel(1);

        let driver = Driver {
            id,
            settings: Arc::clone(&settings),
            hooks,
            source,
            element,
            host,
            events: events.clone(),
            state: state_tx,
        };

        Ok(Self {
            id,
            settings,
            events,
            state,
            running: AtomicBool::new(false),
            shutdown_tx,
            driver: Mutex::new(Some(driver)),
            task: Mutex::new(None),
        })
    }

    /// Spawn the lifecycle task. Must be called within a Tokio runtime.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!(instance = %self.id, "Autocomplete already started");
            return;
        }

        let Some(driver) = lock(&self.driver).take() else {
            return;
        };

        info!(instance = %self.id, selector = self.settings.selector(), "Starting autocomplete");
        let shutdown_rx = self.shutdown_tx.subscribe();
        *lock(&self.task) = Some(tokio::spawn(driver.run(shutdown_rx)));
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<LifecycleState> {
        self.state.clone()
    }

    /// Subscribe to `Connected` and `QueryAnalyzed` notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe()
    }

    /// Wait until the instance is listening, failed or stopped.
    pub async fn ready(&self) -> LifecycleState {
        let mut rx = self.state.clone();
        if let Ok(state) = rx.wait_for(LifecycleState::is_settled).await {
            return *state;
        }
        let state = *rx.borrow();
        state
    }

    /// Stop listening and wait for the lifecycle task to finish.
    ///
    /// Returns the error the instance failed with, if it failed before.
    pub async fn shutdown(&self) -> Result<(), LifecycleError> {
        info!(instance = %self.id, "Stopping autocomplete");
        let _ = self.shutdown_tx.send(());
        self.join().await
    }

    /// Wait for the lifecycle task to finish on its own.
    pub async fn join(&self) -> Result<(), LifecycleError> {
        let task = lock(&self.task).take();
        match task {
            Some(task) => task
                .await
                .map_err(|e| LifecycleError::Aborted(e.to_string()))?,
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Autocomplete {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Autocomplete")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Owns everything the lifecycle task needs.
struct Driver {
    id: Uuid,
    settings: Arc<Settings>,
    hooks: Hooks,
    source: DataSource,
    element: Option<Arc<dyn InputElement>>,
    host: Host,
    events: EventBroadcaster,
    state: watch::Sender<LifecycleState>,
}

impl Driver {
    async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> Result<(), LifecycleError> {
        let result = tokio::select! {
            _ = shutdown_rx.recv() => {
                info!(instance = %self.id, "Lifecycle received shutdown signal");
                Ok(())
            }
            result = self.drive() => result,
        };

        match &result {
            Ok(()) => {
                self.set_state(LifecycleState::Stopped);
                info!(instance = %self.id, "Autocomplete stopped");
            }
            Err(e) => {
                self.set_state(LifecycleState::Failed);
                LIFECYCLE_FAILURES.with_label_values(&[e.reason()]).inc();
                error!(instance = %self.id, error = %e, "Autocomplete failed");
                self.hooks.report(&AutocompleteError::Lifecycle(e.clone()));
            }
        }
        result
    }

    async fn drive(&self) -> Result<(), LifecycleError> {
        self.set_state(LifecycleState::AwaitingElement);
        let Attachment { element, context } = self.attach().await?;
        info!(instance = %self.id, element = element.id(), "Bound to input element");
        self.events.connected(self.settings.selector(), context);

        let mode = if self.settings.cache() {
            BindMode::Cache
        } else {
            BindMode::Stream
        };
        self.set_state(LifecycleState::Bound(mode));

        let cached = match mode {
            BindMode::Cache => Some(self.acquire(mode).await?),
            BindMode::Stream => None,
        };

        if let Some(placeholder) = self.settings.placeholder() {
            element.set_placeholder(placeholder);
        }

        let pipeline = QueryPipeline::new(
            Arc::clone(&self.settings),
            self.hooks.clone(),
            self.host.clone(),
            self.events.clone(),
        );
        let mut input_events = Debouncer::new(
            element.listen(self.settings.trigger_events()),
            self.settings.debounce(),
        );
        self.set_state(LifecycleState::Ready(mode));
        info!(instance = %self.id, mode = mode.as_str(), "Autocomplete ready");

        while let Some(event) = input_events.next().await {
            let dataset = match &cached {
                Some(dataset) => Arc::clone(dataset),
                None => match self.acquire(mode).await {
                    Ok(dataset) => dataset,
                    Err(e) => {
                        warn!(instance = %self.id, error = %e, "Skipping run, dataset unavailable");
                        self.hooks.report(&AutocompleteError::Acquisition(e));
                        continue;
                    }
                },
            };
            self.run_isolated(&pipeline, &event, &element, &dataset);
        }

        info!(instance = %self.id, "Input listener closed");
        pipeline.detach();
        Ok(())
    }

    async fn attach(&self) -> Result<Attachment, LifecycleError> {
        let selector = self.settings.selector();
        if let Some(element) = &self.element {
            return Ok(Attachment {
                element: Arc::clone(element),
                context: json!({ "selector": selector, "already_present": true }),
            });
        }

        let wait = self.host.watcher.wait_for(selector);
        match self.settings.attach_timeout() {
            Some(timeout) => tokio::time::timeout(timeout, wait)
                .await
                .map_err(|_| LifecycleError::AttachTimeout {
                    selector: selector.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                })?
                .map_err(LifecycleError::from),
            None => Ok(wait.await?),
        }
    }

    async fn acquire(&self, mode: BindMode) -> Result<Dataset, AcquisitionError> {
        let result = self.source.fetch().await;
        let label = match &result {
            Ok(dataset) => {
                debug!(instance = %self.id, items = dataset.len(), "Dataset acquired");
                "success"
            }
            Err(_) => "failed",
        };
        DATASET_ACQUISITIONS
            .with_label_values(&[mode.as_str(), label])
            .inc();
        result
    }

    /// Run the pipeline once. Failures and panics end this run only.
    fn run_isolated(
        &self,
        pipeline: &QueryPipeline,
        event: &InputEvent,
        element: &Arc<dyn InputElement>,
        dataset: &Dataset,
    ) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pipeline.run(event, element, dataset)
        }));

        let error = match outcome {
            Ok(Ok(outcome)) => {
                debug!(
                    instance = %self.id,
                    outcome = outcome.as_str(),
                    matched = outcome.matched(),
                    "Pipeline run finished"
                );
                return;
            }
            Ok(Err(e)) => e,
            Err(panic) => {
                PIPELINE_RUNS.with_label_values(&["failed"]).inc();
                PipelineError::HookPanicked(crate::data::panic_message(&*panic))
            }
        };

        warn!(instance = %self.id, error = %error, "Pipeline run failed");
        self.hooks.report(&AutocompleteError::Pipeline(error));
    }

    fn set_state(&self, state: LifecycleState) {
        debug!(instance = %self.id, state = ?state, "Lifecycle transition");
        self.state.send_replace(state);
    }
}
