//! Per-event query pipeline.
//!
//! One [`QueryPipeline::run`] per admitted input event:
//!
//! 0. close any open results for the input
//! 1. read the live input value
//! 2. apply the query interceptor
//! 3. evaluate the trigger (predicate, or `len > threshold`)
//! 4. match, emit `QueryAnalyzed`, then branch to `no_results`, `feedback`
//!    or the renderer

mod types;

pub use types::{PipelineError, RunOutcome};

use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

use crate::config::Settings;
use crate::engine::{self, MatchResult};
use crate::events::EventBroadcaster;
use crate::hooks::{Hooks, NoResults, Selection};
use crate::host::{Host, InputElement, InputEvent, RenderContext, SelectCallback, Subscription};
use crate::metrics::{ENGINE_DURATION, MATCHES_PER_QUERY, PIPELINE_RUNS};

/// Runs the query pipeline for one widget instance.
pub struct QueryPipeline {
    settings: Arc<Settings>,
    hooks: Hooks,
    host: Host,
    events: EventBroadcaster,
    outside_click: Mutex<Option<Subscription>>,
}

impl QueryPipeline {
    pub fn new(
        settings: Arc<Settings>,
        hooks: Hooks,
        host: Host,
        events: EventBroadcaster,
    ) -> Self {
        Self {
            settings,
            hooks,
            host,
            events,
            outside_click: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the pipeline for `event` against `dataset`.
    pub fn run(
        &self,
        event: &InputEvent,
        input: &Arc<dyn InputElement>,
        dataset: &[Value],
    ) -> Result<RunOutcome, PipelineError> {
        let result = self.run_inner(event, input, dataset);
        let outcome = match &result {
            Ok(outcome) => outcome.as_str(),
            Err(_) => "failed",
        };
        PIPELINE_RUNS.with_label_values(&[outcome]).inc();
        result
    }

    fn run_inner(
        &self,
        event: &InputEvent,
        input: &Arc<dyn InputElement>,
        dataset: &[Value],
    ) -> Result<RunOutcome, PipelineError> {
        self.host.renderer.close_all(input.as_ref());

        let input_value = input.value();
        let query_value = match self.prepare_query(&input_value)? {
            Some(query_value) => query_value,
            None => {
                debug!(input = input.id(), "Query suppressed by interceptor");
                return Ok(RunOutcome::Skipped);
            }
        };

        if !self.is_triggered(&query_value)? {
            debug!(input = input.id(), query = %query_value, "Trigger not satisfied");
            return Ok(RunOutcome::Skipped);
        }

        let timer = ENGINE_DURATION
            .with_label_values(&[self.settings.strategy().name()])
            .start_timer();
        let results = engine::search(&query_value, dataset, &self.settings);
        timer.observe_duration();
        MATCHES_PER_QUERY
            .with_label_values(&[])
            .observe(results.match_count as f64);

        self.events
            .query_analyzed(&input_value, &query_value, &results);

        if dataset.is_empty() {
            if let Some(no_results) = &self.hooks.no_results {
                no_results(&NoResults {
                    input_value,
                    query_value,
                });
            }
            return Ok(RunOutcome::NoResults);
        }

        if !self.settings.results_list().render {
            if let Some(feedback) = &self.hooks.feedback {
                feedback(&results);
            }
            return Ok(RunOutcome::Feedback {
                match_count: results.match_count,
            });
        }

        let shown = results.list.len();
        let list = Arc::new(results.list);
        let context = RenderContext {
            on_select: self.select_callback(&input_value, &query_value, &list),
            input_value,
            query_value,
            results_list: self.settings.results_list().clone(),
            result_item: self.settings.result_item().clone(),
            item_content: self.hooks.item_content.clone(),
        };
        self.host.renderer.render(&list, event, context);
        self.host.navigator.arm(input.as_ref());
        self.ensure_outside_click(input);

        debug!(input = input.id(), shown, "Results rendered");
        Ok(RunOutcome::Rendered { shown })
    }

    /// Apply the interceptor. `None` means matching is suppressed.
    fn prepare_query(&self, input_value: &str) -> Result<Option<String>, PipelineError> {
        match &self.hooks.query {
            Some(query) => Ok(query(input_value)?.filter(|value| !value.is_empty())),
            None => Ok(Some(input_value.to_string())),
        }
    }

    fn is_triggered(&self, query_value: &str) -> Result<bool, PipelineError> {
        match self.settings.trigger_condition() {
            Some(condition) => Ok(condition(query_value)?),
            None => Ok(query_value.chars().count() > self.settings.threshold()),
        }
    }

    fn select_callback(
        &self,
        input_value: &str,
        query_value: &str,
        list: &Arc<Vec<MatchResult>>,
    ) -> SelectCallback {
        let on_selection = self.hooks.on_selection.clone();
        let input_value = input_value.to_string();
        let query_value = query_value.to_string();
        let list = Arc::clone(list);
        Arc::new(move |index| {
            let (Some(on_selection), Some(result)) = (&on_selection, list.get(index)) else {
                return;
            };
            on_selection(&Selection {
                input_value: input_value.clone(),
                query_value: query_value.clone(),
                index,
                result: result.clone(),
            });
        })
    }

    /// Subscribe to outside clicks once per instance.
    fn ensure_outside_click(&self, input: &Arc<dyn InputElement>) {
        let mut subscription = match self.outside_click.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if subscription.is_some() {
            return;
        }

        let renderer = Arc::clone(&self.host.renderer);
        let target = Arc::clone(input);
        *subscription = Some(self.host.clicks.subscribe(
            input.as_ref(),
            Box::new(move || renderer.close_all(target.as_ref())),
        ));
    }

    /// Drop the outside-click subscription.
    pub fn detach(&self) {
        let subscription = match self.outside_click.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        drop(subscription);
    }
}
