use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::{create_strategy, MatchStrategy};
use crate::hooks::TriggerCondition;

use super::types::{ResultItemConfig, ResultsListConfig, WidgetConfig};
use super::{validate_config, ConfigError};

/// Immutable settings of one widget instance.
///
/// Built once from a validated [`WidgetConfig`] and shared behind an `Arc`
/// by the engine, the pipeline and the lifecycle.
#[derive(Clone)]
pub struct Settings {
    selector: String,
    strategy: Arc<dyn MatchStrategy>,
    dataset_key: Option<String>,
    threshold: usize,
    max_results: usize,
    sort: bool,
    highlight: bool,
    debounce: Duration,
    cache: bool,
    trigger_condition: Option<TriggerCondition>,
    trigger_events: Vec<String>,
    placeholder: Option<String>,
    results_list: ResultsListConfig,
    result_item: ResultItemConfig,
    attach_timeout: Option<Duration>,
}

impl Settings {
    /// Validate `config` and resolve every default.
    pub fn from_config(config: &WidgetConfig) -> Result<Self, ConfigError> {
        validate_config(config)?;

        let mut results_list = config.results_list.clone();
        if results_list.destination.is_none() {
            results_list.destination = Some(config.selector.clone());
        }

        let trigger_events = config
            .trigger
            .events
            .iter()
            .map(|event| event.trim())
            .filter(|event| !event.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            selector: config.selector.clone(),
            strategy: create_strategy(config.search_engine),
            dataset_key: config.data.key.clone(),
            threshold: config.threshold,
            max_results: config.max_results,
            sort: config.sort,
            highlight: config.highlight,
            debounce: Duration::from_millis(config.debounce_ms),
            cache: config.data.cache,
            trigger_condition: None,
            trigger_events,
            placeholder: config.placeholder.clone(),
            results_list,
            result_item: config.result_item.clone(),
            attach_timeout: config.attach_timeout_ms.map(Duration::from_millis),
        })
    }

    /// Replace the built-in strategy.
    pub fn with_strategy(mut self, strategy: Arc<dyn MatchStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the threshold rule with a predicate.
    pub fn with_trigger_condition(mut self, condition: TriggerCondition) -> Self {
        self.trigger_condition = Some(condition);
        self
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn strategy(&self) -> &dyn MatchStrategy {
        self.strategy.as_ref()
    }

    pub fn dataset_key(&self) -> Option<&str> {
        self.dataset_key.as_deref()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    pub fn sort(&self) -> bool {
        self.sort
    }

    pub fn highlight(&self) -> bool {
        self.highlight
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn cache(&self) -> bool {
        self.cache
    }

    pub fn trigger_condition(&self) -> Option<&TriggerCondition> {
        self.trigger_condition.as_ref()
    }

    pub fn trigger_events(&self) -> &[String] {
        &self.trigger_events
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    /// Results list settings with `destination` filled in.
    pub fn results_list(&self) -> &ResultsListConfig {
        &self.results_list
    }

    pub fn result_item(&self) -> &ResultItemConfig {
        &self.result_item
    }

    pub fn attach_timeout(&self) -> Option<Duration> {
        self.attach_timeout
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("selector", &self.selector)
            .field("strategy", &self.strategy.name())
            .field("dataset_key", &self.dataset_key)
            .field("threshold", &self.threshold)
            .field("max_results", &self.max_results)
            .field("sort", &self.sort)
            .field("highlight", &self.highlight)
            .field("debounce", &self.debounce)
            .field("cache", &self.cache)
            .field("trigger_condition", &self.trigger_condition.is_some())
            .field("trigger_events", &self.trigger_events)
            .field("placeholder", &self.placeholder)
            .field("results_list", &self.results_list)
            .field("result_item", &self.result_item)
            .field("attach_timeout", &self.attach_timeout)
            .finish()
    }
}
