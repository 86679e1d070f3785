use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::data::{DataProvider, DataSource};
use crate::engine::{MatchResult, MatchStrategy, RankedResultSet};
use crate::error::AutocompleteError;
use crate::hooks::{HookError, Hooks, NoResults, Selection, TriggerCondition};
use crate::host::InputElement;

use super::settings::Settings;
use super::types::WidgetConfig;
use super::ConfigError;

/// Declarative configuration plus everything that can only be given in code.
///
/// ```ignore
/// let resolved = AutocompleteOptions::new(config)
///     .with_data(vec![json!("apple"), json!("grape")])
///     .with_query(|raw| Ok(Some(raw.trim().to_string())))
///     .on_feedback(|results| println!("{}", results.match_count))
///     .resolve()?;
/// ```
#[derive(Default)]
pub struct AutocompleteOptions {
    config: WidgetConfig,
    source: Option<DataSource>,
    strategy: Option<Arc<dyn MatchStrategy>>,
    condition: Option<TriggerCondition>,
    hooks: Hooks,
    element: Option<Arc<dyn InputElement>>,
}

/// Output of [`AutocompleteOptions::resolve`].
pub struct Resolved {
    pub settings: Arc<Settings>,
    pub hooks: Hooks,
    pub source: DataSource,
    /// Element supplied directly, bypassing the watcher.
    pub element: Option<Arc<dyn InputElement>>,
}

impl AutocompleteOptions {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Literal dataset. Overrides `data.src` from the configuration.
    pub fn with_data(self, values: Vec<Value>) -> Self {
        self.with_source(DataSource::from_values(values))
    }

    pub fn with_provider<P: DataProvider + 'static>(self, provider: P) -> Self {
        self.with_source(DataSource::from_provider(provider))
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Transform the raw input value before matching.
    pub fn with_query<F>(mut self, interceptor: F) -> Self
    where
        F: Fn(&str) -> Result<Option<String>, HookError> + Send + Sync + 'static,
    {
        self.hooks.query = Some(Arc::new(interceptor));
        self
    }

    /// Replace the threshold rule.
    pub fn with_condition<F>(mut self, condition: F) -> Self
    where
        F: Fn(&str) -> Result<bool, HookError> + Send + Sync + 'static,
    {
        self.condition = Some(Arc::new(condition));
        self
    }

    /// Use a caller strategy instead of `search_engine`.
    pub fn with_strategy(mut self, strategy: Arc<dyn MatchStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_element(mut self, element: Arc<dyn InputElement>) -> Self {
        self.element = Some(element);
        self
    }

    pub fn on_no_results<F>(mut self, handler: F) -> Self
    where
        F: Fn(&NoResults) + Send + Sync + 'static,
    {
        self.hooks.no_results = Some(Arc::new(handler));
        self
    }

    /// Only called when `results_list.render` is false.
    pub fn on_feedback<F>(mut self, handler: F) -> Self
    where
        F: Fn(&RankedResultSet) + Send + Sync + 'static,
    {
        self.hooks.feedback = Some(Arc::new(handler));
        self
    }

    pub fn on_selection<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Selection) + Send + Sync + 'static,
    {
        self.hooks.on_selection = Some(Arc::new(handler));
        self
    }

    /// Format rendered items instead of showing the compared value.
    pub fn with_item_content<F>(mut self, content: F) -> Self
    where
        F: Fn(&MatchResult) -> String + Send + Sync + 'static,
    {
        self.hooks.item_content = Some(Arc::new(content));
        self
    }

    pub fn on_error<F>(mut self, handler: F) -> Self
    where
        F: Fn(&AutocompleteError) + Send + Sync + 'static,
    {
        self.hooks.on_error = Some(Arc::new(handler));
        self
    }

    /// Validate and freeze the options.
    pub fn resolve(self) -> Result<Resolved, ConfigError> {
        let mut settings = Settings::from_config(&self.config)?;
        if let Some(strategy) = self.strategy {
            settings = settings.with_strategy(strategy);
        }
        if let Some(condition) = self.condition {
            settings = settings.with_trigger_condition(condition);
        }

        let source = match (self.source, self.config.data.src) {
            (Some(source), _) => source,
            (None, Some(values)) => DataSource::from_values(values),
            (None, None) => return Err(ConfigError::MissingDataSource),
        };

        Ok(Resolved {
            settings: Arc::new(settings),
            hooks: self.hooks,
            source,
            element: self.element,
        })
    }
}

impl fmt::Debug for AutocompleteOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteOptions")
            .field("config", &self.config)
            .field("source", &self.source)
            .field("strategy", &self.strategy.as_ref().map(|s| s.name().to_string()))
            .field("condition", &self.condition.is_some())
            .field("hooks", &self.hooks)
            .field("element", &self.element.as_ref().map(|e| e.id().to_string()))
            .finish()
    }
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("settings", &self.settings)
            .field("hooks", &self.hooks)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_str;
    use crate::data::AcquisitionError;
    use crate::engine::StrategyMatch;
    use serde_json::json;

    #[test]
    fn test_missing_data_source_fails() {
        let result = AutocompleteOptions::new(WidgetConfig::default()).resolve();
        assert!(matches!(result, Err(ConfigError::MissingDataSource)));
    }

    #[tokio::test]
    async fn test_literal_src_from_config() {
        let config = load_config_from_str(
            r#"
[data]
src = ["apple", "banana"]
"#,
        )
        .unwrap();

        let resolved = AutocompleteOptions::new(config).resolve().unwrap();

        assert!(!resolved.source.is_lazy());
        assert_eq!(resolved.source.fetch().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_code_source_overrides_config() {
        let config = load_config_from_str(
            r#"
[data]
src = ["apple"]
"#,
        )
        .unwrap();

        let resolved = AutocompleteOptions::new(config)
            .with_source(DataSource::from_fn(|| async {
                Ok::<_, AcquisitionError>(vec![json!("kiwi"), json!("lime"), json!("fig")])
            }))
            .resolve()
            .unwrap();

        assert!(resolved.source.is_lazy());
        assert_eq!(resolved.source.fetch().await.unwrap().len(), 3);
    }

    #[test]
    fn test_empty_literal_is_a_source() {
        let resolved = AutocompleteOptions::new(WidgetConfig::default())
            .with_data(Vec::new())
            .resolve();
        assert!(resolved.is_ok());
    }

    #[test]
    fn test_invalid_config_fails_before_source_check() {
        let config = WidgetConfig {
            max_results: 0,
            ..Default::default()
        };
        let result = AutocompleteOptions::new(config).resolve();
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_code_hooks_are_carried() {
        struct Never;

        impl MatchStrategy for Never {
            fn name(&self) -> &str {
                "never"
            }

            fn compare(&self, _needle: &str, _haystack: &str) -> Option<StrategyMatch> {
                None
            }
        }

        let resolved = AutocompleteOptions::new(WidgetConfig::default())
            .with_data(vec![json!("apple")])
            .with_query(|raw| Ok(Some(raw.to_uppercase())))
            .with_condition(|query| Ok(query.len() >= 2))
            .with_strategy(Arc::new(Never))
            .on_feedback(|_| {})
            .resolve()
            .unwrap();

        assert_eq!(resolved.settings.strategy().name(), "never");
        assert!(resolved.settings.trigger_condition().is_some());
        assert!(resolved.hooks.query.is_some());
        assert!(resolved.hooks.feedback.is_some());
        assert!(resolved.hooks.no_results.is_none());
        assert!(resolved.element.is_none());
    }
}
