use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root widget configuration.
///
/// Every field has a default, so an empty document is a valid configuration
/// as far as parsing goes. The data source is the only mandatory piece and is
/// checked when the options are resolved.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WidgetConfig {
    /// Selector of the input element the widget attaches to.
    #[serde(default = "default_selector")]
    pub selector: String,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub trigger: TriggerConfig,
    /// Built-in matching strategy.
    #[serde(default)]
    pub search_engine: SearchEngine,
    /// Minimum query length; the default trigger requires `len > threshold`.
    #[serde(default)]
    pub threshold: usize,
    /// Quiet period before a burst of input events runs the pipeline.
    #[serde(default)]
    pub debounce_ms: u64,
    #[serde(default)]
    pub results_list: ResultsListConfig,
    /// Order matches by strength instead of dataset order.
    #[serde(default)]
    pub sort: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub result_item: ResultItemConfig,
    #[serde(default)]
    pub highlight: bool,
    /// Give up waiting for the input element after this long.
    /// Absent means wait forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach_timeout_ms: Option<u64>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            selector: default_selector(),
            data: DataConfig::default(),
            trigger: TriggerConfig::default(),
            search_engine: SearchEngine::default(),
            threshold: 0,
            debounce_ms: 0,
            results_list: ResultsListConfig::default(),
            sort: false,
            placeholder: None,
            max_results: default_max_results(),
            result_item: ResultItemConfig::default(),
            highlight: false,
            attach_timeout_ms: None,
        }
    }
}

fn default_selector() -> String {
    "#autoComplete".to_string()
}

fn default_max_results() -> usize {
    5
}

/// Dataset configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Literal dataset. A provider supplied in code takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<Vec<Value>>,
    /// Field compared when dataset items are objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Fetch once and reuse (true) or re-fetch on every admitted event (false).
    #[serde(default = "default_cache")]
    pub cache: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            src: None,
            key: None,
            cache: default_cache(),
        }
    }
}

fn default_cache() -> bool {
    true
}

/// Trigger configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TriggerConfig {
    /// Raw input event kinds the widget listens to.
    #[serde(default = "default_events")]
    pub events: Vec<String>,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            events: default_events(),
        }
    }
}

fn default_events() -> Vec<String> {
    vec!["input".to_string()]
}

/// Available built-in matching strategies
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchEngine {
    /// Case-insensitive substring containment.
    #[default]
    Strict,
    /// Query characters in order, gaps allowed, spaces ignored.
    Loose,
    /// Scored fuzzy matching.
    Fuzzy,
    /// Every query token prefixes a word of the value.
    TokenPrefix,
}

impl SearchEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchEngine::Strict => "strict",
            SearchEngine::Loose => "loose",
            SearchEngine::Fuzzy => "fuzzy",
            SearchEngine::TokenPrefix => "token_prefix",
        }
    }
}

/// Results list presentation settings, handed through to the renderer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResultsListConfig {
    /// When false the widget runs headless and reports through `feedback`.
    #[serde(default = "default_render")]
    pub render: bool,
    #[serde(default)]
    pub container: bool,
    /// Where the list is inserted. Defaults to the selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default)]
    pub position: ListPosition,
    #[serde(default = "default_list_element")]
    pub element: String,
    #[serde(default)]
    pub navigation: bool,
}

impl Default for ResultsListConfig {
    fn default() -> Self {
        Self {
            render: default_render(),
            container: false,
            destination: None,
            position: ListPosition::default(),
            element: default_list_element(),
            navigation: false,
        }
    }
}

fn default_render() -> bool {
    true
}

fn default_list_element() -> String {
    "ul".to_string()
}

/// Position of the results list relative to its destination.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListPosition {
    BeforeBegin,
    AfterBegin,
    BeforeEnd,
    #[default]
    AfterEnd,
}

/// Result item presentation settings
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResultItemConfig {
    #[serde(default = "default_item_element")]
    pub element: String,
}

impl Default for ResultItemConfig {
    fn default() -> Self {
        Self {
            element: default_item_element(),
        }
    }
}

fn default_item_element() -> String {
    "li".to_string()
}
