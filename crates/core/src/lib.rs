//! Live-filtering autocomplete core.
//!
//! Matches what a user types against a dataset, ranks and highlights the
//! matches, and hands them to a renderer or a feedback callback. Input events
//! are debounced; the dataset is fetched once or per event.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod events;
pub mod hooks;
pub mod host;
pub mod lifecycle;
pub mod metrics;
pub mod pipeline;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, AutocompleteOptions, ConfigError,
    ListPosition, SearchEngine, Settings, WidgetConfig,
};
pub use data::{AcquisitionError, DataProvider, DataSource, Dataset};
pub use engine::{
    create_strategy, search, HighlightRange, MatchResult, MatchStrategy, Rank, RankedResultSet,
    StrategyMatch,
};
pub use error::AutocompleteError;
pub use events::{EventBroadcaster, EventEnvelope, WidgetEvent};
pub use hooks::{HookError, NoResults, Selection};
pub use host::{
    ElementRegistry, ElementWatcher, Host, InputElement, InputEvent, Navigator,
    OutsideClickSource, RenderContext, Renderer, Subscription, WatchError,
};
pub use lifecycle::{Autocomplete, BindMode, LifecycleError, LifecycleState};
pub use pipeline::{PipelineError, QueryPipeline, RunOutcome};
