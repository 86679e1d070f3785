//! Matching and ranking engine.
//!
//! [`search`] is a pure function of `(query, dataset, settings)`: it filters
//! the dataset through the configured [`MatchStrategy`], optionally orders the
//! matches by [`Rank`], and truncates to `max_results` last. Nothing here
//! touches shared state, so concurrent calls for different queries are safe.

mod fuzzy;
mod loose;
mod strict;
mod text;
mod token_prefix;
mod traits;
mod types;

pub use fuzzy::FuzzyStrategy;
pub use loose::LooseStrategy;
pub use strict::StrictStrategy;
pub use token_prefix::TokenPrefixStrategy;
pub use traits::MatchStrategy;
pub use types::{HighlightRange, MatchResult, Rank, RankedResultSet, Segment, StrategyMatch};

use std::sync::Arc;

use serde_json::Value;

use crate::config::{SearchEngine, Settings};
use crate::data::comparable_value;
use types::normalize_ranges;

/// Create the strategy for a built-in engine.
pub fn create_strategy(engine: SearchEngine) -> Arc<dyn MatchStrategy> {
    match engine {
        SearchEngine::Strict => Arc::new(StrictStrategy::new()),
        SearchEngine::Loose => Arc::new(LooseStrategy::new()),
        SearchEngine::Fuzzy => Arc::new(FuzzyStrategy::new()),
        SearchEngine::TokenPrefix => Arc::new(TokenPrefixStrategy::new()),
    }
}

/// Match `query` against every item of `dataset`.
///
/// Items the strategy rejects, and keyed items lacking the key, are dropped
/// before sorting and truncation. With sorting enabled the order is by rank,
/// ties keeping dataset order.
pub fn search(query: &str, dataset: &[Value], settings: &Settings) -> RankedResultSet {
    let strategy = settings.strategy();
    let key = settings.dataset_key();

    let mut list: Vec<MatchResult> = dataset
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let compared_value = comparable_value(item, key)?;
            let found = strategy.compare(query, &compared_value)?;
            let highlight = if settings.highlight() {
                normalize_ranges(found.ranges, compared_value.chars().count())
            } else {
                Vec::new()
            };
            Some(MatchResult {
                index,
                item: item.clone(),
                compared_value,
                highlight,
                matched: true,
                rank: found.rank,
            })
        })
        .collect();

    let match_count = list.len();

    if settings.sort() {
        // sort_by_key is stable, so equal ranks keep dataset order
        list.sort_by_key(|result| result.rank);
    }
    list.truncate(settings.max_results());

    RankedResultSet {
        query: query.to_string(),
        list,
        match_count,
    }
}
