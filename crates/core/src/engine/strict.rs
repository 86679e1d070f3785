//! Case-insensitive substring containment.

use super::text::fold;
use super::traits::MatchStrategy;
use super::types::{HighlightRange, Rank, StrategyMatch};

/// Matches values containing the query as a contiguous substring.
///
/// Ranks by earliest occurrence, then by shorter value. Only the first
/// occurrence is highlighted.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictStrategy;

impl StrictStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl MatchStrategy for StrictStrategy {
    fn name(&self) -> &str {
        "strict"
    }

    fn compare(&self, needle: &str, haystack: &str) -> Option<StrategyMatch> {
        let needle = fold(needle);
        let haystack = fold(haystack);
        let len = haystack.len();

        if needle.is_empty() {
            return Some(StrategyMatch::new(Rank::new(0, len), Vec::new()));
        }

        let start = haystack
            .windows(needle.len())
            .position(|window| window == needle.as_slice())?;

        Some(StrategyMatch::new(
            Rank::new(start, len),
            vec![HighlightRange::new(start, start + needle.len())],
        ))
    }
}
