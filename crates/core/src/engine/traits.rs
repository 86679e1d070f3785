//! Strategy trait for the matching engine.

use super::types::StrategyMatch;

/// Trait for comparing a query against one comparable value.
///
/// Implementations must be pure: the same `(needle, haystack)` always yields
/// the same answer. Highlight ranges are character offsets into `haystack`;
/// a strategy that cannot attribute the match may return none.
pub trait MatchStrategy: Send + Sync {
    /// Name of this strategy for logging.
    fn name(&self) -> &str;

    /// Compare `needle` against `haystack`.
    ///
    /// Returns `None` when the value does not match.
    fn compare(&self, needle: &str, haystack: &str) -> Option<StrategyMatch>;
}
