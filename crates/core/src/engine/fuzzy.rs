//! Scored fuzzy matching backed by nucleo.

use std::cell::RefCell;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use super::traits::MatchStrategy;
use super::types::{ranges_from_positions, Rank, StrategyMatch};

thread_local! {
    // Matcher keeps scratch space; one per thread keeps compare() lock-free.
    static MATCHER: RefCell<Matcher> = RefCell::new(Matcher::new(Config::DEFAULT));
}

/// Fuzzy matching with nucleo's scoring.
///
/// Higher scores rank first, then shorter values. Whitespace separates query
/// atoms that must all match; every other query character is literal, so
/// `!`, `^`, `$` and `'` carry no operator meaning. Highlight positions are
/// character offsets of the characters nucleo attributes the score to.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyStrategy;

impl FuzzyStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl MatchStrategy for FuzzyStrategy {
    fn name(&self) -> &str {
        "fuzzy"
    }

    fn compare(&self, needle: &str, haystack: &str) -> Option<StrategyMatch> {
        let pattern = Pattern::new(
            needle,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        // One slot per char: Utf32Str::new would fold graphemes and shift indices.
        let chars: Vec<char> = haystack.chars().collect();
        let mut indices = Vec::new();

        let score = MATCHER.with(|matcher| {
            let mut matcher = matcher.borrow_mut();
            pattern.indices(Utf32Str::Unicode(&chars), &mut matcher, &mut indices)
        })?;

        indices.sort_unstable();
        indices.dedup();
        let positions: Vec<usize> = indices.into_iter().map(|i| i as usize).collect();

        Some(StrategyMatch::new(
            Rank::new((u32::MAX - score) as usize, chars.len()),
            ranges_from_positions(&positions),
        ))
    }
}
