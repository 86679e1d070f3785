//! Word-prefix matching.

use super::text::fold;
use super::traits::MatchStrategy;
use super::types::{HighlightRange, Rank, StrategyMatch};

/// Matches when every query token is a prefix of some word in the value.
///
/// Tokens and words are split on anything that is not alphanumeric. Ranks by
/// the earliest word hit, then by shorter value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenPrefixStrategy;

impl TokenPrefixStrategy {
    pub fn new() -> Self {
        Self
    }
}

fn word_spans(chars: &[char]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in chars.iter().enumerate() {
        match (c.is_alphanumeric(), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, chars.len()));
    }
    spans
}

impl MatchStrategy for TokenPrefixStrategy {
    fn name(&self) -> &str {
        "token_prefix"
    }

    fn compare(&self, needle: &str, haystack: &str) -> Option<StrategyMatch> {
        let needle = fold(needle);
        let haystack = fold(haystack);
        let tokens: Vec<&[char]> = word_spans(&needle)
            .into_iter()
            .map(|(s, e)| &needle[s..e])
            .collect();

        if tokens.is_empty() {
            return Some(StrategyMatch::new(Rank::new(0, haystack.len()), Vec::new()));
        }

        let words = word_spans(&haystack);
        let mut first_word = usize::MAX;
        let mut ranges = Vec::with_capacity(tokens.len());
        for token in tokens {
            let (word_index, &(start, _)) = words
                .iter()
                .enumerate()
                .find(|&(_, &(s, e))| haystack[s..e].starts_with(token))?;
            first_word = first_word.min(word_index);
            ranges.push(HighlightRange::new(start, start + token.len()));
        }

        Some(StrategyMatch::new(Rank::new(first_word, haystack.len()), ranges))
    }
}
