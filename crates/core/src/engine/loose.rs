//! In-order character matching with gaps.

use super::text::fold;
use super::traits::MatchStrategy;
use super::types::{ranges_from_positions, Rank, StrategyMatch};

/// Matches values containing every query character in order, gaps allowed.
///
/// Whitespace in the query is ignored. Characters are consumed greedily from
/// the left, so the first viable position of each character is highlighted.
/// Ranks by first matched position, then by span of the match, then by
/// value length.
#[derive(Debug, Clone, Copy, Default)]
pub struct LooseStrategy;

impl LooseStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl MatchStrategy for LooseStrategy {
    fn name(&self) -> &str {
        "loose"
    }

    fn compare(&self, needle: &str, haystack: &str) -> Option<StrategyMatch> {
        let needle: Vec<char> = fold(needle)
            .into_iter()
            .filter(|c| !c.is_whitespace())
            .collect();
        let haystack = fold(haystack);
        let len = haystack.len();

        if needle.is_empty() {
            return Some(StrategyMatch::new(Rank::new(0, 0).with_tertiary(len), Vec::new()));
        }

        let mut wanted = needle.iter().peekable();
        let mut positions = Vec::with_capacity(needle.len());
        for (position, c) in haystack.iter().enumerate() {
            match wanted.peek() {
                Some(&&w) if w == *c => {
                    positions.push(position);
                    wanted.next();
                }
                Some(_) => {}
                None => break,
            }
        }

        if wanted.peek().is_some() {
            return None;
        }

        let first = *positions.first()?;
        let last = *positions.last()?;
        Some(StrategyMatch::new(
            Rank::new(first, last - first + 1).with_tertiary(len),
            ranges_from_positions(&positions),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::HighlightRange;

    #[test]
    fn test_scattered_characters_match() {
        let m = LooseStrategy.compare("gpe", "grape").unwrap();
        assert_eq!(
            m.ranges,
            vec![HighlightRange::new(0, 1), HighlightRange::new(3, 5)]
        );
        assert_eq!(m.rank, Rank::new(0, 5).with_tertiary(5));
    }

    #[test]
    fn test_spaces_in_query_ignored() {
        let m = LooseStrategy.compare("n y", "New York").unwrap();
        assert_eq!(
            m.ranges,
            vec![HighlightRange::new(0, 1), HighlightRange::new(4, 5)]
        );
    }

    #[test]
    fn test_out_of_order_fails() {
        assert!(LooseStrategy.compare("ea", "apple").is_none());
    }

    #[test]
    fn test_tighter_span_ranks_first() {
        let tight = LooseStrategy.compare("ab", "xabxxxxx").unwrap();
        let wide = LooseStrategy.compare("ab", "xaxxxxbx").unwrap();
        assert!(tight.rank < wide.rank);
    }

    #[test]
    fn test_empty_query_matches() {
        let m = LooseStrategy.compare("   ", "anything").unwrap();
        assert!(m.ranges.is_empty());
    }
}
