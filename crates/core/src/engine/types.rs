//! Shared types for matching operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Span of characters in a compared value that contributed to a match.
/// `start` is inclusive, `end` exclusive, both in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sort key produced by a strategy. Smaller ranks sort first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Rank {
    pub primary: u32,
    pub secondary: u32,
    pub tertiary: u32,
}

impl Rank {
    pub fn new(primary: usize, secondary: usize) -> Self {
        Self {
            primary: saturate(primary),
            secondary: saturate(secondary),
            tertiary: 0,
        }
    }

    pub fn with_tertiary(mut self, tertiary: usize) -> Self {
        self.tertiary = saturate(tertiary);
        self
    }
}

fn saturate(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// What a strategy reports for a matching value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyMatch {
    pub rank: Rank,
    pub ranges: Vec<HighlightRange>,
}

impl StrategyMatch {
    pub fn new(rank: Rank, ranges: Vec<HighlightRange>) -> Self {
        Self { rank, ranges }
    }
}

/// One dataset item that matched the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Position of the item in the dataset.
    pub index: usize,
    /// The item as supplied.
    pub item: Value,
    /// The string the strategy compared against.
    pub compared_value: String,
    /// Ascending, non-overlapping, within `compared_value`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlight: Vec<HighlightRange>,
    pub matched: bool,
    pub rank: Rank,
}

impl MatchResult {
    /// Split the compared value into plain and highlighted runs.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        let value = self.compared_value.as_str();
        let mut offsets: Vec<usize> = value.char_indices().map(|(i, _)| i).collect();
        offsets.push(value.len());
        let chars = offsets.len() - 1;
        let byte = |c: usize| offsets[c.min(chars)];

        let mut segments = Vec::new();
        let mut cursor = 0;
        for range in &self.highlight {
            if range.start > cursor {
                segments.push(Segment {
                    text: &value[byte(cursor)..byte(range.start)],
                    highlighted: false,
                });
            }
            segments.push(Segment {
                text: &value[byte(range.start)..byte(range.end)],
                highlighted: true,
            });
            cursor = range.end;
        }
        if cursor < chars {
            segments.push(Segment {
                text: &value[byte(cursor)..],
                highlighted: false,
            });
        }
        segments
    }
}

/// A run of text within a compared value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Ranked, truncated matches for one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResultSet {
    /// The query value that was compared.
    pub query: String,
    /// At most `max_results` matches.
    pub list: Vec<MatchResult>,
    /// Number of matches before truncation.
    pub match_count: usize,
}

impl RankedResultSet {
    pub fn values(&self) -> Vec<&str> {
        self.list.iter().map(|m| m.compared_value.as_str()).collect()
    }
}

/// Clamp, sort and merge ranges so they satisfy the highlight invariants.
pub(crate) fn normalize_ranges(mut ranges: Vec<HighlightRange>, len: usize) -> Vec<HighlightRange> {
    for range in &mut ranges {
        range.end = range.end.min(len);
    }
    ranges.retain(|range| range.start < range.end);
    ranges.sort_by_key(|range| range.start);

    let mut merged: Vec<HighlightRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}

/// Collapse sorted character positions into contiguous ranges.
pub(crate) fn ranges_from_positions(positions: &[usize]) -> Vec<HighlightRange> {
    let mut ranges: Vec<HighlightRange> = Vec::new();
    for &position in positions {
        match ranges.last_mut() {
            Some(last) if last.end == position => last.end += 1,
            _ => ranges.push(HighlightRange::new(position, position + 1)),
        }
    }
    ranges
}
