//! Core data types shared by the dataset, query, and filter modules.

use std::ops::RangeInclusive;
use std::sync::Arc;

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

/// One emoji sequence and the platform levels it renders on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiRecord {
    /// Unicode scalar values forming the sequence.
    pub codepoints: Vec<u32>,
    /// API levels on which the sequence renders, ascending. The first entry is
    /// the level that introduced it.
    pub api_support: Vec<i64>,
    /// Unicode Emoji version the sequence belongs to.
    pub emoji_level: f64,
    #[serde(default)]
    pub notes: String,
    /// Visual difference scores keyed by `"{from}_{to}"` level pairs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diffs: Option<FnvHashMap<String, f64>>,
}

impl EmojiRecord {
    /// Level at which the sequence first appeared.
    pub fn api_added(&self) -> Option<i64> {
        self.api_support.first().copied()
    }

    pub fn supports(&self, api_level: i64) -> bool {
        self.api_support.contains(&api_level)
    }

    /// Diff score stored under a `"{from}_{to}"` key.
    pub fn diff(&self, key: &str) -> Option<f64> {
        self.diffs.as_ref()?.get(key).copied()
    }

    /// Formats the codepoints as `U+1f600 U+fe0f`.
    pub fn codepoint_label(&self) -> String {
        self.codepoints
            .iter()
            .map(|cp| format!("U+{cp:x}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Renders the sequence as text, skipping values that are not scalars.
    pub fn as_text(&self) -> String {
        self.codepoints
            .iter()
            .filter_map(|cp| char::from_u32(*cp))
            .collect()
    }

    pub(crate) fn normalize(&mut self) {
        self.api_support.sort_unstable();
        self.api_support.dedup();
    }
}

/// Inclusive range of API levels seen in a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiRange {
    pub min: i64,
    pub max: i64,
}

impl ApiRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// A range that contains no levels.
    pub fn empty() -> Self {
        Self { min: 0, max: -1 }
    }

    /// Spans every level supported by any record.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a EmojiRecord>,
    {
        let mut bounds: Option<(i64, i64)> = None;
        for level in records
            .into_iter()
            .flat_map(|record| record.api_support.iter().copied())
        {
            bounds = Some(match bounds {
                None => (level, level),
                Some((min, max)) => (min.min(level), max.max(level)),
            });
        }
        match bounds {
            Some((min, max)) => Self { min, max },
            None => Self::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn levels(&self) -> RangeInclusive<i64> {
        self.min..=self.max
    }
}

/// Result of evaluating one query against the dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    /// API levels to show as columns, ascending.
    pub visible_api_levels: Vec<i64>,
    /// Matching records in dataset order.
    pub matches: Vec<Arc<EmojiRecord>>,
    pub match_count: usize,
}
