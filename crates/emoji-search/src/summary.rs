//! Per-API-level support counts.

use std::collections::BTreeMap;

use crate::types::{ApiRange, EmojiRecord};

/// How many sequences render at one API level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiLevelSummary {
    pub api_level: i64,
    pub supported: usize,
    /// Change from the previous listed level. For the first listed level this
    /// equals `supported`.
    pub delta: i64,
}

/// Counts supported sequences for every level in `range`, omitting levels
/// with no support at all.
pub fn summarize<'a, I>(records: I, range: ApiRange) -> Vec<ApiLevelSummary>
where
    I: IntoIterator<Item = &'a EmojiRecord>,
{
    let mut counts = BTreeMap::<i64, usize>::new();
    for record in records {
        for level in &record.api_support {
            if range.levels().contains(level) {
                *counts.entry(*level).or_default() += 1;
            }
        }
    }

    let mut previous: Option<usize> = None;
    counts
        .into_iter()
        .map(|(api_level, supported)| {
            let delta = match previous {
                Some(prior) => supported as i64 - prior as i64,
                None => supported as i64,
            };
            previous = Some(supported);
            ApiLevelSummary {
                api_level,
                supported,
                delta,
            }
        })
        .collect()
}
