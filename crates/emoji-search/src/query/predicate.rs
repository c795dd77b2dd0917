//! Typed predicates built from query clauses.

use crate::error::Result;
use crate::types::EmojiRecord;

use super::field::FieldName;
use super::note::NoteMatcher;
use super::parser::QueryToken;
use super::range::{NumericRange, Radix};

/// Upper bound used by `diff:F` when no `..` is given.
pub const DEFAULT_DIFF_UPPER: f64 = 1.0;

/// A compiled test over one record field.
#[derive(Debug, Clone)]
pub enum FieldPredicate {
    /// Any codepoint in range.
    Codepoints(NumericRange<i64>),
    EmojiLevel(NumericRange<f64>),
    /// Any supported level in range.
    ApiSupport(NumericRange<i64>),
    /// Introduction level in range.
    ApiAdded(NumericRange<i64>),
    Notes(NoteMatcher),
    /// Largest diff over the visible level pairs in range.
    Diffs(NumericRange<f64>),
}

impl FieldPredicate {
    pub fn build(token: &QueryToken) -> Result<Self> {
        let raw = token.raw.as_str();
        Ok(match token.field {
            FieldName::Codepoints => Self::Codepoints(NumericRange::parse(raw, Radix::Hex)?),
            FieldName::EmojiLevel => Self::EmojiLevel(NumericRange::parse(raw, Radix::Decimal)?),
            FieldName::ApiSupport => Self::ApiSupport(NumericRange::parse(raw, Radix::Decimal)?),
            FieldName::ApiAdded => Self::ApiAdded(NumericRange::parse(raw, Radix::Decimal)?),
            FieldName::Notes => Self::Notes(NoteMatcher::parse(raw)?),
            FieldName::Diffs => Self::Diffs(NumericRange::parse_with_default_upper(
                raw,
                Radix::Decimal,
                DEFAULT_DIFF_UPPER,
            )?),
        })
    }

    pub fn field(&self) -> FieldName {
        match self {
            Self::Codepoints(_) => FieldName::Codepoints,
            Self::EmojiLevel(_) => FieldName::EmojiLevel,
            Self::ApiSupport(_) => FieldName::ApiSupport,
            Self::ApiAdded(_) => FieldName::ApiAdded,
            Self::Notes(_) => FieldName::Notes,
            Self::Diffs(_) => FieldName::Diffs,
        }
    }

    /// Whether an `api:` clause admits `level` as a visible column. Other
    /// clauses never restrict columns and return `None`.
    pub fn admits_api_level(&self, level: i64) -> Option<bool> {
        match self {
            Self::ApiSupport(range) => Some(range.contains(level)),
            _ => None,
        }
    }

    pub fn matches(&self, record: &EmojiRecord, context: &PredicateContext) -> bool {
        match self {
            Self::Codepoints(range) => record
                .codepoints
                .iter()
                .any(|cp| range.contains(i64::from(*cp))),
            Self::EmojiLevel(range) => range.contains(record.emoji_level),
            Self::ApiSupport(range) => record.api_support.iter().any(|level| range.contains(*level)),
            Self::ApiAdded(range) => record
                .api_added()
                .is_some_and(|level| range.contains(level)),
            Self::Notes(matcher) => matcher.matches(&record.notes),
            Self::Diffs(range) => context
                .max_visible_diff(record)
                .is_some_and(|diff| range.contains(diff)),
        }
    }
}

/// Per-evaluation inputs some predicates depend on.
#[derive(Debug, Clone, Default)]
pub struct PredicateContext {
    /// `"{v}_{v+1}"` for every visible level `v` except the last.
    diff_keys: Vec<String>,
}

impl PredicateContext {
    pub fn new(visible_api_levels: &[i64]) -> Self {
        let diff_keys = visible_api_levels
            .split_last()
            .map_or(&[][..], |(_, rest)| rest)
            .iter()
            .filter_map(|level| Some(format!("{}_{}", level, level.checked_add(1)?)))
            .collect();
        Self { diff_keys }
    }

    /// Largest diff score the record has for any visible pair.
    pub fn max_visible_diff(&self, record: &EmojiRecord) -> Option<f64> {
        self.diff_keys
            .iter()
            .filter_map(|key| record.diff(key))
            .fold(None, |max, diff| Some(max.map_or(diff, |m: f64| m.max(diff))))
    }
}
