//! Visible API level selection.

use crate::query::FieldPredicate;
use crate::types::ApiRange;

/// API level that never shipped. It is never shown, whatever the query.
pub const INVALID_API_LEVEL: i64 = 20;

/// Levels in `range` that every `api:` clause admits, excluding
/// [`INVALID_API_LEVEL`].
pub fn visible_api_levels(range: ApiRange, predicates: &[FieldPredicate]) -> Vec<i64> {
    range
        .levels()
        .filter(|level| *level != INVALID_API_LEVEL)
        .filter(|level| {
            predicates
                .iter()
                .filter_map(|predicate| predicate.admits_api_level(*level))
                .all(|admitted| admitted)
        })
        .collect()
}
