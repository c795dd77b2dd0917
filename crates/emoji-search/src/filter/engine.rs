//! Query evaluation over the whole dataset.

use std::sync::Arc;
use std::time::Instant;

use crate::dataset::EmojiDataset;
use crate::error::Result;
use crate::query::{FieldPredicate, FieldSet, PredicateContext, QueryParser, QueryToken};
use crate::types::{ApiRange, EmojiRecord, FilterState};

use super::visible::visible_api_levels;

/// Predicates compiled from one query. All of them must hold for a match.
#[derive(Debug, Clone, Default)]
pub struct CompiledQuery {
    predicates: Vec<FieldPredicate>,
    fields: FieldSet,
}

impl CompiledQuery {
    /// Parses and compiles a raw query string.
    pub fn parse(raw_query: &str) -> Result<Self> {
        let tokens = QueryParser::parse(raw_query)?;
        Self::compile(&tokens)
    }

    pub fn compile(tokens: &[QueryToken]) -> Result<Self> {
        let predicates = tokens
            .iter()
            .map(FieldPredicate::build)
            .collect::<Result<Vec<_>>>()?;
        let fields = predicates.iter().map(FieldPredicate::field).collect();
        Ok(Self { predicates, fields })
    }

    pub fn predicates(&self) -> &[FieldPredicate] {
        &self.predicates
    }

    /// Fields referenced by the query.
    pub fn fields(&self) -> FieldSet {
        self.fields
    }

    /// True when the query has no clauses and matches everything.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, record: &EmojiRecord, context: &PredicateContext) -> bool {
        self.predicates
            .iter()
            .all(|predicate| predicate.matches(record, context))
    }

    /// Evaluates the query against `records`, keeping their order.
    pub fn evaluate(&self, records: &[Arc<EmojiRecord>], api_range: ApiRange) -> FilterState {
        let visible_api_levels = visible_api_levels(api_range, &self.predicates);

        let matches = if self.is_empty() {
            records.to_vec()
        } else {
            let context = PredicateContext::new(&visible_api_levels);
            records
                .iter()
                .filter(|record| self.matches(record, &context))
                .cloned()
                .collect::<Vec<_>>()
        };

        FilterState {
            visible_api_levels,
            match_count: matches.len(),
            matches,
        }
    }
}

/// Builds one predicate per token and evaluates them over `records`.
pub fn evaluate(
    records: &[Arc<EmojiRecord>],
    tokens: &[QueryToken],
    api_range: ApiRange,
) -> Result<FilterState> {
    Ok(CompiledQuery::compile(tokens)?.evaluate(records, api_range))
}

/// Runs queries against a loaded dataset.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    dataset: Arc<EmojiDataset>,
}

impl FilterEngine {
    pub fn new(dataset: Arc<EmojiDataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &EmojiDataset {
        &self.dataset
    }

    pub fn evaluate(&self, tokens: &[QueryToken]) -> Result<FilterState> {
        evaluate(self.dataset.records(), tokens, self.dataset.api_range())
    }

    /// Parses, compiles, and evaluates `query`.
    pub fn search(&self, query: &str) -> Result<FilterState> {
        let started = Instant::now();
        let compiled = CompiledQuery::parse(query)?;
        let state = compiled.evaluate(self.dataset.records(), self.dataset.api_range());
        log::debug!(
            "search took {} ms {:?} has {} results ({} visible levels, fields {:?})",
            started.elapsed().as_millis(),
            query,
            state.match_count,
            state.visible_api_levels.len(),
            compiled.fields()
        );
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use fnv::FnvHashMap;

    use super::*;
    use crate::error::SearchError;
    use crate::filter::INVALID_API_LEVEL;

    fn record(codepoints: Vec<u32>, api_support: Vec<i64>, notes: &str) -> EmojiRecord {
        EmojiRecord {
            codepoints,
            api_support,
            emoji_level: 1.0,
            notes: notes.to_string(),
            diffs: None,
        }
    }

    fn engine() -> FilterEngine {
        let mut diffs = FnvHashMap::default();
        diffs.insert("21_22".to_string(), 0.8);
        diffs.insert("22_23".to_string(), 0.1);

        let records = vec![
            record(vec![0x1F600], vec![19, 21, 22, 23, 24], "grinning face"),
            record(vec![0x1F48D], vec![21, 22, 23, 24], "wedding ring"),
            EmojiRecord {
                emoji_level: 5.0,
                diffs: Some(diffs),
                ..record(vec![0x1F9D0], vec![22, 23, 24], "earring shape")
            },
            EmojiRecord {
                emoji_level: 11.0,
                ..record(vec![0x1F469, 0x200D, 0x1F52C], vec![24], "woman scientist")
            },
        ];
        FilterEngine::new(Arc::new(EmojiDataset::new(records)))
    }

    fn codepoints(state: &FilterState) -> Vec<u32> {
        state.matches.iter().map(|record| record.codepoints[0]).collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        let engine = engine();
        let state = engine.search("").expect("search");
        assert_eq!(state.match_count, engine.dataset().len());
        assert_eq!(state.matches, engine.dataset().records());
        assert_eq!(state.visible_api_levels, vec![19, 21, 22, 23, 24]);
    }

    #[test]
    fn clauses_combine_with_and() {
        let state = engine().search("api:22 note:ring").expect("search");
        assert_eq!(codepoints(&state), vec![0x1F48D, 0x1F9D0]);

        let state = engine().search("api:22 note:ring emoji:5").expect("search");
        assert_eq!(codepoints(&state), vec![0x1F9D0]);
    }

    #[test]
    fn api_clause_narrows_columns_and_rows() {
        let state = engine().search("api:23..30").expect("search");
        assert_eq!(state.visible_api_levels, vec![23, 24]);
        assert_eq!(state.match_count, 4);

        let state = engine().search("api:19").expect("search");
        assert_eq!(state.visible_api_levels, vec![19]);
        assert_eq!(codepoints(&state), vec![0x1F600]);
    }

    #[test]
    fn api_added_keeps_all_columns() {
        let state = engine().search("api_added:22").expect("search");
        assert_eq!(state.visible_api_levels, vec![19, 21, 22, 23, 24]);
        assert_eq!(codepoints(&state), vec![0x1F9D0]);
    }

    #[test]
    fn sentinel_level_is_never_visible() {
        for query in ["", "api:20", "api:19..21", "api_added:19"] {
            let state = engine().search(query).expect("search");
            assert!(
                !state.visible_api_levels.contains(&INVALID_API_LEVEL),
                "{query} exposed level 20"
            );
        }
    }

    #[test]
    fn codepoint_range_is_inclusive() {
        let state = engine().search("u:1F600..1F600").expect("search");
        assert_eq!(codepoints(&state), vec![0x1F600]);

        let state = engine().search("u:200d").expect("search");
        assert_eq!(codepoints(&state), vec![0x1F469]);
    }

    #[test]
    fn diff_follows_visible_columns() {
        let state = engine().search("api:21..22 diff:0.5..1.0").expect("search");
        assert_eq!(state.visible_api_levels, vec![21, 22]);
        assert_eq!(codepoints(&state), vec![0x1F9D0]);

        let state = engine().search("api:22..23 diff:0.5..1.0").expect("search");
        assert!(state.matches.is_empty());
    }

    #[test]
    fn query_errors_propagate() {
        assert!(matches!(
            engine().search("api:30..10"),
            Err(SearchError::MalformedRange { .. })
        ));
        assert!(matches!(
            engine().search("size:large"),
            Err(SearchError::UnknownField { .. })
        ));
        assert!(matches!(
            engine().search("note:/(/"),
            Err(SearchError::MalformedRegex { .. })
        ));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let engine = engine();
        let tokens = QueryParser::parse("api:21..24 note:ring").expect("parse");
        let first = engine.evaluate(&tokens).expect("evaluate");
        let second = engine.evaluate(&tokens).expect("evaluate");
        assert_eq!(first, second);
    }

    #[test]
    fn free_function_matches_engine() {
        let engine = engine();
        let tokens = QueryParser::parse("emoji:0..4").expect("parse");
        let state = evaluate(
            engine.dataset().records(),
            &tokens,
            engine.dataset().api_range(),
        )
        .expect("evaluate");
        assert_eq!(state, engine.evaluate(&tokens).expect("evaluate"));
        assert_eq!(codepoints(&state), vec![0x1F600, 0x1F48D]);
    }

    #[test]
    fn compiled_query_reports_fields() {
        let compiled = CompiledQuery::parse("u:1F600 api_added:21").expect("compile");
        assert!(compiled.fields().contains(FieldSet::CODEPOINTS | FieldSet::API_ADDED));
        assert!(!compiled.fields().contains(FieldSet::API_SUPPORT));
        assert!(CompiledQuery::parse("no clauses here").expect("compile").is_empty());
    }
}
