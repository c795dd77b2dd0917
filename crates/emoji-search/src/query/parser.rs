//! Query tokenizer.
//!
//! A query is a run of `field:value` clauses. A value is either a
//! double-quoted string, which may contain spaces, or a run of non-whitespace
//! characters. Text that does not form a clause is ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SearchError};

use super::field::FieldName;

static CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z0-9_]+):("[^"]*"|\S+)"#).expect("clause pattern is valid")
});

/// One `field:value` clause of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryToken {
    pub field: FieldName,
    /// The value exactly as typed, quotes and slashes included.
    pub raw: String,
}

impl QueryToken {
    pub fn new(field: FieldName, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
        }
    }
}

pub struct QueryParser;

impl QueryParser {
    /// Splits `input` into clauses in the order they appear.
    ///
    /// An empty or clause-free query yields no tokens. A clause naming a
    /// field outside [`FieldName`] fails the whole query.
    pub fn parse(input: &str) -> Result<Vec<QueryToken>> {
        let mut tokens = Vec::new();

        for captures in CLAUSE.captures_iter(input) {
            let (Some(name), Some(value)) = (captures.get(1), captures.get(2)) else {
                continue;
            };

            let field = FieldName::from_query_name(name.as_str()).ok_or_else(|| {
                SearchError::UnknownField {
                    field: name.as_str().to_string(),
                    raw: value.as_str().to_string(),
                }
            })?;

            tokens.push(QueryToken::new(field, value.as_str()));
        }

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(input: &str) -> Vec<(FieldName, String)> {
        QueryParser::parse(input)
            .expect("parse")
            .into_iter()
            .map(|token| (token.field, token.raw))
            .collect()
    }

    #[test]
    fn empty_query_has_no_tokens() {
        assert!(QueryParser::parse("").expect("parse").is_empty());
        assert!(QueryParser::parse("   ").expect("parse").is_empty());
    }

    #[test]
    fn clauses_keep_query_order() {
        assert_eq!(
            pairs("api:21..24 u:1F600 emoji:11"),
            vec![
                (FieldName::ApiSupport, "21..24".to_string()),
                (FieldName::Codepoints, "1F600".to_string()),
                (FieldName::EmojiLevel, "11".to_string()),
            ]
        );
    }

    #[test]
    fn quoted_value_keeps_spaces() {
        assert_eq!(
            pairs(r#"note:"wedding ring" api:26"#),
            vec![
                (FieldName::Notes, r#""wedding ring""#.to_string()),
                (FieldName::ApiSupport, "26".to_string()),
            ]
        );
    }

    #[test]
    fn unclosed_quote_falls_back_to_word() {
        assert_eq!(
            pairs(r#"note:"ring shape"#),
            vec![(FieldName::Notes, r#""ring"#.to_string())]
        );
    }

    #[test]
    fn slash_literal_is_one_value() {
        assert_eq!(
            pairs("note:/^skin.*tone$/"),
            vec![(FieldName::Notes, "/^skin.*tone$/".to_string())]
        );
    }

    #[test]
    fn stray_text_is_ignored() {
        assert_eq!(
            pairs("smile api_added:26 trailing"),
            vec![(FieldName::ApiAdded, "26".to_string())]
        );
        assert!(QueryParser::parse("just words").expect("parse").is_empty());
        assert!(QueryParser::parse("api:").expect("parse").is_empty());
    }

    #[test]
    fn unknown_field_names_the_field() {
        let err = QueryParser::parse("api:21 color:red").expect_err("unknown field");
        match err {
            SearchError::UnknownField { field, raw } => {
                assert_eq!(field, "color");
                assert_eq!(raw, "red");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
