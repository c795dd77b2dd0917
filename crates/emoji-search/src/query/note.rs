//! Matching for `note:` clauses.

use memchr::memmem::Finder;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SearchError};

static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"([^"]+)"$"#).expect("quoted pattern is valid"));
static SLASHED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/([^/]+)/$").expect("slashed pattern is valid"));

/// Compiled test for a notes string.
#[derive(Debug, Clone)]
pub enum NoteMatcher {
    /// Plain substring containment.
    Contains(Finder<'static>),
    /// Regular expression matched anywhere in the notes.
    Pattern(Regex),
}

impl NoteMatcher {
    /// Compiles a raw `note:` value.
    ///
    /// Surrounding double quotes are stripped first. A value wrapped in
    /// slashes is then compiled as a regex; anything else is a substring.
    pub fn parse(raw: &str) -> Result<Self> {
        let value = QUOTED
            .captures(raw)
            .and_then(|captures| captures.get(1))
            .map_or(raw, |inner| inner.as_str());

        if let Some(pattern) = SLASHED.captures(value).and_then(|captures| captures.get(1)) {
            let pattern = pattern.as_str();
            let regex = Regex::new(pattern).map_err(|source| SearchError::MalformedRegex {
                pattern: pattern.to_string(),
                source,
            })?;
            return Ok(Self::Pattern(regex));
        }

        Ok(Self::Contains(Finder::new(value.as_bytes()).into_owned()))
    }

    pub fn matches(&self, notes: &str) -> bool {
        match self {
            Self::Contains(finder) => finder.find(notes.as_bytes()).is_some(),
            Self::Pattern(regex) => regex.is_match(notes),
        }
    }
}
