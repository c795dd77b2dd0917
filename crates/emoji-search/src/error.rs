use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("unknown field {field:?} in {field}:{raw}")]
    UnknownField { field: String, raw: String },

    #[error("unable to parse range {raw:?}: {reason}")]
    MalformedRange { raw: String, reason: String },

    #[error("invalid regex /{pattern}/: {source}")]
    MalformedRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SearchError {
    pub(crate) fn malformed_range(raw: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRange {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by the text of a query, which a caller
    /// can recover from by showing the message and keeping prior results.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. } | Self::MalformedRange { .. } | Self::MalformedRegex { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_are_recoverable() {
        assert!(SearchError::malformed_range("30..10", "reversed").is_query_error());
        assert!(SearchError::UnknownField {
            field: "size".to_string(),
            raw: "large".to_string(),
        }
        .is_query_error());
        assert!(!SearchError::PathNotFound(PathBuf::from("emoji.json")).is_query_error());
        assert!(!SearchError::InvalidInput("no dataset given".to_string()).is_query_error());
    }
}
