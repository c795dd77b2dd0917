//! Loading the emoji sequence dataset.
//!
//! The dataset is a JSON array of records. It is loaded once and shared
//! read-only by every search.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use crate::error::{Result, SearchError};
use crate::types::{ApiRange, EmojiRecord};

/// Immutable set of records plus the API range they span.
#[derive(Debug, Clone)]
pub struct EmojiDataset {
    records: Vec<Arc<EmojiRecord>>,
    api_range: ApiRange,
}

impl EmojiDataset {
    pub fn new(records: Vec<EmojiRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|mut record| {
                record.normalize();
                Arc::new(record)
            })
            .collect::<Vec<_>>();
        let api_range = ApiRange::from_records(records.iter().map(Arc::as_ref));
        Self { records, api_range }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<EmojiRecord> = serde_json::from_str(json)?;
        Self::validated(records)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let records: Vec<EmojiRecord> = serde_json::from_reader(reader)?;
        Self::validated(records)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SearchError::PathNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "loaded {} sequences from {} (api {}..{})",
            dataset.len(),
            path.display(),
            dataset.api_range.min,
            dataset.api_range.max
        );
        Ok(dataset)
    }

    fn validated(records: Vec<EmojiRecord>) -> Result<Self> {
        if let Some(index) = records.iter().position(|record| record.codepoints.is_empty()) {
            return Err(SearchError::InvalidInput(format!(
                "record {index} has no codepoints"
            )));
        }
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Arc<EmojiRecord>] {
        &self.records
    }

    pub fn api_range(&self) -> ApiRange {
        self.api_range
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"[
        {"codepoints": [128512], "api_support": [21, 22, 23], "emoji_level": 1.0, "notes": "grinning"},
        {"codepoints": [129321], "api_support": [28, 26, 27], "emoji_level": 5.0, "notes": "",
         "diffs": {"26_27": 0.4}},
        {"codepoints": [9829, 65039], "api_support": [19, 21], "emoji_level": 0.6}
    ]"#;

    #[test]
    fn parses_records_and_range() {
        let dataset = EmojiDataset::from_json_str(SAMPLE).expect("parse");
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.api_range(), ApiRange::new(19, 28));
        assert_eq!(dataset.records()[2].notes, "");
        assert_eq!(dataset.records()[1].diff("26_27"), Some(0.4));
    }

    #[test]
    fn levels_are_sorted_on_load() {
        let dataset = EmojiDataset::from_json_str(SAMPLE).expect("parse");
        assert_eq!(dataset.records()[1].api_support, vec![26, 27, 28]);
        assert_eq!(dataset.records()[1].api_added(), Some(26));
    }

    #[test]
    fn rejects_records_without_codepoints() {
        let json = r#"[{"codepoints": [], "api_support": [21], "emoji_level": 1.0}]"#;
        let err = EmojiDataset::from_json_str(json).expect_err("empty codepoints");
        assert!(matches!(err, SearchError::InvalidInput(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = EmojiDataset::from_json_str(r#"[{"codepoints": "#).expect_err("bad json");
        assert!(matches!(err, SearchError::Json(_)));
    }

    #[test]
    fn empty_dataset_has_empty_range() {
        let dataset = EmojiDataset::from_json_str("[]").expect("parse");
        assert!(dataset.is_empty());
        assert!(dataset.api_range().is_empty());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write");
        let dataset = EmojiDataset::load(file.path()).expect("load");
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = EmojiDataset::load(&dir.path().join("missing.json")).expect_err("missing");
        assert!(matches!(err, SearchError::PathNotFound(_)));
    }
}
