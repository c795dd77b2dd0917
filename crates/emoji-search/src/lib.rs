//! Live filtering of emoji sequence datasets.
//!
//! This crate provides the search core behind an emoji support browser:
//! - Dataset loading and per-level support summaries
//! - A small `field:value` query language compiled into typed predicates
//! - Filter evaluation with visible API level selection
//! - Debounced re-evaluation while a query is being typed

pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod query;
pub mod search;
pub mod summary;
pub mod types;

// Re-export main types
pub use config::SearchConfig;
pub use dataset::EmojiDataset;
pub use error::{Result, SearchError};
pub use filter::{evaluate, CompiledQuery, FilterEngine, INVALID_API_LEVEL};
pub use query::{FieldName, FieldPredicate, QueryParser, QueryToken};
pub use search::{DebouncedSearch, SearchOutcome, SearchScheduler, SearchSnapshot};
pub use summary::{summarize, ApiLevelSummary};
pub use types::{ApiRange, EmojiRecord, FilterState};
