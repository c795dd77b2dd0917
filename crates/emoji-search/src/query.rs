//! Query parsing and predicate compilation.
//!
//! This module provides the emoji query language:
//! - Field names (`u`, `emoji`, `api`, `api_added`, `note`, `diff`)
//! - Clause tokenization
//! - Numeric range parsing (decimal, hex, float)
//! - Note matching (substring, quoted, regex)
//! - Typed predicates evaluated against records

mod field;
mod note;
mod parser;
mod predicate;
mod range;

pub use field::{FieldName, FieldSet};
pub use note::NoteMatcher;
pub use parser::{QueryParser, QueryToken};
pub use predicate::{FieldPredicate, PredicateContext, DEFAULT_DIFF_UPPER};
pub use range::{NumericRange, Radix, RangeBound};
