//! Filter evaluation.
//!
//! This module provides:
//! - Compiled queries and the [`FilterEngine`] that runs them
//! - Visible API level selection

mod engine;
mod visible;

pub use engine::{evaluate, CompiledQuery, FilterEngine};
pub use visible::{visible_api_levels, INVALID_API_LEVEL};
