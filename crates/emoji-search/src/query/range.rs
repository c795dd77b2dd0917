//! Numeric range parsing and matching.
//!
//! A range is written `N` or `N..M`. A single value is a range whose bounds
//! are equal. Both bounds are inclusive.

use crate::error::{Result, SearchError};

/// Radix for integer bounds. Float bounds are always decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hex,
}

impl Radix {
    fn value(self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Hex => 16,
        }
    }
}

/// A number type that can appear as a range bound.
pub trait RangeBound: Copy + PartialOrd + std::fmt::Debug {
    fn parse_bound(raw: &str, radix: Radix) -> Option<Self>;
}

impl RangeBound for i64 {
    fn parse_bound(raw: &str, radix: Radix) -> Option<Self> {
        let digits = match radix {
            Radix::Hex => raw
                .strip_prefix("0x")
                .or_else(|| raw.strip_prefix("0X"))
                .unwrap_or(raw),
            Radix::Decimal => raw,
        };
        i64::from_str_radix(digits, radix.value()).ok()
    }
}

impl RangeBound for f64 {
    fn parse_bound(raw: &str, _radix: Radix) -> Option<Self> {
        raw.parse::<f64>().ok().filter(|value| !value.is_nan())
    }
}

/// Inclusive `lower..=upper` test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange<T> {
    lower: T,
    upper: T,
}

impl<T: RangeBound> NumericRange<T> {
    pub fn parse(raw: &str, radix: Radix) -> Result<Self> {
        let (lower_raw, upper_raw) = raw.split_once("..").unwrap_or((raw, raw));
        let lower = parse_bound::<T>(raw, lower_raw, radix)?;
        let upper = parse_bound::<T>(raw, upper_raw, radix)?;
        Self::new(raw, lower, upper)
    }

    /// Parses `raw`, using `default_upper` when no `..` is present.
    pub fn parse_with_default_upper(raw: &str, radix: Radix, default_upper: T) -> Result<Self> {
        if raw.contains("..") {
            return Self::parse(raw, radix);
        }
        let lower = parse_bound::<T>(raw, raw, radix)?;
        Self::new(raw, lower, default_upper)
    }

    fn new(raw: &str, lower: T, upper: T) -> Result<Self> {
        if lower > upper {
            return Err(SearchError::malformed_range(
                raw,
                "lower bound must be <= upper bound",
            ));
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> T {
        self.lower
    }

    pub fn upper(&self) -> T {
        self.upper
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        value >= self.lower && value <= self.upper
    }
}

fn parse_bound<T: RangeBound>(raw: &str, part: &str, radix: Radix) -> Result<T> {
    if part.is_empty() {
        return Err(SearchError::malformed_range(raw, "missing bound"));
    }
    T::parse_bound(part, radix)
        .ok_or_else(|| SearchError::malformed_range(raw, format!("{part:?} is not a number")))
}
