//! Nested expense ledger (`year-month → day → category → entries`) and the
//! pass that flattens it into the amounts recorded up to each first Sunday.

pub mod amount;
pub mod calendar;
pub mod flatten;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::LedgerError;

pub use amount::{coerce_amount, coerce_number, parse_number};
pub use calendar::first_sunday;
pub use flatten::{flatten, flatten_with_stats, FlattenStats, Flattened};

/// Category label → raw category value. Only array values hold entries.
pub type Day = BTreeMap<String, Value>;

/// Two-digit day-of-month key → [`Day`].
pub type Month = BTreeMap<String, Day>;

/// Full expense record keyed by `"YYYY-MM"`.
///
/// Serializes as the plain nested JSON object, e.g.
/// `{"2023-01": {"01": {"food": [22.11, 43], "fuel": [210.22]}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    months: BTreeMap<String, Month>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends raw entries to a category, creating the month, day and category
    /// as needed. A category holding a non-list value is replaced by the list.
    pub fn insert_entries(
        &mut self,
        year_month: impl Into<String>,
        day: impl Into<String>,
        category: impl Into<String>,
        entries: impl IntoIterator<Item = Value>,
    ) -> &mut Self {
        let slot = self
            .months
            .entry(year_month.into())
            .or_default()
            .entry(day.into())
            .or_default()
            .entry(category.into())
            .or_insert_with(|| Value::Array(Vec::new()));
        match slot {
            Value::Array(existing) => existing.extend(entries),
            other => *other = Value::Array(entries.into_iter().collect()),
        }
        self
    }

    /// Stores an arbitrary raw value under a category, replacing what was there.
    pub fn insert_category_value(
        &mut self,
        year_month: impl Into<String>,
        day: impl Into<String>,
        category: impl Into<String>,
        value: Value,
    ) -> &mut Self {
        self.months
            .entry(year_month.into())
            .or_default()
            .entry(day.into())
            .or_default()
            .insert(category.into(), value);
        self
    }

    /// Registers a month with no recorded days.
    pub fn insert_month(&mut self, year_month: impl Into<String>) -> &mut Self {
        self.months.entry(year_month.into()).or_default();
        self
    }

    pub fn month(&self, year_month: &str) -> Option<&Month> {
        self.months.get(year_month)
    }

    pub fn months(&self) -> impl Iterator<Item = (&str, &Month)> {
        self.months.iter().map(|(key, month)| (key.as_str(), month))
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// Splits a `"YYYY-MM"` key into year and 1-based month.
///
/// Only the first two `-` separated segments are read, so `"2023-01-01"`
/// resolves to January 2023.
pub fn parse_year_month(key: &str) -> Result<(i32, u32), LedgerError> {
    let mut segments = key.split('-').map(str::trim);
    let year = segments
        .next()
        .and_then(|segment| segment.parse::<i32>().ok())
        .ok_or_else(|| LedgerError::InvalidKey(format!("`{key}` has no numeric year")))?;
    let month = segments
        .next()
        .and_then(|segment| segment.parse::<u32>().ok())
        .ok_or_else(|| LedgerError::InvalidKey(format!("`{key}` has no numeric month")))?;
    Ok((year, month))
}
