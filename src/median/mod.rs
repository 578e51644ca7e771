//! Median of a flat amount sequence, by full sort or by randomized quickselect.
//!
//! Both strategies read the input slice only; quickselect partitions private
//! working copies, so one flattened sequence can be fed to either strategy
//! any number of times.

pub mod quickselect;
pub mod sort;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    errors::LedgerError,
    ledger::{flatten, Ledger},
};

pub use quickselect::{quickselect_median, select_rank, QuickSelectMedian};
pub use sort::{sort_median, SortMedian};

/// Absolute tolerance within which the two strategies must agree.
pub const AGREEMENT_TOLERANCE: f64 = 1e-6;

/// A way of computing the median of a sequence of finite amounts.
pub trait MedianStrategy {
    /// Returns the median, or `None` for an empty sequence.
    fn median(&self, values: &[f64]) -> Option<f64>;
}

/// Selectable median strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Sort everything, then read the middle. O(n log n).
    Sort,
    /// Randomized quickselect on the middle rank(s). Expected O(n).
    #[default]
    #[serde(alias = "select")]
    QuickSelect,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Sort, Strategy::QuickSelect];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Sort => "sort",
            Strategy::QuickSelect => "quickselect",
        }
    }
}

impl MedianStrategy for Strategy {
    fn median(&self, values: &[f64]) -> Option<f64> {
        match self {
            Strategy::Sort => SortMedian.median(values),
            Strategy::QuickSelect => QuickSelectMedian::default().median(values),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sort" | "sorted" => Ok(Strategy::Sort),
            "quickselect" | "quick-select" | "select" => Ok(Strategy::QuickSelect),
            other => Err(LedgerError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Median of the ledger's amounts up to each first Sunday.
pub fn ledger_median(ledger: &Ledger, strategy: Strategy) -> Option<f64> {
    let amounts = flatten(ledger);
    strategy.median(&amounts)
}

/// True when both results are absent, or both present and within `tolerance`.
pub fn results_agree(left: Option<f64>, right: Option<f64>, tolerance: f64) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b || (a - b).abs() < tolerance,
        _ => false,
    }
}
