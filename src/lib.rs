#![doc(test(attr(deny(warnings))))]

//! Expense Median computes the median of the expenses recorded up to the first
//! Sunday of each month, using either a full sort or randomized quickselect.

pub mod config;
pub mod errors;
pub mod ledger;
pub mod median;
pub mod report;
pub mod utils;
pub mod workload;

pub use errors::LedgerError;
pub use ledger::{flatten, Ledger};
pub use median::{ledger_median, MedianStrategy, QuickSelectMedian, SortMedian, Strategy};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Median tracing initialized.");
    });
}
