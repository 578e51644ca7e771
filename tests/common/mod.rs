#![allow(dead_code)]

use std::path::PathBuf;

use expense_median::{ledger::Ledger, utils::persistence};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Two months of food and fuel expenses; the median up to each first Sunday is 11.72.
pub fn task_ledger() -> Ledger {
    serde_json::from_value(json!({
        "2023-01": {
            "01": {
                "food": [22.11, 43, 11.72, 2.2, 36.29, 2.5, 19],
                "fuel": [210.22]
            },
            "09": { "food": [11.9], "fuel": [190.22] }
        },
        "2023-03": {
            "07": { "food": [20, 11.9, 30.2, 11.9] },
            "04": { "food": [10.2, 11.5, 2.5], "fuel": [] }
        },
        "2023-04": {}
    }))
    .expect("task ledger json")
}

/// Single-day ledger holding `values` on 2023-01-01.
pub fn ledger_with(values: &[f64]) -> Ledger {
    let mut ledger = Ledger::new();
    ledger.insert_entries("2023-01", "01", "food", values.iter().copied().map(Value::from));
    ledger
}

/// Writes `ledger` into a fresh temporary directory. Keep the guard alive.
pub fn write_ledger(ledger: &Ledger) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("ledger.json");
    persistence::save_ledger_to_file(ledger, &path).expect("save ledger");
    (dir, path)
}
