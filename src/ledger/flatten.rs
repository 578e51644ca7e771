use serde_json::Value;
use tracing::{debug, warn};

use super::{amount, calendar, parse_year_month, Ledger};

/// Counters collected while flattening, mainly for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlattenStats {
    pub months_scanned: usize,
    pub months_skipped: usize,
    pub days_included: usize,
    pub days_beyond_cutoff: usize,
    pub days_skipped: usize,
    pub entries_kept: usize,
    pub entries_dropped: usize,
}

/// Amounts recorded up to each month's first Sunday, plus the pass counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    pub amounts: Vec<f64>,
    pub stats: FlattenStats,
}

/// Collects every valid amount recorded on or before the first Sunday of its month.
pub fn flatten(ledger: &Ledger) -> Vec<f64> {
    flatten_with_stats(ledger).amounts
}

/// Same as [`flatten`], also reporting what was skipped along the way.
///
/// Malformed month or day keys contribute nothing; they are logged, never raised.
pub fn flatten_with_stats(ledger: &Ledger) -> Flattened {
    let mut amounts = Vec::new();
    let mut stats = FlattenStats::default();

    for (key, month) in ledger.months() {
        stats.months_scanned += 1;

        let cutoff = parse_year_month(key)
            .ok()
            .and_then(|(year, month_number)| calendar::first_sunday(year, month_number));
        let Some(cutoff) = cutoff else {
            warn!(month = key, "skipping month with unusable key");
            stats.months_skipped += 1;
            continue;
        };

        for (day_key, categories) in month {
            let day = amount::parse_number(day_key);
            if day.is_nan() {
                warn!(month = key, day = %day_key, "skipping day with unusable key");
                stats.days_skipped += 1;
                continue;
            }
            if day > f64::from(cutoff) {
                stats.days_beyond_cutoff += 1;
                continue;
            }
            stats.days_included += 1;

            for entries in categories.values() {
                let Value::Array(entries) = entries else {
                    continue;
                };
                for entry in entries {
                    match amount::coerce_amount(entry) {
                        Some(value) => {
                            amounts.push(value);
                            stats.entries_kept += 1;
                        }
                        None => stats.entries_dropped += 1,
                    }
                }
            }
        }
    }

    debug!(
        months = stats.months_scanned,
        days = stats.days_included,
        kept = stats.entries_kept,
        dropped = stats.entries_dropped,
        "ledger flattened"
    );

    Flattened { amounts, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn task_ledger() -> Ledger {
        serde_json::from_value(json!({
            "2023-01": {
                "01": { "food": [22.11, 43, 11.72, 2.2, 36.29, 2.5, 19], "fuel": [210.22] },
                "09": { "food": [11.9], "fuel": [190.22] }
            },
            "2023-03": {
                "07": { "food": [20, 11.9, 30.2, 11.9] },
                "04": { "food": [10.2, 11.5, 2.5], "fuel": [] }
            },
            "2023-04": {}
        }))
        .expect("ledger json")
    }

    #[test]
    fn keeps_days_up_to_first_sunday() {
        let flattened = flatten_with_stats(&task_ledger());

        let mut amounts = flattened.amounts.clone();
        amounts.sort_by(f64::total_cmp);
        assert_eq!(
            amounts,
            vec![2.2, 2.5, 2.5, 10.2, 11.5, 11.72, 19.0, 22.11, 36.29, 43.0, 210.22]
        );
        assert_eq!(flattened.stats.months_scanned, 3);
        assert_eq!(flattened.stats.days_included, 2);
        assert_eq!(flattened.stats.days_beyond_cutoff, 2);
        assert_eq!(flattened.stats.entries_kept, 11);
    }

    #[test]
    fn only_day_one_counts_in_january_2023() {
        let mut ledger = Ledger::new();
        for day in 1..=10u32 {
            let value = f64::from(day) * 10.0;
            ledger.insert_entries(
                "2023-01",
                format!("{day:02}"),
                "food",
                vec![json!(value), json!(value + 5.0)],
            );
        }

        assert_eq!(flatten(&ledger), vec![10.0, 15.0]);
    }

    #[test]
    fn skips_unusable_keys_and_non_list_categories() {
        let ledger: Ledger = serde_json::from_value(json!({
            "garbage": { "01": { "food": [10] } },
            "2023-13": { "01": { "food": [10] } },
            "2023-03": {
                "xx": { "food": [10] },
                "02": { "food": 99, "fuel": { "nested": [1] }, "misc": [null, "5"] }
            }
        }))
        .expect("ledger json");

        let flattened = flatten_with_stats(&ledger);
        assert_eq!(flattened.amounts, vec![5.0]);
        assert_eq!(flattened.stats.months_skipped, 2);
        assert_eq!(flattened.stats.days_skipped, 1);
        assert_eq!(flattened.stats.entries_dropped, 1);
    }

    #[test]
    fn empty_ledger_flattens_to_nothing() {
        let flattened = flatten_with_stats(&Ledger::new());
        assert!(flattened.amounts.is_empty());
        assert_eq!(flattened.stats, FlattenStats::default());
    }
}
