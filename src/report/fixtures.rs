//! Small named ledgers with known medians, used for accuracy checks.

use serde_json::{json, Value};

use crate::ledger::Ledger;

/// A named ledger and the median both strategies must produce for it.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: &'static str,
    pub ledger: Ledger,
    pub expected: Option<f64>,
}

pub fn named_fixtures() -> Vec<Fixture> {
    vec![
        Fixture {
            name: "basic",
            ledger: basic(),
            expected: Some(11.72),
        },
        Fixture {
            name: "exactly one sunday",
            ledger: exactly_one_sunday(),
            expected: Some(22.5),
        },
        Fixture {
            name: "multiple years",
            ledger: multiple_years(),
            expected: Some(225.0),
        },
        Fixture {
            name: "extreme values",
            ledger: extreme_values(),
            expected: Some(500_000.005),
        },
        Fixture {
            name: "many categories",
            ledger: many_categories(),
            expected: Some(110.0),
        },
        Fixture {
            name: "many days in month",
            ledger: many_days_in_month(),
            expected: Some(15.0),
        },
        Fixture {
            name: "invalid data",
            ledger: invalid_data(),
            expected: Some(30.0),
        },
        Fixture {
            name: "repeated values",
            ledger: repeated_values(),
            expected: Some(15.0),
        },
        Fixture {
            name: "empty",
            ledger: Ledger::new(),
            expected: None,
        },
    ]
}

fn entries(values: Value) -> Vec<Value> {
    match values {
        Value::Array(items) => items,
        other => vec![other],
    }
}

fn basic() -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .insert_entries(
            "2023-01",
            "01",
            "food",
            entries(json!([22.11, 43, 11.72, 2.2, 36.29, 2.5, 19])),
        )
        .insert_entries("2023-01", "01", "fuel", entries(json!([210.22])))
        .insert_entries("2023-01", "09", "food", entries(json!([11.9])))
        .insert_entries("2023-01", "09", "fuel", entries(json!([190.22])))
        .insert_entries("2023-03", "07", "food", entries(json!([20, 11.9, 30.2, 11.9])))
        .insert_entries("2023-03", "04", "food", entries(json!([10.2, 11.5, 2.5])))
        .insert_entries("2023-03", "04", "fuel", Vec::new())
        .insert_month("2023-04");
    ledger
}

fn exactly_one_sunday() -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .insert_entries("2023-01-01", "01", "food", entries(json!([10, 20, 30])))
        .insert_entries("2023-02-05", "05", "food", entries(json!([15, 25, 35])));
    ledger
}

fn multiple_years() -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .insert_entries("2022-12", "04", "food", entries(json!([100, 200])))
        .insert_entries("2023-01", "01", "food", entries(json!([150, 250])))
        .insert_entries("2024-02", "04", "food", entries(json!([300, 400])));
    ledger
}

fn extreme_values() -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .insert_entries("2023-01", "01", "food", entries(json!([0.01, 9999999.99, 0.001, 1000000])))
        .insert_entries("2023-01", "01", "fuel", entries(json!([0.0001, 5000000])));
    ledger
}

fn many_categories() -> Ledger {
    let categories = [
        ("food", [10u32, 20]),
        ("fuel", [100, 200]),
        ("entertainment", [50, 60]),
        ("bills", [300, 400]),
        ("shopping", [25, 75]),
        ("travel", [500, 1000]),
        ("health", [150, 250]),
        ("education", [80, 120]),
    ];
    let mut ledger = Ledger::new();
    for (category, amounts) in categories {
        ledger.insert_entries("2023-01", "01", category, amounts.map(Value::from));
    }
    ledger
}

fn many_days_in_month() -> Ledger {
    let mut ledger = Ledger::new();
    for day in 1..=10u32 {
        let base = day * 20;
        ledger.insert_entries(
            "2023-01",
            format!("{day:02}"),
            "food",
            [base - 10, base].map(Value::from),
        );
    }
    ledger
}

fn invalid_data() -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .insert_entries("2023-01", "01", "food", entries(json!([null, "abc", null, null, -10, 30])))
        .insert_entries("2023-01", "01", "fuel", entries(json!(["xyz", {}, [], true, 50])));
    ledger
}

fn repeated_values() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.insert_entries(
        "2023-01",
        "01",
        "food",
        entries(json!([10, 10, 10, 10, 10, 20, 20, 20, 20, 20])),
    );
    ledger
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ledger::flatten,
        median::{results_agree, sort_median, AGREEMENT_TOLERANCE},
    };

    #[test]
    fn fixtures_have_unique_names() {
        let fixtures = named_fixtures();
        let mut names: Vec<_> = fixtures.iter().map(|fixture| fixture.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), fixtures.len());
    }

    #[test]
    fn expected_medians_hold_for_sorting() {
        for fixture in named_fixtures() {
            let median = sort_median(&flatten(&fixture.ledger));
            assert!(
                results_agree(median, fixture.expected, AGREEMENT_TOLERANCE),
                "{}: got {median:?}, expected {:?}",
                fixture.name,
                fixture.expected
            );
        }
    }

    #[test]
    fn invalid_data_keeps_true_as_one() {
        let mut amounts = flatten(&invalid_data());
        amounts.sort_by(f64::total_cmp);
        assert_eq!(amounts, vec![1.0, 30.0, 50.0]);
    }
}
