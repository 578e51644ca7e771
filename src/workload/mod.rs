//! Synthetic expense datasets for load testing the median strategies.

use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{errors::LedgerError, ledger::Ledger};

/// Month, day and category that generated amounts are filed under. Day one is
/// never past the first Sunday, so every positive amount is counted.
pub const GENERATED_MONTH: &str = "2023-01";
pub const GENERATED_DAY: &str = "01";
pub const GENERATED_CATEGORY: &str = "food";

/// Shape of a generated amount sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Distribution {
    /// Uniform in `[0, 1000)`.
    Random,
    /// Bell-shaped around 500 (sum of six uniforms).
    Normal,
    /// Ascending ramp over `[0, 1000)`.
    Sorted,
    /// Descending ramp over `(0, 1000]`.
    ReverseSorted,
    /// Ascending ramp with small jitter and 10% uniform noise.
    AlmostSorted,
}

impl Distribution {
    pub const ALL: [Distribution; 5] = [
        Distribution::Random,
        Distribution::Normal,
        Distribution::Sorted,
        Distribution::ReverseSorted,
        Distribution::AlmostSorted,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Distribution::Random => "random",
            Distribution::Normal => "normal",
            Distribution::Sorted => "sorted",
            Distribution::ReverseSorted => "reverse-sorted",
            Distribution::AlmostSorted => "almost-sorted",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Distribution {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        Distribution::ALL
            .into_iter()
            .find(|distribution| distribution.label() == normalized)
            .ok_or_else(|| LedgerError::UnknownDistribution(value.trim().to_string()))
    }
}

/// Generates `size` amounts rounded to cents. Ramps can start at zero, which the
/// flattener later drops like any other non-positive entry.
pub fn generate_amounts<R: Rng + ?Sized>(
    size: usize,
    distribution: Distribution,
    rng: &mut R,
) -> Vec<f64> {
    let step = if size == 0 { 0.0 } else { 1000.0 / size as f64 };

    (0..size)
        .map(|i| {
            let raw = match distribution {
                Distribution::Random => rng.gen::<f64>() * 1000.0,
                Distribution::Normal => {
                    let sum: f64 = (0..6).map(|_| rng.gen::<f64>()).sum();
                    (sum - 3.0) * 167.0 + 500.0
                }
                Distribution::Sorted => i as f64 * step,
                Distribution::ReverseSorted => (size - i) as f64 * step,
                Distribution::AlmostSorted => {
                    if rng.gen_bool(0.9) {
                        i as f64 * step + rng.gen::<f64>() * 10.0 - 5.0
                    } else {
                        rng.gen::<f64>() * 1000.0
                    }
                }
            };
            round_cents(raw)
        })
        .collect()
}

/// Wraps [`generate_amounts`] in a single-month ledger.
pub fn generate_ledger<R: Rng + ?Sized>(
    size: usize,
    distribution: Distribution,
    rng: &mut R,
) -> Ledger {
    let amounts = generate_amounts(size, distribution, rng);
    let mut ledger = Ledger::new();
    ledger.insert_entries(
        GENERATED_MONTH,
        GENERATED_DAY,
        GENERATED_CATEGORY,
        amounts.into_iter().map(Value::from),
    );
    ledger
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::flatten;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn distribution_round_trips_through_text() {
        for distribution in Distribution::ALL {
            assert_eq!(
                distribution.label().parse::<Distribution>().unwrap(),
                distribution
            );
        }
        assert_eq!(
            "Reverse_Sorted".parse::<Distribution>().unwrap(),
            Distribution::ReverseSorted
        );
        assert!("zigzag".parse::<Distribution>().is_err());
    }

    #[test]
    fn ramps_follow_their_direction() {
        let mut rng = StdRng::seed_from_u64(3);
        let sorted = generate_amounts(100, Distribution::Sorted, &mut rng);
        let reversed = generate_amounts(100, Distribution::ReverseSorted, &mut rng);

        assert_eq!(sorted.first(), Some(&0.0));
        assert_eq!(sorted.last(), Some(&990.0));
        assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(reversed.first(), Some(&1000.0));
        assert_eq!(reversed.last(), Some(&10.0));
        assert!(reversed.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn random_values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for distribution in [Distribution::Random, Distribution::AlmostSorted] {
            let values = generate_amounts(2_000, distribution, &mut rng);
            assert_eq!(values.len(), 2_000);
            assert!(values.iter().all(|v| (-5.0..=1005.0).contains(v)));
        }
    }

    #[test]
    fn generated_ledger_is_fully_counted() {
        let mut rng = StdRng::seed_from_u64(5);
        let ledger = generate_ledger(500, Distribution::ReverseSorted, &mut rng);
        assert_eq!(ledger.month_count(), 1);
        assert_eq!(flatten(&ledger).len(), 500);
    }
}
